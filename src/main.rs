//! Adventra Assistant - terminal front end
//!
//! Reads one line per turn from stdin. A number picks the matching
//! suggestion from the last reply; `quit` or end of input leaves.

use adventra_assistant::config::DEFAULT_LOG_FILTER;
use adventra_assistant::{AssistantConfig, ConversationSession, Message};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AssistantConfig::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_writer(io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }

    let catalog = Arc::new(config.load_catalog()?);
    tracing::info!(
        destinations = catalog.destinations().len(),
        seeded = config.seed.is_some(),
        "Assistant ready"
    );

    let mut session = match config.seed {
        Some(seed) => ConversationSession::with_seed(catalog, seed),
        None => ConversationSession::new(catalog),
    };

    let mut out = io::stdout().lock();
    render(&mut out, session.transcript())?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if matches!(trimmed, "quit" | "exit") {
            break;
        }

        let picked = trimmed
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| session.current_suggestions().get(i))
            .map(|s| s.value.clone());

        let replies = match picked {
            Some(value) => session.choose_suggestion(&value),
            None => session.handle_input(&line),
        };
        render(&mut out, replies)?;
    }

    tracing::info!(
        session_id = %session.id(),
        turns = session.transcript().len(),
        "Conversation closed"
    );
    Ok(())
}

fn render(out: &mut impl Write, messages: &[Message]) -> io::Result<()> {
    for message in messages {
        writeln!(out)?;
        for segment in message.segments() {
            if segment.emphasized {
                write!(out, "{BOLD}{}{RESET}", segment.text)?;
            } else {
                write!(out, "{}", segment.text)?;
            }
        }
        writeln!(out)?;
        for (i, suggestion) in message.suggestions.iter().enumerate() {
            writeln!(out, "  [{}] {}", i + 1, suggestion.label)?;
        }
    }
    write!(out, "\n> ")?;
    out.flush()
}
