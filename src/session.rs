//! Conversation session: owned state, slots and transcript
//!
//! A session is the only mutable thing in the assistant. Each one owns
//! its state, slots, transcript and random source outright, so separate
//! sessions never share anything but the read-only catalog.

use crate::catalog::Catalog;
use crate::message::{Message, Origin, Suggestion};
use crate::state_machine::{transition, ConversationState, Event, Reply, Slots, TransitionResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use uuid::Uuid;

pub struct ConversationSession {
    id: Uuid,
    state: ConversationState,
    slots: Slots,
    transcript: Vec<Message>,
    catalog: Arc<Catalog>,
    rng: StdRng,
}

impl ConversationSession {
    /// Open a session seeded from OS entropy. The greeting is already in
    /// the transcript when this returns.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }

    /// Open a session whose hotel and activity picks are reproducible
    #[must_use]
    pub fn with_seed(catalog: Arc<Catalog>, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: Arc<Catalog>, rng: StdRng) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            state: ConversationState::Initial,
            slots: Slots::default(),
            transcript: Vec::new(),
            catalog,
            rng,
        };
        session.greet();
        tracing::debug!(session_id = %session.id, "Conversation opened");
        session
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> ConversationState {
        self.state
    }

    #[must_use]
    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    #[must_use]
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Suggestions on the most recent assistant message
    #[must_use]
    pub fn current_suggestions(&self) -> &[Suggestion] {
        self.transcript
            .iter()
            .rev()
            .find(|m| m.origin == Origin::Assistant)
            .map_or(&[], |m| m.suggestions.as_slice())
    }

    /// Handle one committed input string.
    ///
    /// The input is echoed to the transcript as typed. Returns the
    /// assistant messages this turn produced. Blank input is ignored
    /// and produces nothing.
    pub fn handle_input(&mut self, raw: &str) -> &[Message] {
        if raw.trim().is_empty() {
            return &[];
        }
        self.transcript.push(Message::user(raw));
        let start = self.transcript.len();
        self.apply(Event::user_input(raw));
        &self.transcript[start..]
    }

    /// Handle a clicked suggestion: echo its label, interpret its value
    pub fn choose_suggestion(&mut self, value: &str) -> &[Message] {
        if value.trim().is_empty() {
            return &[];
        }
        let label = self
            .current_suggestions()
            .iter()
            .find(|s| s.value == value)
            .map_or_else(|| value.to_string(), |s| s.label.clone());

        self.transcript.push(Message::user(label));
        let start = self.transcript.len();
        self.apply(Event::user_input(value));
        &self.transcript[start..]
    }

    /// Discard everything and open a fresh conversation under a new id
    pub fn reset(&mut self) -> &[Message] {
        tracing::info!(session_id = %self.id, "Conversation reset");
        self.id = Uuid::new_v4();
        self.state = ConversationState::Initial;
        self.slots = Slots::default();
        self.transcript.clear();
        self.greet();
        &self.transcript
    }

    fn greet(&mut self) {
        if self.transcript.is_empty() {
            self.apply(Event::Greet);
        }
    }

    fn apply(&mut self, event: Event) {
        let from = self.state;
        let result = match transition(self.state, &self.slots, &self.catalog, &mut self.rng, event) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(
                    session_id = %self.id,
                    state = %from,
                    error = %e,
                    "Dialogue invariant violated, restarting conversation"
                );
                debug_assert!(false, "dialogue invariant violated in state {from}: {e}");
                TransitionResult::finished().with_reply(Reply::fresh_start())
            }
        };

        if result.restarted {
            tracing::info!(session_id = %self.id, from = %from, "Conversation restarted");
        }
        if result.new_state != from {
            tracing::debug!(
                session_id = %self.id,
                from = %from,
                to = %result.new_state,
                flow = ?result.new_state.flow(),
                "State transition"
            );
        }

        self.state = result.new_state;
        self.slots = result.slots;
        self.transcript.extend(
            result
                .replies
                .into_iter()
                .map(|reply| Message::assistant(reply.text, reply.suggestions)),
        );
    }
}
