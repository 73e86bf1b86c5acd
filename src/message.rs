//! Transcript messages and suggestion chips

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marker pair delimiting emphasized text
pub const BOLD_MARKER: &str = "**";

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    User,
    Assistant,
}

/// A quick reply. Choosing it feeds `value` back as the next input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub label: String,
    pub value: String,
}

impl Suggestion {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Immutable transcript entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub origin: Origin,
    pub text: String,
    pub suggestions: Vec<Suggestion>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            origin: Origin::User,
            text: text.into(),
            suggestions: vec![],
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>, suggestions: Vec<Suggestion>) -> Self {
        Self {
            origin: Origin::Assistant,
            text: text.into(),
            suggestions,
            created_at: Utc::now(),
        }
    }

    /// Text split into plain and emphasized runs
    #[must_use]
    pub fn segments(&self) -> Vec<Segment<'_>> {
        segments(&self.text)
    }
}

/// A run of message text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub emphasized: bool,
}

/// Split on [`BOLD_MARKER`]; odd-numbered pieces are emphasized.
///
/// An unpaired trailing marker emphasizes the rest of the text, which is
/// how the chat widget has always rendered it. Empty runs are dropped.
#[must_use]
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    text.split(BOLD_MARKER)
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| Segment {
            text: part,
            emphasized: i % 2 == 1,
        })
        .collect()
}
