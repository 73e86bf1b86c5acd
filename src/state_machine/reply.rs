//! Assistant replies produced by transitions

use crate::catalog::Catalog;
use crate::message::Suggestion;

/// One assistant message, before it is stamped into the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub suggestions: Vec<Suggestion>,
}

/// The three top-level menu entries
#[must_use]
pub fn top_level_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion::new("Build me an itinerary", "itinerary"),
        Suggestion::new("Help me find a flight", "flight"),
        Suggestion::new("Help me pick a destination", "destination"),
    ]
}

impl Reply {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            suggestions: vec![],
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, label: &str, value: &str) -> Self {
        self.suggestions.push(Suggestion::new(label, value));
        self
    }

    #[must_use]
    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = Suggestion>) -> Self {
        self.suggestions.extend(suggestions);
        self
    }

    /// Text followed by the top-level menu
    #[must_use]
    pub fn top_level(text: impl Into<String>) -> Self {
        Self::new(text).with_suggestions(top_level_suggestions())
    }

    /// Text followed by one suggestion per catalog destination, in catalog order
    #[must_use]
    pub fn pick_destination(text: impl Into<String>, catalog: &Catalog) -> Self {
        Self::new(text).with_suggestions(
            catalog
                .destinations()
                .iter()
                .map(|d| Suggestion::new(d.name.clone(), d.key.clone())),
        )
    }

    #[must_use]
    pub fn greeting() -> Self {
        Self::top_level("Hello! 👋 How can I help you today?")
    }

    #[must_use]
    pub fn fresh_start() -> Self {
        Self::top_level("Let's start fresh! How can I help you?")
    }
}
