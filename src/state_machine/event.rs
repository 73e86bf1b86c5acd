//! Events that drive the dialogue

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The conversation opened with an empty transcript
    Greet,
    /// A committed input string, typed or taken from a suggestion value
    UserInput { text: String },
}

impl Event {
    #[must_use]
    pub fn user_input(text: impl Into<String>) -> Self {
        Event::UserInput { text: text.into() }
    }
}
