//! Dialogue state machine
//!
//! Pure transitions over an explicit state tag and slot store, in the
//! Elm style: the caller owns the state, feeds events in, and adopts
//! whatever comes back.

pub mod event;
pub mod recommendation;
mod reply;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use event::Event;
pub use recommendation::{Preference, Recommendation, Weather};
pub use reply::{top_level_suggestions, Reply};
pub use state::{ConversationState, Flow, SlotName, Slots};
pub use transition::{transition, TransitionError, TransitionResult};
