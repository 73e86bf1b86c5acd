//! Adventra travel assistant
//!
//! A scripted conversation engine that walks a traveller through building
//! an itinerary, looking up flights, or picking a destination. Input is
//! matched by keyword against a small vocabulary; replies come from canned
//! templates over a static catalog.

pub mod catalog;
pub mod config;
pub mod message;
pub mod selection;
pub mod session;
pub mod state_machine;

pub use catalog::{Catalog, CatalogError, Destination, Flight, FlightList};
pub use config::AssistantConfig;
pub use message::{Message, Origin, Segment, Suggestion};
pub use session::ConversationSession;
pub use state_machine::{ConversationState, Event, Recommendation, Slots};
