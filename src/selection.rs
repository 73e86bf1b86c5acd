//! Randomized hotel and activity picks
//!
//! Every pick takes the random source as an argument, so callers decide
//! between entropy and a seeded generator.

use crate::catalog::Destination;
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of activities shown in an itinerary summary
pub const ACTIVITIES_PER_ITINERARY: usize = 2;

/// Hotel and activities drawn for one itinerary summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryPicks {
    pub hotel: Option<String>,
    pub activities: Vec<String>,
}

/// Uniform pick over the hotel list; `None` only for an empty list
pub fn pick_hotel<R: Rng + ?Sized>(rng: &mut R, hotels: &[String]) -> Option<String> {
    hotels.choose(rng).cloned()
}

/// Up to `count` distinct activities, by shuffle-and-take.
///
/// Lists shorter than `count` come back whole, in shuffled order.
pub fn pick_activities<R: Rng + ?Sized>(
    rng: &mut R,
    activities: &[String],
    count: usize,
) -> Vec<String> {
    let mut shuffled = activities.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}

pub fn pick_itinerary<R: Rng + ?Sized>(rng: &mut R, destination: &Destination) -> ItineraryPicks {
    ItineraryPicks {
        hotel: pick_hotel(rng, &destination.hotels),
        activities: pick_activities(rng, &destination.activities, ACTIVITIES_PER_ITINERARY),
    }
}
