//! Static destination and flight catalogs
//!
//! The catalog is reference data: the dialogue looks entries up by key and
//! never mutates them. Key order matters, since destination matching walks
//! the keys in order and the first substring hit wins.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// A destination the assistant can plan for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Lower-case lookup key, matched as a substring of normalized input
    pub key: String,
    /// Display name
    pub name: String,
    pub hotels: Vec<String>,
    pub activities: Vec<String>,
}

/// A scheduled flight to a destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub flight_number: String,
    pub airline: String,
    pub departure: String,
    pub arrival: String,
    pub price: String,
}

/// Flights for one destination key, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightList {
    pub key: String,
    pub flights: Vec<Flight>,
}

/// Catalog loading and validation errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Catalog has no destinations")]
    Empty,
    #[error("Destination key {0:?} must be lower-case and non-empty")]
    InvalidKey(String),
    #[error("Duplicate destination key {0:?}")]
    DuplicateKey(String),
    #[error("Destination {0:?} has no hotels")]
    NoHotels(String),
    #[error("Flights listed for unknown destination {0:?}")]
    UnknownFlightDestination(String),
}

/// Ordered destination and flight tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    destinations: Vec<Destination>,
    #[serde(default)]
    flights: Vec<FlightList>,
}

impl Catalog {
    /// Build a catalog, rejecting tables the dialogue could not serve
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is empty, a key is blank, not
    /// lower-case or repeated, a destination has no hotels, or a flight
    /// list names an unknown destination.
    pub fn new(
        destinations: Vec<Destination>,
        flights: Vec<FlightList>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            destinations,
            flights,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a JSON catalog
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` on malformed input, or any of the
    /// validation errors of [`Catalog::new`].
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read a JSON catalog from disk
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, otherwise as
    /// [`Catalog::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.destinations.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen: Vec<&str> = Vec::with_capacity(self.destinations.len());
        for dest in &self.destinations {
            if dest.key.trim().is_empty() || dest.key != dest.key.to_lowercase() {
                return Err(CatalogError::InvalidKey(dest.key.clone()));
            }
            if seen.contains(&dest.key.as_str()) {
                return Err(CatalogError::DuplicateKey(dest.key.clone()));
            }
            if dest.hotels.is_empty() {
                return Err(CatalogError::NoHotels(dest.key.clone()));
            }
            seen.push(&dest.key);
        }

        if let Some(list) = self.flights.iter().find(|l| !seen.contains(&l.key.as_str())) {
            return Err(CatalogError::UnknownFlightDestination(list.key.clone()));
        }

        Ok(())
    }

    /// Destinations in catalog order
    #[must_use]
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    #[must_use]
    pub fn destination(&self, key: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.key == key)
    }

    /// Flights for a destination key; empty when none are listed
    #[must_use]
    pub fn flights(&self, key: &str) -> &[Flight] {
        self.flights
            .iter()
            .find(|l| l.key == key)
            .map_or(&[], |l| l.flights.as_slice())
    }

    /// First destination whose key occurs in the normalized input.
    ///
    /// This is substring containment, not exact match: "i want tokyo please"
    /// resolves to `tokyo`.
    #[must_use]
    pub fn match_destination(&self, normalized: &str) -> Option<&Destination> {
        self.destinations
            .iter()
            .find(|d| normalized.contains(d.key.as_str()))
    }

    /// Built-in catalog with the four featured destinations
    #[must_use]
    pub fn seed() -> Self {
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| (*s).to_string()).collect()
        }

        fn flight(number: &str, airline: &str, dep: &str, arr: &str, price: &str) -> Flight {
            Flight {
                flight_number: number.to_string(),
                airline: airline.to_string(),
                departure: dep.to_string(),
                arrival: arr.to_string(),
                price: price.to_string(),
            }
        }

        let destinations = vec![
            Destination {
                key: "paris".to_string(),
                name: "Paris".to_string(),
                hotels: strings(&[
                    "Hotel Le Bristol Paris",
                    "Shangri-La Hotel Paris",
                    "Hotel Plaza Athénée",
                ]),
                activities: strings(&[
                    "Visit the Eiffel Tower",
                    "Explore the Louvre Museum",
                    "Stroll through Montmartre",
                    "Walk along the Seine River",
                ]),
            },
            Destination {
                key: "tokyo".to_string(),
                name: "Tokyo".to_string(),
                hotels: strings(&["The Ritz-Carlton Tokyo", "Park Hyatt Tokyo", "Aman Tokyo"]),
                activities: strings(&[
                    "Visit Shibuya Crossing",
                    "Explore Senso-ji Temple",
                    "Walk around Akihabara",
                    "Eat sushi at Tsukiji Market",
                ]),
            },
            Destination {
                key: "new york".to_string(),
                name: "New York".to_string(),
                hotels: strings(&[
                    "The Plaza Hotel",
                    "The St. Regis New York",
                    "Park Hyatt New York",
                ]),
                activities: strings(&[
                    "See a Broadway show",
                    "Visit Central Park",
                    "Explore Times Square",
                    "Walk the High Line",
                ]),
            },
            Destination {
                key: "santorini".to_string(),
                name: "Santorini".to_string(),
                hotels: strings(&["Canaves Oia Hotel", "Grace Hotel Santorini", "Katikies Hotel"]),
                activities: strings(&[
                    "Watch the sunset in Oia",
                    "Visit ancient Akrotiri",
                    "Relax on black sand beaches",
                    "Take a boat tour of the caldera",
                ]),
            },
        ];

        let flights = vec![
            FlightList {
                key: "paris".to_string(),
                flights: vec![
                    flight("AF100", "Air France", "10:00 AM", "11:30 PM", "$650"),
                    flight("DL456", "Delta", "2:15 PM", "3:45 AM+1", "$720"),
                ],
            },
            FlightList {
                key: "tokyo".to_string(),
                flights: vec![
                    flight("JAL101", "Japan Airlines", "1:00 PM", "3:30 PM+1", "$890"),
                    flight("ANA205", "ANA", "5:30 PM", "7:45 PM+1", "$850"),
                ],
            },
            FlightList {
                key: "new york".to_string(),
                flights: vec![
                    flight("AAL250", "American Airlines", "8:00 AM", "11:30 AM", "$320"),
                    flight("UAL432", "United", "12:00 PM", "3:30 PM", "$340"),
                ],
            },
            FlightList {
                key: "santorini".to_string(),
                flights: vec![
                    flight("A3500", "Aegean Airlines", "9:00 AM", "2:15 PM", "$580"),
                    flight("BA234", "British Airways", "11:30 AM", "4:45 PM", "$620"),
                ],
            },
        ];

        Self {
            destinations,
            flights,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_seed_order_and_validity() {
        let catalog = Catalog::seed();
        let keys: Vec<_> = catalog.destinations().iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["paris", "tokyo", "new york", "santorini"]);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_match_destination_substring() {
        let catalog = Catalog::seed();
        let hit = catalog.match_destination("i want to go to tokyo please").unwrap();
        assert_eq!(hit.name, "Tokyo");
        assert_eq!(
            catalog.match_destination("new york city").unwrap().key,
            "new york"
        );
        assert!(catalog.match_destination("london").is_none());
    }

    #[test]
    fn test_match_destination_first_key_wins() {
        let catalog = Catalog::seed();
        // Both keys appear; catalog order decides
        let hit = catalog.match_destination("santorini or paris").unwrap();
        assert_eq!(hit.key, "paris");
    }

    #[test]
    fn test_flights_in_catalog_order() {
        let catalog = Catalog::seed();
        let numbers: Vec<_> = catalog
            .flights("paris")
            .iter()
            .map(|f| f.flight_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["AF100", "DL456"]);
        assert!(catalog.flights("atlantis").is_empty());
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "destinations": [
                {"key": "lisbon", "name": "Lisbon", "hotels": ["Hotel A"], "activities": ["Ride tram 28"]}
            ],
            "flights": [
                {"key": "lisbon", "flights": [
                    {"flightNumber": "TP1", "airline": "TAP", "departure": "9:00 AM", "arrival": "1:00 PM", "price": "$300"}
                ]}
            ]
        }"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.destination("lisbon").unwrap().activities.len(), 1);
        assert_eq!(catalog.flights("lisbon")[0].airline, "TAP");
    }

    #[test]
    fn test_validation_rejects_bad_tables() {
        assert!(matches!(
            Catalog::new(vec![], vec![]),
            Err(CatalogError::Empty)
        ));

        let dest = |key: &str, hotels: Vec<String>| Destination {
            key: key.to_string(),
            name: key.to_string(),
            hotels,
            activities: vec![],
        };

        assert!(matches!(
            Catalog::new(vec![dest("Rome", vec!["H".into()])], vec![]),
            Err(CatalogError::InvalidKey(_))
        ));
        assert!(matches!(
            Catalog::new(vec![dest("rome", vec![])], vec![]),
            Err(CatalogError::NoHotels(_))
        ));
        assert!(matches!(
            Catalog::new(
                vec![dest("rome", vec!["H".into()]), dest("rome", vec!["H".into()])],
                vec![]
            ),
            Err(CatalogError::DuplicateKey(_))
        ));
        assert!(matches!(
            Catalog::new(
                vec![dest("rome", vec!["H".into()])],
                vec![FlightList {
                    key: "oslo".to_string(),
                    flights: vec![]
                }]
            ),
            Err(CatalogError::UnknownFlightDestination(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&Catalog::seed()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = Catalog::from_path(file.path()).unwrap();
        assert_eq!(loaded, Catalog::seed());
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Catalog::from_path(dir.path().join("nope.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
