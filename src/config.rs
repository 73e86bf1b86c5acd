//! Environment configuration

use crate::catalog::{Catalog, CatalogError};
use std::path::PathBuf;

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "adventra_assistant=info";

/// Configuration for the assistant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistantConfig {
    /// JSON catalog to load instead of the built-in one
    pub catalog_path: Option<PathBuf>,
    /// Fixed RNG seed for reproducible itineraries
    pub seed: Option<u64>,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl AssistantConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            catalog_path: lookup("ADVENTRA_CATALOG")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            seed: lookup("ADVENTRA_SEED").and_then(|s| s.trim().parse().ok()),
            log_json: lookup("ADVENTRA_LOG_JSON")
                .is_some_and(|v| matches!(v.trim(), "1" | "true" | "yes")),
        }
    }

    /// The configured catalog, or the built-in one
    ///
    /// # Errors
    ///
    /// Returns an error if a catalog path is set and the file cannot be
    /// read or does not hold a valid catalog.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading catalog");
                Catalog::from_path(path)
            }
            None => Ok(Catalog::seed()),
        }
    }
}
