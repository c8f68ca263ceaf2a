//! Crate configuration.
//!
//! `DeckConfig` carries the defaults a front end needs to create decks and
//! find save files. It is plain serde data, so it can be loaded from JSON.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default number of card slots in a new deck.
pub const DEFAULT_CAPACITY: usize = 52;

/// Default deck name.
pub const DEFAULT_DECK_NAME: &str = "Standard Deck";

/// Default deck owner.
pub const DEFAULT_OWNER: &str = "Player";

/// Default directory for save files.
pub const DEFAULT_SAVE_DIR: &str = "./saves/";

/// Upper bound on any length-prefixed string in a deck file.
pub const DEFAULT_MAX_STRING_LEN: usize = 1000;

/// Configuration for decks and their persistence.
///
/// ```
/// use rust_deck::core::DeckConfig;
///
/// let config = DeckConfig::default()
///     .with_capacity(10)
///     .with_seed(7);
///
/// assert_eq!(config.capacity, 10);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Capacity of newly created decks.
    pub capacity: usize,

    /// Name given to newly created decks.
    pub deck_name: String,

    /// Owner given to newly created decks.
    pub owner: String,

    /// Directory the catalog reads and writes.
    pub save_dir: PathBuf,

    /// Fixed shuffle seed. `None` seeds from the system clock.
    pub seed: Option<u64>,

    /// Largest accepted length prefix when decoding.
    pub max_string_len: usize,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            deck_name: DEFAULT_DECK_NAME.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            seed: None,
            max_string_len: DEFAULT_MAX_STRING_LEN,
        }
    }
}

impl DeckConfig {
    /// Set the default capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the default deck name.
    #[must_use]
    pub fn with_deck_name(mut self, name: impl Into<String>) -> Self {
        self.deck_name = name.into();
        self
    }

    /// Set the default owner.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Set the save directory.
    #[must_use]
    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = dir.into();
        self
    }

    /// Fix the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the decode bound on string lengths.
    #[must_use]
    pub fn with_max_string_len(mut self, len: usize) -> Self {
        self.max_string_len = len;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeckConfig::default();
        assert_eq!(config.capacity, 52);
        assert_eq!(config.deck_name, "Standard Deck");
        assert_eq!(config.owner, "Player");
        assert_eq!(config.save_dir, PathBuf::from("./saves/"));
        assert_eq!(config.seed, None);
        assert_eq!(config.max_string_len, 1000);
    }

    #[test]
    fn test_builder() {
        let config = DeckConfig::default()
            .with_deck_name("Collectors")
            .with_owner("Ada")
            .with_save_dir("/tmp/decks")
            .with_max_string_len(64);

        assert_eq!(config.deck_name, "Collectors");
        assert_eq!(config.owner, "Ada");
        assert_eq!(config.save_dir, PathBuf::from("/tmp/decks"));
        assert_eq!(config.max_string_len, 64);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: DeckConfig = serde_json::from_str(r#"{"capacity": 5, "seed": 9}"#).unwrap();
        assert_eq!(config.capacity, 5);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.owner, "Player");
    }

    #[test]
    fn test_config_serialization() {
        let config = DeckConfig::default().with_seed(3);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: DeckConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
