//! Deck file layout constants.
//!
//! All integers are little-endian. Strings are an `i32` byte length followed
//! by raw UTF-8 bytes with no terminator.
//!
//! Tagged layout (current):
//!
//! ```text
//! u8  version            (FORMAT_VERSION)
//! str deck name
//! str owner
//! i32 capacity
//! i32 card count
//! per card:
//!     str name
//!     i32 base value
//!     u8  variant tag    (CardKind::tag)
//!     Playing: str suit, u8 face, i32 condition, str manufacturer
//!     Game:    Playing fields, i32 rarity, u8 foiled, str edition, i32 serial
//!     Special: bytes effect, i32 durability, str card type, f64 power level
//! ```
//!
//! The legacy layout has no version byte and stores only name and value
//! per card.

use serde::Serialize;

/// Version byte written at the start of every tagged deck file.
pub const FORMAT_VERSION: u8 = 2;

/// File extension recognized by the catalog (compared case-insensitively).
pub const DECK_FILE_EXTENSION: &str = "dat";

/// Deck-level fields stored ahead of the card records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeckHeader {
    /// Deck name.
    pub name: String,
    /// Deck owner.
    pub owner: String,
    /// Stored capacity.
    pub capacity: usize,
    /// Number of card records that follow.
    pub card_count: usize,
}
