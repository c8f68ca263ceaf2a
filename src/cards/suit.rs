//! The four French suits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeckError;

/// A playing-card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts
    Hearts,
    /// Diamonds
    Diamonds,
    /// Clubs
    Clubs,
    /// Spades
    Spades,
}

impl Suit {
    /// All suits in conventional order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Display name, also used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }

    /// Parse an optional suit: the empty string means no suit.
    pub fn parse_optional(s: &str) -> Result<Option<Suit>, DeckError> {
        if s.is_empty() {
            Ok(None)
        } else {
            s.parse().map(Some)
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Suit {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Suit::ALL
            .into_iter()
            .find(|suit| suit.as_str() == s)
            .ok_or_else(|| {
                DeckError::validation(
                    "suit",
                    format!("must be Hearts, Diamonds, Clubs, or Spades, got {s:?}"),
                )
            })
    }
}
