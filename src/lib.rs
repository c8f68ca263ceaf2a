//! # rust-deck
//!
//! A bounded card collection with typed card variants and a tagged binary
//! save format.
//!
//! ## Design Principles
//!
//! 1. **Closed variants**: Cards are a sum type (`Card`) over playing, game
//!    and special cards. Value and display dispatch over the variant.
//!
//! 2. **Validated state**: Every constructor and setter returns a `Result`.
//!    A failed setter leaves the card or deck unchanged.
//!
//! 3. **Lossless persistence**: Each saved card carries a variant tag, so a
//!    mixed deck reloads with every variant-specific field intact.
//!
//! 4. **Reproducible shuffles**: Shuffling takes an injectable RNG; the
//!    clock-seeded generator is only the default.
//!
//! ## Modules
//!
//! - `core`: Configuration and shuffle RNG
//! - `error`: Error taxonomy
//! - `cards`: Card variants and their value formulas
//! - `deck`: Bounded deck container
//! - `codec`: Binary deck format
//! - `catalog`: Save-directory listing and file management

pub mod core;
pub mod error;
pub mod cards;
pub mod deck;
pub mod codec;
pub mod catalog;

// Re-export commonly used types
pub use crate::core::{DeckConfig, DeckRng, DeckRngState};

pub use crate::error::{DeckError, Result};

pub use crate::cards::{
    Card, CardBase, CardEffect, CardKind, GameCard, PlayingCard, SpecialCard, Suit,
};

pub use crate::deck::Deck;

pub use crate::codec::{Codec, DeckDecoder, DeckEncoder, DeckHeader};

pub use crate::catalog::{Catalog, CatalogEntry};
