//! Deck container: a bounded, ordered collection of owned cards.
//!
//! ## Key Types
//!
//! - `Deck`: capacity-checked add/draw/shuffle over `Card` values
//!
//! Saving and loading go through `codec::Codec`.

pub mod container;

pub use container::Deck;
