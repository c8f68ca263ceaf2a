//! Card model: the three card variants and their shared contract.
//!
//! ## Key Types
//!
//! - `PlayingCard`: suit, face flag, condition, manufacturer
//! - `GameCard`: a playing card plus rarity, foil, edition, serial
//! - `SpecialCard<E>`: effect, durability, card type, power level
//! - `Card<E>`: sum type over the variants, as held by a deck
//!
//! Every constructor and setter validates and returns a `Result`; a failed
//! setter leaves the card unchanged.

pub mod base;
pub mod card;
pub mod effect;
pub mod game;
pub mod playing;
pub mod special;
pub mod suit;

pub use base::CardBase;
pub use card::{Card, CardKind};
pub use effect::CardEffect;
pub use game::GameCard;
pub use playing::PlayingCard;
pub use special::SpecialCard;
pub use suit::Suit;
