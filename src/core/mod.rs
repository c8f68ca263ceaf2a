//! Core building blocks: configuration and shuffle RNG.

pub mod config;
pub mod rng;

pub use config::DeckConfig;
pub use rng::{fisher_yates, DeckRng, DeckRngState};
