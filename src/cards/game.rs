//! Collectible game cards.
//!
//! A game card is a playing card with collector attributes. Its value
//! multiplies the playing-card value by rarity, and triples it when foiled.

use std::fmt;

use serde::Serialize;

use super::base::{require_at_least, require_non_empty, require_range};
use super::playing::PlayingCard;
use crate::error::Result;

/// Rarity given to new cards.
pub const DEFAULT_RARITY: u8 = 1;

/// Edition given to new cards.
pub const DEFAULT_EDITION: &str = "Standard";

/// Multiplier applied to foiled cards.
pub const FOIL_MULTIPLIER: u64 = 3;

/// A playing card refined with rarity, foil, edition and serial number.
///
/// ```
/// use rust_deck::cards::{GameCard, PlayingCard};
///
/// let playing = PlayingCard::new("Dragon", 100)?.with_condition(5)?;
/// let card = GameCard::new(playing)
///     .with_rarity(4)?
///     .with_foiled(true);
///
/// assert_eq!(card.value(), 600);
/// # Ok::<(), rust_deck::DeckError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GameCard {
    #[serde(flatten)]
    playing: PlayingCard,
    rarity: u8,
    foiled: bool,
    edition: String,
    serial_number: u32,
}

impl GameCard {
    /// Wrap a playing card with common rarity, no foil, standard edition.
    #[must_use]
    pub fn new(playing: PlayingCard) -> Self {
        Self {
            playing,
            rarity: DEFAULT_RARITY,
            foiled: false,
            edition: DEFAULT_EDITION.to_string(),
            serial_number: 0,
        }
    }

    /// Set the rarity (builder pattern).
    pub fn with_rarity(mut self, rarity: i32) -> Result<Self> {
        self.set_rarity(rarity)?;
        Ok(self)
    }

    /// Set the foil flag (builder pattern).
    #[must_use]
    pub fn with_foiled(mut self, foiled: bool) -> Self {
        self.foiled = foiled;
        self
    }

    /// Set the edition (builder pattern).
    pub fn with_edition(mut self, edition: impl Into<String>) -> Result<Self> {
        self.set_edition(edition)?;
        Ok(self)
    }

    /// Set the serial number (builder pattern).
    pub fn with_serial_number(mut self, serial: i32) -> Result<Self> {
        self.set_serial_number(serial)?;
        Ok(self)
    }

    /// The underlying playing card.
    #[must_use]
    pub fn playing(&self) -> &PlayingCard {
        &self.playing
    }

    /// Mutable access to the playing-card fields. Their setters validate.
    pub fn playing_mut(&mut self) -> &mut PlayingCard {
        &mut self.playing
    }

    /// Card name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.playing.name()
    }

    /// Rarity on a 1-10 scale.
    #[must_use]
    pub fn rarity(&self) -> u8 {
        self.rarity
    }

    /// Set the rarity. Must be in `1..=10`.
    pub fn set_rarity(&mut self, rarity: i32) -> Result<()> {
        self.rarity = require_range("rarity", rarity, 1, 10)? as u8;
        Ok(())
    }

    /// Has foil treatment?
    #[must_use]
    pub fn is_foiled(&self) -> bool {
        self.foiled
    }

    /// Set the foil flag.
    pub fn set_foiled(&mut self, foiled: bool) {
        self.foiled = foiled;
    }

    /// Edition or set name.
    #[must_use]
    pub fn edition(&self) -> &str {
        &self.edition
    }

    /// Set the edition. Empty names are rejected.
    pub fn set_edition(&mut self, edition: impl Into<String>) -> Result<()> {
        let edition = edition.into();
        require_non_empty("edition", &edition)?;
        self.edition = edition;
        Ok(())
    }

    /// Serial number.
    #[must_use]
    pub fn serial_number(&self) -> u32 {
        self.serial_number
    }

    /// Set the serial number. Negative numbers are rejected.
    pub fn set_serial_number(&mut self, serial: i32) -> Result<()> {
        self.serial_number = require_at_least("serial number", serial, 0)?;
        Ok(())
    }

    /// Playing-card value times rarity, tripled when foiled.
    #[must_use]
    pub fn value(&self) -> u64 {
        let foil = if self.foiled { FOIL_MULTIPLIER } else { 1 };
        self.playing.value() * u64::from(self.rarity) * foil
    }

    /// Multi-line description.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = self.playing.title();
        if self.playing.is_face_card() {
            out.push_str(" (Face Card)");
        }
        out.push_str(&format!("\nRarity: {}/10", self.rarity));
        if self.foiled {
            out.push_str(" (FOILED)");
        }
        out.push_str(&format!("\nEdition: {}", self.edition));
        out.push_str(&format!("\nSerial Number: {}", self.serial_number));
        out.push_str(&format!("\nCondition: {}/10", self.playing.condition()));
        out.push_str(&format!("\nManufacturer: {}", self.playing.manufacturer()));
        out.push_str(&format!("\nValue: {}", self.value()));
        out
    }
}

impl fmt::Display for GameCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Rarity: {}, Edition: {}, Serial: {}",
            self.playing.title(),
            self.rarity,
            self.edition,
            self.serial_number
        )?;
        if self.foiled {
            f.write_str(", FOILED")?;
        }
        write!(f, ", Value: {})", self.value())
    }
}
