//! Standard playing cards.
//!
//! A playing card's value is discounted by its physical condition:
//! `floor(base_value * condition / 10)`.

use std::fmt;

use serde::Serialize;

use super::base::{require_non_empty, require_range, CardBase};
use super::suit::Suit;
use crate::error::Result;

/// Condition given to new cards (mint).
pub const DEFAULT_CONDITION: u8 = 10;

/// Manufacturer given to new cards.
pub const DEFAULT_MANUFACTURER: &str = "Standard";

/// A playing card with suit, face flag, condition and manufacturer.
///
/// ## Example
///
/// ```
/// use rust_deck::cards::{PlayingCard, Suit};
///
/// let ace = PlayingCard::new("Ace", 100)?
///     .with_suit(Some(Suit::Spades))
///     .with_condition(5)?;
///
/// assert_eq!(ace.value(), 50);
/// # Ok::<(), rust_deck::DeckError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PlayingCard {
    #[serde(flatten)]
    base: CardBase,
    suit: Option<Suit>,
    face_card: bool,
    condition: u8,
    manufacturer: String,
}

impl PlayingCard {
    /// Create a card with no suit, not a face card, mint condition.
    pub fn new(name: impl Into<String>, base_value: i32) -> Result<Self> {
        Ok(Self {
            base: CardBase::new(name, base_value)?,
            suit: None,
            face_card: false,
            condition: DEFAULT_CONDITION,
            manufacturer: DEFAULT_MANUFACTURER.to_string(),
        })
    }

    /// Set the suit (builder pattern).
    #[must_use]
    pub fn with_suit(mut self, suit: Option<Suit>) -> Self {
        self.suit = suit;
        self
    }

    /// Mark as a face card (builder pattern).
    #[must_use]
    pub fn with_face_card(mut self, face_card: bool) -> Self {
        self.face_card = face_card;
        self
    }

    /// Set the condition (builder pattern).
    pub fn with_condition(mut self, condition: i32) -> Result<Self> {
        self.set_condition(condition)?;
        Ok(self)
    }

    /// Set the manufacturer (builder pattern).
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Result<Self> {
        self.set_manufacturer(manufacturer)?;
        Ok(self)
    }

    /// Shared name/value fields.
    #[must_use]
    pub fn base(&self) -> &CardBase {
        &self.base
    }

    /// Mutable access to the shared fields. Their setters validate.
    pub fn base_mut(&mut self) -> &mut CardBase {
        &mut self.base
    }

    /// Card name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.base.name()
    }

    /// Suit, if any.
    #[must_use]
    pub fn suit(&self) -> Option<Suit> {
        self.suit
    }

    /// Set or clear the suit.
    pub fn set_suit(&mut self, suit: Option<Suit>) {
        self.suit = suit;
    }

    /// Set the suit from its name. The empty string clears it.
    pub fn set_suit_str(&mut self, suit: &str) -> Result<()> {
        self.suit = Suit::parse_optional(suit)?;
        Ok(())
    }

    /// Is this a face card?
    #[must_use]
    pub fn is_face_card(&self) -> bool {
        self.face_card
    }

    /// Set the face-card flag.
    pub fn set_face_card(&mut self, face_card: bool) {
        self.face_card = face_card;
    }

    /// Condition on a 1-10 scale.
    #[must_use]
    pub fn condition(&self) -> u8 {
        self.condition
    }

    /// Set the condition. Must be in `1..=10`.
    pub fn set_condition(&mut self, condition: i32) -> Result<()> {
        self.condition = require_range("condition", condition, 1, 10)? as u8;
        Ok(())
    }

    /// Manufacturer or brand.
    #[must_use]
    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    /// Set the manufacturer. Empty names are rejected.
    pub fn set_manufacturer(&mut self, manufacturer: impl Into<String>) -> Result<()> {
        let manufacturer = manufacturer.into();
        require_non_empty("manufacturer", &manufacturer)?;
        self.manufacturer = manufacturer;
        Ok(())
    }

    /// Value after the condition discount.
    #[must_use]
    pub fn value(&self) -> u64 {
        u64::from(self.base.base_value()) * u64::from(self.condition) / 10
    }

    /// "Name of Suit", or just the name when there is no suit.
    pub(crate) fn title(&self) -> String {
        match self.suit {
            Some(suit) => format!("{} of {}", self.name(), suit),
            None => self.name().to_string(),
        }
    }

    /// Multi-line description.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = self.title();
        if self.face_card {
            out.push_str(" (Face Card)");
        }
        out.push_str(&format!("\nCondition: {}/10", self.condition));
        out.push_str(&format!("\nManufacturer: {}", self.manufacturer));
        out.push_str(&format!("\nValue: {}", self.value()));
        out
    }
}

impl fmt::Display for PlayingCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Value: {}, Condition: {}, {})",
            self.title(),
            self.value(),
            self.condition,
            self.manufacturer
        )
    }
}
