//! Special cards with a game-defined effect.
//!
//! Value is `floor(base_value * durability * power_level)`.

use std::fmt;

use serde::Serialize;

use super::base::{require_at_least, require_non_empty, CardBase};
use super::effect::CardEffect;
use crate::error::{DeckError, Result};

/// Durability given to new cards.
pub const DEFAULT_DURABILITY: u32 = 1;

/// Card type given to new cards.
pub const DEFAULT_CARD_TYPE: &str = "Magic";

/// Power level given to new cards.
pub const DEFAULT_POWER_LEVEL: f64 = 1.0;

/// Lowest accepted power level.
pub const MIN_POWER_LEVEL: f64 = 0.1;

/// Highest accepted power level.
pub const MAX_POWER_LEVEL: f64 = 10.0;

/// A card whose value comes from an effect's durability and power.
///
/// ```
/// use rust_deck::cards::SpecialCard;
///
/// let bolt = SpecialCard::new("Bolt", 10, "Deal 3 damage".to_string())?
///     .with_durability(3)?
///     .with_power_level(2.5)?;
///
/// assert_eq!(bolt.value(), 75);
/// # Ok::<(), rust_deck::DeckError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpecialCard<E> {
    #[serde(flatten)]
    base: CardBase,
    special_effect: E,
    durability: u32,
    card_type: String,
    power_level: f64,
}

impl<E: CardEffect> SpecialCard<E> {
    /// Create a "Magic" card with durability 1 and power level 1.0.
    pub fn new(name: impl Into<String>, base_value: i32, effect: E) -> Result<Self> {
        Ok(Self {
            base: CardBase::new(name, base_value)?,
            special_effect: effect,
            durability: DEFAULT_DURABILITY,
            card_type: DEFAULT_CARD_TYPE.to_string(),
            power_level: DEFAULT_POWER_LEVEL,
        })
    }

    /// Set the durability (builder pattern).
    pub fn with_durability(mut self, durability: i32) -> Result<Self> {
        self.set_durability(durability)?;
        Ok(self)
    }

    /// Set the card type (builder pattern).
    pub fn with_card_type(mut self, card_type: impl Into<String>) -> Result<Self> {
        self.set_card_type(card_type)?;
        Ok(self)
    }

    /// Set the power level (builder pattern).
    pub fn with_power_level(mut self, power_level: f64) -> Result<Self> {
        self.set_power_level(power_level)?;
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

    /// The effect payload.
    #[must_use]
    pub fn special_effect(&self) -> &E {
        &self.special_effect
    }

    /// Replace the effect.
    pub fn set_special_effect(&mut self, effect: E) {
        self.special_effect = effect;
    }

    /// Number of uses.
    #[must_use]
    pub fn durability(&self) -> u32 {
        self.durability
    }

    /// Set the durability. Must be at least 1.
    pub fn set_durability(&mut self, durability: i32) -> Result<()> {
        self.durability = require_at_least("durability", durability, 1)?;
        Ok(())
    }

    /// Free-form type label ("Magic", "Trap", ...).
    #[must_use]
    pub fn card_type(&self) -> &str {
        &self.card_type
    }

    /// Set the card type. Empty labels are rejected.
    pub fn set_card_type(&mut self, card_type: impl Into<String>) -> Result<()> {
        let card_type = card_type.into();
        require_non_empty("card type", &card_type)?;
        self.card_type = card_type;
        Ok(())
    }

    /// Effect strength in `0.1..=10.0`.
    #[must_use]
    pub fn power_level(&self) -> f64 {
        self.power_level
    }

    /// Set the power level. Must be in `0.1..=10.0`.
    pub fn set_power_level(&mut self, power_level: f64) -> Result<()> {
        if !(MIN_POWER_LEVEL..=MAX_POWER_LEVEL).contains(&power_level) {
            return Err(DeckError::validation(
                "power level",
                format!("must be between {MIN_POWER_LEVEL} and {MAX_POWER_LEVEL}, got {power_level}"),
            ));
        }
        self.power_level = power_level;
        Ok(())
    }

    /// Base value scaled by durability and power level, rounded down.
    ///
    /// Saturates at `u64::MAX` when the product does not fit.
    #[must_use]
    pub fn value(&self) -> u64 {
        let raw = f64::from(self.base.base_value()) * f64::from(self.durability) * self.power_level;
        // float-to-int `as` saturates
        raw.floor() as u64
    }

    /// Multi-line description.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{} ({} Card)\nSpecial Effect: {}\nDurability: {}, Power Level: {}\nValue: {}",
            self.name(),
            self.card_type,
            self.special_effect,
            self.durability,
            self.power_level,
            self.value()
        )
    }
}

impl<E: CardEffect> fmt::Display for SpecialCard<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Special Card: {} (Type: {}, Effect: {}, Durability: {}, Power: {})",
            self.name(),
            self.card_type,
            self.special_effect,
            self.durability,
            self.power_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bolt() -> SpecialCard<String> {
        SpecialCard::new("Bolt", 10, "Deal 3 damage".to_string()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let card = bolt();
        assert_eq!(card.durability(), 1);
        assert_eq!(card.card_type(), "Magic");
        assert_eq!(card.power_level(), 1.0);
        assert_eq!(card.value(), 10);
    }

    #[test]
    fn test_value_formula() {
        let card = bolt()
            .with_durability(3)
            .unwrap()
            .with_power_level(2.5)
            .unwrap();
        assert_eq!(card.value(), 75);

        let card = SpecialCard::new("Spark", 7, 1i32)
            .unwrap()
            .with_power_level(0.5)
            .unwrap();
        assert_eq!(card.value(), 3); // floor(3.5)
    }

    #[test]
    fn test_power_level_bounds() {
        let mut card = bolt();
        assert!(card.set_power_level(0.1).is_ok());
        assert!(card.set_power_level(10.0).is_ok());

        assert_eq!(card.set_power_level(0.05).unwrap_err().field(), Some("power level"));
        assert!(card.set_power_level(10.01).is_err());
        assert!(card.set_power_level(f64::NAN).is_err());
        assert_eq!(card.power_level(), 10.0);
    }

    #[test]
    fn test_invalid_fields_rejected() {
        let mut card = bolt();
        assert_eq!(card.set_durability(0).unwrap_err().field(), Some("durability"));
        assert_eq!(card.set_card_type("").unwrap_err().field(), Some("card type"));
        assert_eq!(card.durability(), 1);
        assert_eq!(card.card_type(), "Magic");
    }

    #[test]
    fn test_render() {
        let card = bolt().with_card_type("Spell").unwrap();
        assert_eq!(
            card.render(),
            "Bolt (Spell Card)\nSpecial Effect: Deal 3 damage\nDurability: 1, Power Level: 1\nValue: 10"
        );
        assert_eq!(
            card.to_string(),
            "Special Card: Bolt (Type: Spell, Effect: Deal 3 damage, Durability: 1, Power: 1)"
        );
    }

    #[test]
    fn test_effect_mutation() {
        let mut card = SpecialCard::new("Counter", 4, 2i32).unwrap();
        card.set_special_effect(5);
        assert_eq!(*card.special_effect(), 5);
    }

    #[test]
    fn test_value_saturates_at_max() {
        let card = SpecialCard::new("Titan", i32::MAX, "Crush".to_string())
            .unwrap()
            .with_durability(i32::MAX)
            .unwrap()
            .with_power_level(10.0)
            .unwrap();
        assert_eq!(card.value(), u64::MAX);
    }
}
