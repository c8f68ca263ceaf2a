//! The closed set of card variants.
//!
//! `Card` is what a deck holds. Value and display dispatch over the variant,
//! so adding a variant is a compile error everywhere it needs handling.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::base::CardBase;
use super::effect::CardEffect;
use super::game::GameCard;
use super::playing::PlayingCard;
use super::special::SpecialCard;
use crate::error::Result;

/// Which variant a card is. The discriminant doubles as the wire tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// [`PlayingCard`]
    Playing = 1,
    /// [`GameCard`]
    Game = 2,
    /// [`SpecialCard`]
    Special = 3,
}

impl CardKind {
    /// Tag byte written before each card record.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Look up a variant by tag byte.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(CardKind::Playing),
            2 => Some(CardKind::Game),
            3 => Some(CardKind::Special),
            _ => None,
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardKind::Playing => "Playing Card",
            CardKind::Game => "Game Card",
            CardKind::Special => "Special Card",
        };
        f.write_str(name)
    }
}

/// A card of any variant.
///
/// `E` is the effect type carried by special cards.
///
/// ## Example
///
/// ```
/// use rust_deck::cards::{Card, PlayingCard, SpecialCard};
///
/// let cards: Vec<Card> = vec![
///     PlayingCard::new("Ace", 100)?.with_condition(5)?.into(),
///     SpecialCard::new("Bolt", 10, "Zap".to_string())?.with_durability(3)?.into(),
/// ];
///
/// let total: u64 = cards.iter().map(Card::value).sum();
/// assert_eq!(total, 80);
/// # Ok::<(), rust_deck::DeckError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Card<E = String> {
    /// A standard playing card.
    Playing(PlayingCard),
    /// A collectible game card.
    Game(GameCard),
    /// A special card with an effect.
    Special(SpecialCard<E>),
}

impl<E: CardEffect> Card<E> {
    /// Variant of this card.
    #[must_use]
    pub fn kind(&self) -> CardKind {
        match self {
            Card::Playing(_) => CardKind::Playing,
            Card::Game(_) => CardKind::Game,
            Card::Special(_) => CardKind::Special,
        }
    }

    fn base(&self) -> &CardBase {
        match self {
            Card::Playing(card) => card.base(),
            Card::Game(card) => card.playing().base(),
            Card::Special(card) => card.base(),
        }
    }

    fn base_mut(&mut self) -> &mut CardBase {
        match self {
            Card::Playing(card) => card.base_mut(),
            Card::Game(card) => card.playing_mut().base_mut(),
            Card::Special(card) => card.base_mut(),
        }
    }

    /// Card name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.base().name()
    }

    /// Base value before the variant formula.
    #[must_use]
    pub fn base_value(&self) -> u32 {
        self.base().base_value()
    }

    /// Rename the card. Empty names are rejected.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.base_mut().set_name(name)
    }

    /// Change the base value. Negative values are rejected.
    pub fn set_base_value(&mut self, value: i32) -> Result<()> {
        self.base_mut().set_base_value(value)
    }

    /// Derived value. Recomputed on every call.
    #[must_use]
    pub fn value(&self) -> u64 {
        match self {
            Card::Playing(card) => card.value(),
            Card::Game(card) => card.value(),
            Card::Special(card) => card.value(),
        }
    }

    /// Multi-line description.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Card::Playing(card) => card.render(),
            Card::Game(card) => card.render(),
            Card::Special(card) => card.render(),
        }
    }

    /// Borrow as a playing card. Game cards expose their playing fields too.
    #[must_use]
    pub fn as_playing(&self) -> Option<&PlayingCard> {
        match self {
            Card::Playing(card) => Some(card),
            Card::Game(card) => Some(card.playing()),
            Card::Special(_) => None,
        }
    }

    /// Borrow as a game card.
    #[must_use]
    pub fn as_game(&self) -> Option<&GameCard> {
        match self {
            Card::Game(card) => Some(card),
            _ => None,
        }
    }

    /// Borrow as a special card.
    #[must_use]
    pub fn as_special(&self) -> Option<&SpecialCard<E>> {
        match self {
            Card::Special(card) => Some(card),
            _ => None,
        }
    }
}

impl<E: CardEffect> fmt::Display for Card<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Playing(card) => fmt::Display::fmt(card, f),
            Card::Game(card) => fmt::Display::fmt(card, f),
            Card::Special(card) => fmt::Display::fmt(card, f),
        }
    }
}

impl<E> From<PlayingCard> for Card<E> {
    fn from(card: PlayingCard) -> Self {
        Card::Playing(card)
    }
}

impl<E> From<GameCard> for Card<E> {
    fn from(card: GameCard) -> Self {
        Card::Game(card)
    }
}

impl<E> From<SpecialCard<E>> for Card<E> {
    fn from(card: SpecialCard<E>) -> Self {
        Card::Special(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed() -> Vec<Card> {
        let playing = PlayingCard::new("Ace", 100).unwrap().with_condition(5).unwrap();
        let game = GameCard::new(playing.clone())
            .with_rarity(4)
            .unwrap()
            .with_foiled(true);
        let special = SpecialCard::new("Bolt", 10, "Zap".to_string())
            .unwrap()
            .with_durability(3)
            .unwrap()
            .with_power_level(2.5)
            .unwrap();
        vec![playing.into(), game.into(), special.into()]
    }

    #[test]
    fn test_kind_tags() {
        for kind in [CardKind::Playing, CardKind::Game, CardKind::Special] {
            assert_eq!(CardKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(CardKind::from_tag(0), None);
        assert_eq!(CardKind::from_tag(4), None);
    }

    #[test]
    fn test_dispatch_values() {
        let values: Vec<_> = mixed().iter().map(Card::value).collect();
        assert_eq!(values, vec![50, 600, 75]);

        let kinds: Vec<_> = mixed().iter().map(Card::kind).collect();
        assert_eq!(kinds, vec![CardKind::Playing, CardKind::Game, CardKind::Special]);
    }

    #[test]
    fn test_base_mutation_through_enum() {
        let mut cards = mixed();
        for card in &mut cards {
            card.set_base_value(200).unwrap();
        }
        let values: Vec<_> = cards.iter().map(Card::value).collect();
        assert_eq!(values, vec![100, 1200, 1500]);

        assert!(cards[1].set_name("").is_err());
        assert_eq!(cards[1].name(), "Ace");
    }

    #[test]
    fn test_variant_accessors() {
        let cards = mixed();
        assert!(cards[0].as_playing().is_some());
        assert!(cards[0].as_game().is_none());
        assert_eq!(cards[1].as_playing().map(PlayingCard::condition), Some(5));
        assert_eq!(cards[1].as_game().map(GameCard::rarity), Some(4));
        assert!(cards[2].as_playing().is_none());
        assert_eq!(cards[2].as_special().map(|c| c.durability()), Some(3));
    }

    #[test]
    fn test_render_dispatch() {
        let cards = mixed();
        assert!(cards[1].render().contains("(FOILED)"));
        assert!(cards[2].render().starts_with("Bolt (Magic Card)"));
        assert_eq!(cards[0].to_string(), "Ace (Value: 50, Condition: 5, Standard)");
    }

    #[test]
    fn test_card_serialization() {
        let json = serde_json::to_value(&mixed()[1]).unwrap();
        assert_eq!(json["kind"], "Game");
        assert_eq!(json["name"], "Ace");
        assert_eq!(json["rarity"], 4);
        assert_eq!(json["foiled"], true);
    }
}
