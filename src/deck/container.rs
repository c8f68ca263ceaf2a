//! Bounded, ordered card container.
//!
//! Index 0 is the bottom of the deck and the last index is the top:
//! `add` pushes onto the top and `draw` pops from it.

use std::fmt;
use std::path::Path;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::cards::{Card, CardEffect};
use crate::codec::Codec;
use crate::core::{fisher_yates, DeckConfig, DeckRng};
use crate::error::{DeckError, Result};

/// A named, owned deck holding at most `capacity` cards.
///
/// The deck owns its cards by value. Drawing moves a card out to the
/// caller; dropping the deck drops whatever it still holds.
///
/// ## Usage
///
/// ```
/// use rust_deck::cards::{Card, PlayingCard};
/// use rust_deck::deck::Deck;
///
/// let mut deck: Deck = Deck::new(2, "Travel", "Ada")?.with_seed(42);
///
/// deck.add(PlayingCard::new("Ace", 10)?)?;
/// deck.add(PlayingCard::new("King", 8)?)?;
/// assert!(deck.is_full());
/// assert!(deck.add(PlayingCard::new("Queen", 6)?).is_err());
///
/// // Top of deck is the last card added
/// let top = deck.draw()?;
/// assert_eq!(top.name(), "King");
/// # Ok::<(), rust_deck::DeckError>(())
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct Deck<E = String> {
    name: String,
    owner: String,
    capacity: usize,
    cards: Vec<Card<E>>,
    #[serde(skip)]
    rng: DeckRng,
}

impl<E: CardEffect> Deck<E> {
    /// Create an empty deck.
    ///
    /// Fails if `capacity` is zero or `name`/`owner` is empty.
    pub fn new(capacity: usize, name: impl Into<String>, owner: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let owner = owner.into();
        validate_label("deck name", &name)?;
        validate_label("owner", &owner)?;
        if capacity < 1 {
            return Err(DeckError::validation("capacity", "must be at least 1"));
        }
        Ok(Self {
            name,
            owner,
            capacity,
            cards: Vec::with_capacity(capacity.min(1024)),
            rng: DeckRng::from_time(),
        })
    }

    /// Create an empty deck from configured defaults.
    pub fn from_config(config: &DeckConfig) -> Result<Self> {
        let deck = Self::new(config.capacity, &config.deck_name, &config.owner)?;
        Ok(match config.seed {
            Some(seed) => deck.with_seed(seed),
            None => deck,
        })
    }

    /// Use a fixed shuffle seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = DeckRng::new(seed);
        self
    }

    /// Replace the shuffle generator.
    pub fn set_rng(&mut self, rng: DeckRng) {
        self.rng = rng;
    }

    /// The shuffle generator.
    #[must_use]
    pub fn rng(&self) -> &DeckRng {
        &self.rng
    }

    // === Contents ===

    /// Put a card on top of the deck.
    ///
    /// Fails with `Capacity` when the deck is full; the card is dropped
    /// in that case, so callers wanting it back should check `is_full` first.
    pub fn add(&mut self, card: impl Into<Card<E>>) -> Result<()> {
        if self.is_full() {
            return Err(DeckError::Capacity {
                capacity: self.capacity,
            });
        }
        let card = card.into();
        debug!(deck = %self.name, card = %card.name(), "adding card");
        self.cards.push(card);
        Ok(())
    }

    /// Put an optional card on top of the deck.
    ///
    /// `None` fails with `InvalidArgument`.
    pub fn add_opt(&mut self, card: Option<Card<E>>) -> Result<()> {
        let card = card.ok_or_else(|| DeckError::InvalidArgument("no card to add".to_string()))?;
        self.add(card)
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Result<Card<E>> {
        let card = self.cards.pop().ok_or(DeckError::Empty { operation: "draw from" })?;
        debug!(deck = %self.name, card = %card.name(), "drew card");
        Ok(card)
    }

    /// Look at the top card without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Card<E>> {
        self.cards.last()
    }

    /// Shuffle with the deck's own generator.
    pub fn shuffle(&mut self) -> Result<()> {
        if self.cards.is_empty() {
            return Err(DeckError::Empty { operation: "shuffle" });
        }
        fisher_yates(&mut self.cards, &mut self.rng);
        debug!(deck = %self.name, cards = self.cards.len(), "shuffled");
        Ok(())
    }

    /// Shuffle with a caller-supplied randomness source.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        if self.cards.is_empty() {
            return Err(DeckError::Empty { operation: "shuffle" });
        }
        fisher_yates(&mut self.cards, rng);
        debug!(deck = %self.name, cards = self.cards.len(), "shuffled with external rng");
        Ok(())
    }

    /// Replace name, owner, capacity and cards with those of `other`.
    ///
    /// The shuffle generator is kept.
    pub fn replace_with(&mut self, other: Deck<E>) {
        self.name = other.name;
        self.owner = other.owner;
        self.capacity = other.capacity;
        self.cards = other.cards;
    }

    // === Accessors ===

    /// Deck name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the deck. Empty names are rejected.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_label("deck name", &name)?;
        self.name = name;
        Ok(())
    }

    /// Deck owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Change the owner. Empty names are rejected.
    pub fn set_owner(&mut self, owner: impl Into<String>) -> Result<()> {
        let owner = owner.into();
        validate_label("owner", &owner)?;
        self.owner = owner;
        Ok(())
    }

    /// Maximum number of cards.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity. Must be at least 1 and no less than the current size.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity < 1 {
            return Err(DeckError::validation("capacity", "must be at least 1"));
        }
        if capacity < self.cards.len() {
            return Err(DeckError::validation(
                "capacity",
                format!(
                    "cannot be less than the current number of cards ({})",
                    self.cards.len()
                ),
            ));
        }
        debug!(deck = %self.name, from = self.capacity, to = capacity, "capacity changed");
        self.capacity = capacity;
        Ok(())
    }

    /// Number of cards held.
    #[must_use]
    pub fn size(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check if the deck is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.capacity
    }

    /// Cards from bottom to top.
    #[must_use]
    pub fn cards(&self) -> &[Card<E>] {
        &self.cards
    }

    /// Iterate cards from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Card<E>> {
        self.cards.iter()
    }

    /// Sum of every card's derived value, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_value(&self) -> u64 {
        self.cards
            .iter()
            .map(Card::value)
            .fold(0, u64::saturating_add)
    }

    /// Full listing: header, then each card's description.
    #[must_use]
    pub fn display_all(&self) -> String {
        if self.is_empty() {
            return "Deck is empty.".to_string();
        }

        let mut out = format!(
            "=== {} (Owner: {}) ===\nCards in deck ({}/{}):\n",
            self.name,
            self.owner,
            self.size(),
            self.capacity
        );
        for (i, card) in self.cards.iter().enumerate() {
            out.push_str(&format!("\nCard {}: {}\n-------------------", i + 1, card.render()));
        }
        out
    }

    // === Persistence ===

    /// Write the deck to `path` in the tagged binary format.
    ///
    /// Uses the default string bound; see [`Deck::save_with`] for a
    /// configured codec.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_with(&Codec::default(), path)
    }

    /// Write the deck to `path` with a specific codec.
    pub fn save_with(&self, codec: &Codec, path: impl AsRef<Path>) -> Result<()> {
        codec.save(self, path)
    }

    /// Read a deck file into a new deck, using the default string bound.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Codec::default().load(path)
    }

    /// Replace this deck's contents with the deck stored at `path`.
    ///
    /// All-or-nothing: on any error the deck is left unchanged. Uses the
    /// default string bound; see [`Deck::load_with`] for a configured codec.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.load_with(&Codec::default(), path)
    }

    /// Like [`Deck::load`], decoding with a specific codec.
    pub fn load_with(&mut self, codec: &Codec, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let loaded: Deck<E> = codec.load(path)?;
        info!(path = %path.display(), cards = loaded.size(), "replacing deck contents");
        self.replace_with(loaded);
        Ok(())
    }

    /// Like [`Deck::load`], for files in the untagged legacy format.
    pub fn load_legacy(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let loaded: Deck<E> = Codec::default().load_legacy(path)?;
        self.replace_with(loaded);
        Ok(())
    }
}

impl<E: CardEffect> fmt::Display for Deck<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deck: {} (Owner: {}, Cards: {}/{})",
            self.name,
            self.owner,
            self.size(),
            self.capacity
        )
    }
}

impl<'a, E> IntoIterator for &'a Deck<E> {
    type Item = &'a Card<E>;
    type IntoIter = std::slice::Iter<'a, Card<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

fn validate_label(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(DeckError::validation(field, "cannot be empty"));
    }
    Ok(())
}
