//! Tagged deck encoder.

use std::io::Write;

use crate::cards::{Card, CardEffect, GameCard, PlayingCard, SpecialCard};
use crate::deck::Deck;
use crate::error::{DeckError, Result};

use super::format::FORMAT_VERSION;

/// Writes a deck to any byte sink.
pub struct DeckEncoder<W> {
    writer: W,
    max_string_len: usize,
}

impl<W: Write> DeckEncoder<W> {
    /// Create an encoder that refuses strings longer than `max_string_len` bytes.
    pub fn new(writer: W, max_string_len: usize) -> Self {
        Self {
            writer,
            max_string_len,
        }
    }

    /// Give back the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Encode a full deck: version, header, then every card bottom to top.
    pub fn write_deck<E: CardEffect>(&mut self, deck: &Deck<E>) -> Result<()> {
        self.write_u8(FORMAT_VERSION)?;
        self.write_str("deck name", deck.name())?;
        self.write_str("owner", deck.owner())?;
        self.write_len("capacity", deck.capacity())?;
        self.write_len("card count", deck.size())?;
        for card in deck {
            self.write_card(card)?;
        }
        self.writer.flush().map_err(stream_error)
    }

    /// Encode one card record.
    pub fn write_card<E: CardEffect>(&mut self, card: &Card<E>) -> Result<()> {
        self.write_str("card name", card.name())?;
        self.write_len("card value", card.base_value() as usize)?;
        self.write_u8(card.kind().tag())?;
        match card {
            Card::Playing(playing) => self.write_playing(playing),
            Card::Game(game) => self.write_game(game),
            Card::Special(special) => self.write_special(special),
        }
    }

    fn write_playing(&mut self, card: &PlayingCard) -> Result<()> {
        let suit = card.suit().map(|suit| suit.as_str()).unwrap_or("");
        self.write_bytes("suit", suit.as_bytes())?;
        self.write_bool(card.is_face_card())?;
        self.write_i32(i32::from(card.condition()))?;
        self.write_str("manufacturer", card.manufacturer())
    }

    fn write_game(&mut self, card: &GameCard) -> Result<()> {
        self.write_playing(card.playing())?;
        self.write_i32(i32::from(card.rarity()))?;
        self.write_bool(card.is_foiled())?;
        self.write_str("edition", card.edition())?;
        self.write_len("serial number", card.serial_number() as usize)
    }

    fn write_special<E: CardEffect>(&mut self, card: &SpecialCard<E>) -> Result<()> {
        self.write_bytes("special effect", &card.special_effect().to_bytes())?;
        self.write_len("durability", card.durability() as usize)?;
        self.write_str("card type", card.card_type())?;
        self.write_f64(card.power_level())
    }

    // === Primitives ===

    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.writer.write_all(&[value]).map_err(stream_error)
    }

    fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.writer
            .write_all(&value.to_le_bytes())
            .map_err(stream_error)
    }

    fn write_f64(&mut self, value: f64) -> Result<()> {
        self.writer
            .write_all(&value.to_le_bytes())
            .map_err(stream_error)
    }

    /// Write a non-negative count that must fit the `i32` wire type.
    fn write_len(&mut self, field: &'static str, value: usize) -> Result<()> {
        let value = i32::try_from(value)
            .map_err(|_| DeckError::validation(field, format!("{value} does not fit in 32 bits")))?;
        self.write_i32(value)
    }

    /// Length-prefixed bytes; empty is allowed.
    fn write_bytes(&mut self, field: &'static str, bytes: &[u8]) -> Result<()> {
        if bytes.len() > self.max_string_len {
            return Err(DeckError::validation(
                field,
                format!("{} bytes exceeds the limit of {}", bytes.len(), self.max_string_len),
            ));
        }
        self.write_len(field, bytes.len())?;
        self.writer.write_all(bytes).map_err(stream_error)
    }

    fn write_str(&mut self, field: &'static str, value: &str) -> Result<()> {
        self.write_bytes(field, value.as_bytes())
    }
}

pub(crate) fn stream_error(source: std::io::Error) -> DeckError {
    DeckError::io("<stream>", source)
}
