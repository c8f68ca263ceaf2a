//! Deck decoder.
//!
//! Every length prefix is checked against the configured bound before any
//! bytes are read, and every decoded field goes through the same validation
//! as the card constructors. The decoder builds a fresh deck; callers swap
//! it in only after decoding succeeds.

use std::io::{ErrorKind, Read};

use crate::cards::{Card, CardEffect, CardKind, GameCard, PlayingCard, SpecialCard, Suit};
use crate::deck::Deck;
use crate::error::{DeckError, Result};

use super::encoder::stream_error;
use super::format::{DeckHeader, FORMAT_VERSION};

/// Reads decks from any byte source.
pub struct DeckDecoder<R> {
    reader: R,
    max_string_len: usize,
}

impl<R: Read> DeckDecoder<R> {
    /// Create a decoder that rejects length prefixes above `max_string_len`.
    pub fn new(reader: R, max_string_len: usize) -> Self {
        Self {
            reader,
            max_string_len,
        }
    }

    /// Decode a tagged deck and require the stream to end after it.
    pub fn read_deck<E: CardEffect>(&mut self) -> Result<Deck<E>> {
        self.read_version()?;
        let header = self.read_header()?;
        let mut deck = deck_from_header(&header)?;
        for _ in 0..header.card_count {
            let card = self.read_card()?;
            deck.add(card)?;
        }
        self.expect_end()?;
        Ok(deck)
    }

    /// Decode a legacy (untagged) deck. Every record becomes a default
    /// playing card carrying the stored name and value.
    pub fn read_legacy_deck<E: CardEffect>(&mut self) -> Result<Deck<E>> {
        let header = self.read_header()?;
        let mut deck = deck_from_header(&header)?;
        for _ in 0..header.card_count {
            let name = self.read_string("card name")?;
            let value = self.read_i32("card value")?;
            let card = PlayingCard::new(name, value).map_err(into_corrupt)?;
            deck.add(card)?;
        }
        self.expect_end()?;
        Ok(deck)
    }

    /// Read the version byte and header only.
    pub fn read_preview(&mut self) -> Result<DeckHeader> {
        self.read_version()?;
        self.read_header()
    }

    fn read_version(&mut self) -> Result<()> {
        let version = self.read_u8("format version")?;
        if version != FORMAT_VERSION {
            return Err(DeckError::corrupt(
                "format version",
                FORMAT_VERSION.to_string(),
                version.to_string(),
            ));
        }
        Ok(())
    }

    fn read_header(&mut self) -> Result<DeckHeader> {
        let name = self.read_string("deck name")?;
        let owner = self.read_string("owner")?;

        let capacity = self.read_i32("capacity")?;
        if capacity < 1 {
            return Err(DeckError::corrupt("capacity", "at least 1", capacity.to_string()));
        }
        let card_count = self.read_i32("card count")?;
        if card_count < 0 || card_count > capacity {
            return Err(DeckError::corrupt(
                "card count",
                format!("0..={capacity}"),
                card_count.to_string(),
            ));
        }

        Ok(DeckHeader {
            name,
            owner,
            capacity: capacity as usize,
            card_count: card_count as usize,
        })
    }

    /// Decode one tagged card record.
    pub fn read_card<E: CardEffect>(&mut self) -> Result<Card<E>> {
        let name = self.read_string("card name")?;
        let value = self.read_i32("card value")?;
        let tag = self.read_u8("variant tag")?;
        let kind = CardKind::from_tag(tag)
            .ok_or_else(|| DeckError::corrupt("variant tag", "1, 2 or 3", tag.to_string()))?;

        let card = match kind {
            CardKind::Playing => Card::Playing(self.read_playing(name, value)?),
            CardKind::Game => Card::Game(self.read_game(name, value)?),
            CardKind::Special => Card::Special(self.read_special(name, value)?),
        };
        Ok(card)
    }

    fn read_playing(&mut self, name: String, value: i32) -> Result<PlayingCard> {
        let suit = self.read_string_allow_empty("suit")?;
        let suit = Suit::parse_optional(&suit).map_err(into_corrupt)?;
        let face_card = self.read_bool("face card")?;
        let condition = self.read_i32("condition")?;
        let manufacturer = self.read_string("manufacturer")?;

        PlayingCard::new(name, value)
            .and_then(|card| card.with_condition(condition))
            .and_then(|card| card.with_manufacturer(manufacturer))
            .map(|card| card.with_suit(suit).with_face_card(face_card))
            .map_err(into_corrupt)
    }

    fn read_game(&mut self, name: String, value: i32) -> Result<GameCard> {
        let playing = self.read_playing(name, value)?;
        let rarity = self.read_i32("rarity")?;
        let foiled = self.read_bool("foiled")?;
        let edition = self.read_string("edition")?;
        let serial = self.read_i32("serial number")?;

        GameCard::new(playing)
            .with_rarity(rarity)
            .and_then(|card| card.with_edition(edition))
            .and_then(|card| card.with_serial_number(serial))
            .map(|card| card.with_foiled(foiled))
            .map_err(into_corrupt)
    }

    fn read_special<E: CardEffect>(&mut self, name: String, value: i32) -> Result<SpecialCard<E>> {
        let effect = self.read_bytes("special effect", true)?;
        let effect = E::from_bytes(&effect).map_err(into_corrupt)?;
        let durability = self.read_i32("durability")?;
        let card_type = self.read_string("card type")?;
        let power_level = self.read_f64("power level")?;

        SpecialCard::new(name, value, effect)
            .and_then(|card| card.with_durability(durability))
            .and_then(|card| card.with_card_type(card_type))
            .and_then(|card| card.with_power_level(power_level))
            .map_err(into_corrupt)
    }

    // === Primitives ===

    fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.fill(field, &mut buf)?;
        Ok(buf)
    }

    fn fill(&mut self, field: &'static str, buf: &mut [u8]) -> Result<()> {
        let len = buf.len();
        self.reader.read_exact(buf).map_err(|err| {
            if err.kind() == ErrorKind::UnexpectedEof {
                DeckError::corrupt(field, format!("{len} bytes"), "end of file")
            } else {
                stream_error(err)
            }
        })
    }

    fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        let [byte] = self.read_array::<1>(field)?;
        Ok(byte)
    }

    fn read_bool(&mut self, field: &'static str) -> Result<bool> {
        match self.read_u8(field)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DeckError::corrupt(field, "0 or 1", other.to_string())),
        }
    }

    fn read_i32(&mut self, field: &'static str) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array::<4>(field)?))
    }

    fn read_f64(&mut self, field: &'static str) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_array::<8>(field)?))
    }

    fn read_bytes(&mut self, field: &'static str, allow_empty: bool) -> Result<Vec<u8>> {
        let len = self.read_i32(field)?;
        let min = if allow_empty { 0 } else { 1 };
        if len < min || len as usize > self.max_string_len {
            return Err(DeckError::corrupt(
                field,
                format!("length in {min}..={}", self.max_string_len),
                len.to_string(),
            ));
        }
        let mut buf = vec![0u8; len as usize];
        self.fill(field, &mut buf)?;
        Ok(buf)
    }

    fn read_string(&mut self, field: &'static str) -> Result<String> {
        let bytes = self.read_bytes(field, false)?;
        utf8(field, bytes)
    }

    fn read_string_allow_empty(&mut self, field: &'static str) -> Result<String> {
        let bytes = self.read_bytes(field, true)?;
        utf8(field, bytes)
    }

    fn expect_end(&mut self) -> Result<()> {
        let mut probe = [0u8; 1];
        loop {
            match self.reader.read(&mut probe) {
                Ok(0) => return Ok(()),
                Ok(_) => {
                    return Err(DeckError::corrupt("end of file", "no more data", "trailing bytes"))
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(stream_error(err)),
            }
        }
    }
}

fn utf8(field: &'static str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| DeckError::corrupt(field, "UTF-8 text", "invalid bytes"))
}

fn deck_from_header<E: CardEffect>(header: &DeckHeader) -> Result<Deck<E>> {
    Deck::new(header.capacity, header.name.clone(), header.owner.clone()).map_err(into_corrupt)
}

/// Report a field that decoded but failed validation as file corruption.
fn into_corrupt(err: DeckError) -> DeckError {
    match err {
        DeckError::Validation { field, reason } => DeckError::corrupt(field, "a valid value", reason),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(name: &[u8], owner: &[u8], capacity: i32, count: i32) -> Vec<u8> {
        let mut bytes = vec![FORMAT_VERSION];
        bytes.extend_from_slice(&(name.len() as i32).to_le_bytes());
        bytes.extend_from_slice(name);
        bytes.extend_from_slice(&(owner.len() as i32).to_le_bytes());
        bytes.extend_from_slice(owner);
        bytes.extend_from_slice(&capacity.to_le_bytes());
        bytes.extend_from_slice(&count.to_le_bytes());
        bytes
    }

    fn decode(bytes: &[u8]) -> Result<Deck> {
        DeckDecoder::new(bytes, 1000).read_deck()
    }

    #[test]
    fn test_empty_deck() {
        let deck = decode(&header(b"Deck", b"Me", 3, 0)).unwrap();
        assert_eq!(deck.name(), "Deck");
        assert_eq!(deck.owner(), "Me");
        assert_eq!(deck.capacity(), 3);
        assert!(deck.is_empty());
    }

    #[test]
    fn test_wrong_version() {
        let mut bytes = header(b"Deck", b"Me", 3, 0);
        bytes[0] = 9;
        assert_eq!(decode(&bytes).unwrap_err().field(), Some("format version"));
    }

    #[test]
    fn test_length_out_of_bounds() {
        let mut bytes = vec![FORMAT_VERSION];
        bytes.extend_from_slice(&5000i32.to_le_bytes());
        let err = decode(&bytes).unwrap_err();
        assert!(err.is_corrupt());
        assert_eq!(err.field(), Some("deck name"));

        let mut bytes = vec![FORMAT_VERSION];
        bytes.extend_from_slice(&0i32.to_le_bytes());
        assert_eq!(decode(&bytes).unwrap_err().field(), Some("deck name"));

        let mut bytes = vec![FORMAT_VERSION];
        bytes.extend_from_slice(&(-4i32).to_le_bytes());
        assert_eq!(decode(&bytes).unwrap_err().field(), Some("deck name"));
    }

    #[test]
    fn test_truncated() {
        let bytes = header(b"Deck", b"Me", 3, 0);
        for cut in 0..bytes.len() {
            let err = decode(&bytes[..cut]).unwrap_err();
            assert!(err.is_corrupt(), "cut at {cut}: {err}");
        }
    }

    #[test]
    fn test_negative_count() {
        let bytes = header(b"Deck", b"Me", 3, -1);
        assert_eq!(decode(&bytes).unwrap_err().field(), Some("card count"));
    }

    #[test]
    fn test_count_over_capacity() {
        let bytes = header(b"Deck", b"Me", 1, 2);
        assert_eq!(decode(&bytes).unwrap_err().field(), Some("card count"));
    }

    #[test]
    fn test_zero_capacity() {
        let bytes = header(b"Deck", b"Me", 0, 0);
        assert_eq!(decode(&bytes).unwrap_err().field(), Some("capacity"));
    }

    #[test]
    fn test_unknown_tag() {
        let mut bytes = header(b"Deck", b"Me", 1, 1);
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes.extend_from_slice(b"A");
        bytes.extend_from_slice(&5i32.to_le_bytes());
        bytes.push(7);
        assert_eq!(decode(&bytes).unwrap_err().field(), Some("variant tag"));
    }

    #[test]
    fn test_out_of_range_field_is_corrupt() {
        let mut bytes = header(b"Deck", b"Me", 1, 1);
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes.extend_from_slice(b"A");
        bytes.extend_from_slice(&5i32.to_le_bytes());
        bytes.push(CardKind::Playing.tag());
        bytes.extend_from_slice(&0i32.to_le_bytes()); // no suit
        bytes.push(0);
        bytes.extend_from_slice(&11i32.to_le_bytes()); // condition out of range
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes.extend_from_slice(b"M");

        let err = decode(&bytes).unwrap_err();
        assert!(err.is_corrupt());
        assert_eq!(err.field(), Some("condition"));
    }

    #[test]
    fn test_bad_bool() {
        let mut bytes = header(b"Deck", b"Me", 1, 1);
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes.extend_from_slice(b"A");
        bytes.extend_from_slice(&5i32.to_le_bytes());
        bytes.push(CardKind::Playing.tag());
        bytes.extend_from_slice(&0i32.to_le_bytes());
        bytes.push(2);
        assert_eq!(decode(&bytes).unwrap_err().field(), Some("face card"));
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = header(b"Deck", b"Me", 1, 0);
        bytes.push(0);
        assert_eq!(decode(&bytes).unwrap_err().field(), Some("end of file"));
    }

    #[test]
    fn test_legacy_deck() {
        let mut bytes = header(b"Old", b"Me", 4, 2)[1..].to_vec();
        for (name, value) in [(&b"Ace"[..], 11i32), (&b"Two"[..], 2)] {
            bytes.extend_from_slice(&(name.len() as i32).to_le_bytes());
            bytes.extend_from_slice(name);
            bytes.extend_from_slice(&value.to_le_bytes());
        }

        let deck: Deck = DeckDecoder::new(&bytes[..], 1000).read_legacy_deck().unwrap();
        assert_eq!(deck.name(), "Old");
        assert_eq!(deck.size(), 2);
        assert_eq!(deck.cards()[0].kind(), CardKind::Playing);
        assert_eq!(deck.cards()[0].value(), 11);
        assert_eq!(deck.cards()[1].name(), "Two");
    }

    #[test]
    fn test_preview_ignores_cards() {
        let mut bytes = header(b"Deck", b"Me", 5, 2);
        bytes.extend_from_slice(b"garbage");
        let preview = DeckDecoder::new(&bytes[..], 1000).read_preview().unwrap();
        assert_eq!(
            preview,
            DeckHeader {
                name: "Deck".to_string(),
                owner: "Me".to_string(),
                capacity: 5,
                card_count: 2,
            }
        );
    }
}
