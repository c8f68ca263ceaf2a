//! Binary codec for decks.
//!
//! ## Key Types
//!
//! - `Codec`: entry point; encodes to / decodes from buffers, streams and files
//! - `DeckEncoder` / `DeckDecoder`: the byte-level writer and reader
//! - `DeckHeader`: deck fields readable without decoding the cards
//!
//! Each card record carries a variant tag, so a deck of mixed variants
//! decodes back to exactly the same cards. See [`format`] for the layout.

pub mod decoder;
pub mod encoder;
pub mod format;

use std::fs;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use tracing::info;

pub use decoder::DeckDecoder;
pub use encoder::DeckEncoder;
pub use format::{DeckHeader, DECK_FILE_EXTENSION, FORMAT_VERSION};

use crate::cards::CardEffect;
use crate::core::config::DEFAULT_MAX_STRING_LEN;
use crate::core::DeckConfig;
use crate::deck::Deck;
use crate::error::{DeckError, Result};

/// Encodes and decodes decks with a fixed string-length bound.
///
/// ## Example
///
/// ```
/// use rust_deck::cards::{GameCard, PlayingCard};
/// use rust_deck::codec::Codec;
/// use rust_deck::deck::Deck;
///
/// let mut deck: Deck = Deck::new(4, "Vault", "Ada")?;
/// let playing = PlayingCard::new("Dragon", 100)?;
/// deck.add(GameCard::new(playing).with_rarity(7)?.with_foiled(true))?;
///
/// let codec = Codec::default();
/// let bytes = codec.encode(&deck)?;
/// let decoded: Deck = codec.decode(&bytes)?;
///
/// assert_eq!(decoded.cards(), deck.cards());
/// # Ok::<(), rust_deck::DeckError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Codec {
    max_string_len: usize,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STRING_LEN)
    }
}

impl Codec {
    /// Create a codec accepting strings up to `max_string_len` bytes.
    #[must_use]
    pub fn new(max_string_len: usize) -> Self {
        Self { max_string_len }
    }

    /// Create a codec with the configured bound.
    #[must_use]
    pub fn from_config(config: &DeckConfig) -> Self {
        Self::new(config.max_string_len)
    }

    /// Largest accepted string length.
    #[must_use]
    pub fn max_string_len(&self) -> usize {
        self.max_string_len
    }

    /// Encode a deck into a new buffer.
    pub fn encode<E: CardEffect>(&self, deck: &Deck<E>) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode_to(deck, &mut buf)?;
        Ok(buf)
    }

    /// Encode a deck into any sink.
    pub fn encode_to<E: CardEffect, W: Write>(&self, deck: &Deck<E>, writer: W) -> Result<()> {
        DeckEncoder::new(writer, self.max_string_len).write_deck(deck)
    }

    /// Decode a tagged deck from a buffer.
    pub fn decode<E: CardEffect>(&self, bytes: &[u8]) -> Result<Deck<E>> {
        self.decode_from(bytes)
    }

    /// Decode a tagged deck from any source.
    pub fn decode_from<E: CardEffect, R: Read>(&self, reader: R) -> Result<Deck<E>> {
        DeckDecoder::new(reader, self.max_string_len).read_deck()
    }

    /// Decode a deck in the untagged legacy format.
    pub fn decode_legacy<E: CardEffect>(&self, bytes: &[u8]) -> Result<Deck<E>> {
        DeckDecoder::new(bytes, self.max_string_len).read_legacy_deck()
    }

    /// Read only the header of a tagged deck.
    pub fn peek_header<R: Read>(&self, reader: R) -> Result<DeckHeader> {
        DeckDecoder::new(reader, self.max_string_len).read_preview()
    }

    /// Write a deck file, replacing any existing file at `path`.
    ///
    /// The deck is fully encoded before the file is touched.
    pub fn save<E: CardEffect>(&self, deck: &Deck<E>, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(DeckError::InvalidArgument("file name cannot be empty".to_string()));
        }
        let bytes = self.encode(deck)?;
        fs::write(path, &bytes).map_err(|err| DeckError::io(path, err))?;
        info!(path = %path.display(), cards = deck.size(), bytes = bytes.len(), "saved deck");
        Ok(())
    }

    /// Read a deck file.
    pub fn load<E: CardEffect>(&self, path: impl AsRef<Path>) -> Result<Deck<E>> {
        let bytes = read_file(path.as_ref())?;
        let deck: Deck<E> = self.decode(&bytes)?;
        info!(path = %path.as_ref().display(), cards = deck.size(), "loaded deck");
        Ok(deck)
    }

    /// Read a deck file in the legacy format.
    pub fn load_legacy<E: CardEffect>(&self, path: impl AsRef<Path>) -> Result<Deck<E>> {
        let bytes = read_file(path.as_ref())?;
        self.decode_legacy(&bytes)
    }

    /// Read the header of a deck file.
    pub fn peek_file(&self, path: impl AsRef<Path>) -> Result<DeckHeader> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|err| DeckError::io(path, err))?;
        self.peek_header(BufReader::new(file))
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str().is_empty() {
        return Err(DeckError::InvalidArgument("file name cannot be empty".to_string()));
    }
    fs::read(path).map_err(|err| DeckError::io(path, err))
}
