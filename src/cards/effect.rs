//! Effect payloads carried by special cards.
//!
//! Games pick their own effect type. The deck file stores an effect as a
//! length-prefixed byte string, so an effect type only needs to know how
//! to turn itself into bytes and back.

use std::fmt;

use crate::error::{DeckError, Result};

/// A printable effect that can be stored in a deck file.
pub trait CardEffect: Clone + fmt::Debug + fmt::Display + PartialEq {
    /// Encode the effect.
    fn to_bytes(&self) -> Vec<u8>;

    /// Decode an effect previously produced by [`CardEffect::to_bytes`].
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

impl CardEffect for String {
    fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        String::from_utf8(bytes.to_vec())
            .map_err(|_| DeckError::validation("special effect", "not valid UTF-8"))
    }
}

impl CardEffect for i32 {
    fn to_bytes(&self) -> Vec<u8> {
        self.to_le_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; 4] = bytes.try_into().map_err(|_| {
            DeckError::validation("special effect", format!("expected 4 bytes, got {}", bytes.len()))
        })?;
        Ok(i32::from_le_bytes(raw))
    }
}
