//! Fields and validation shared by every card variant.

use serde::Serialize;

use crate::error::{DeckError, Result};

/// Reject an empty string for `field`.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(DeckError::validation(field, "cannot be empty"));
    }
    Ok(())
}

/// Check `value` lies in `min..=max` and narrow it.
pub(crate) fn require_range(field: &'static str, value: i32, min: i32, max: i32) -> Result<u32> {
    if value < min || value > max {
        return Err(DeckError::validation(
            field,
            format!("must be between {min} and {max}, got {value}"),
        ));
    }
    Ok(value as u32)
}

/// Check `value` is at least `min` and narrow it.
pub(crate) fn require_at_least(field: &'static str, value: i32, min: i32) -> Result<u32> {
    if value < min {
        return Err(DeckError::validation(
            field,
            format!("must be at least {min}, got {value}"),
        ));
    }
    Ok(value as u32)
}

/// Name and base value common to all cards.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CardBase {
    name: String,
    base_value: u32,
}

impl CardBase {
    /// Create validated base fields.
    pub fn new(name: impl Into<String>, base_value: i32) -> Result<Self> {
        let name = name.into();
        require_non_empty("name", &name)?;
        let base_value = require_at_least("value", base_value, 0)?;
        Ok(Self { name, base_value })
    }

    /// Card name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Undiscounted value before any variant formula is applied.
    #[must_use]
    pub fn base_value(&self) -> u32 {
        self.base_value
    }

    /// Rename the card. Empty names are rejected.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        require_non_empty("name", &name)?;
        self.name = name;
        Ok(())
    }

    /// Change the base value. Negative values are rejected.
    pub fn set_base_value(&mut self, value: i32) -> Result<()> {
        self.base_value = require_at_least("value", value, 0)?;
        Ok(())
    }
}
