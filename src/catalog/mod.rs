//! Save-directory catalog.
//!
//! The catalog works on file names inside one directory. It lists deck
//! files (case-insensitive `.dat`), previews their headers, and saves,
//! loads or deletes them through the codec.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::cards::CardEffect;
use crate::codec::{Codec, DeckHeader, DECK_FILE_EXTENSION};
use crate::core::DeckConfig;
use crate::deck::Deck;
use crate::error::{DeckError, Result};

/// File stem used when a requested name sanitizes to nothing.
pub const FALLBACK_FILE_STEM: &str = "unnamed_deck";

const INVALID_FILE_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// A deck file found in the catalog directory.
#[derive(Clone, Debug, Serialize)]
pub struct CatalogEntry {
    /// File name within the directory.
    pub file_name: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// Size on disk.
    pub size_bytes: u64,
    /// Decoded header, or `None` if the file could not be read.
    pub header: Option<DeckHeader>,
}

impl CatalogEntry {
    /// Deck name from the header, falling back to the file stem.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.header
            .as_ref()
            .map(|header| header.name.as_str())
            .unwrap_or_else(|| deck_name_from_file(&self.file_name))
    }
}

/// Deck files stored in one directory.
///
/// ```no_run
/// use rust_deck::catalog::Catalog;
/// use rust_deck::deck::Deck;
///
/// let catalog = Catalog::open("./saves")?;
/// let deck: Deck = Deck::new(10, "Travel", "Ada")?;
/// let path = catalog.save(&deck, Some("travel deck"))?;
///
/// assert_eq!(catalog.list_candidate_files()?, vec!["travel deck.dat".to_string()]);
/// # let _ = path;
/// # Ok::<(), rust_deck::DeckError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Catalog {
    root: PathBuf,
    codec: Codec,
}

impl Catalog {
    /// Open a catalog, creating the directory if it does not exist.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        Self::with_codec(root, Codec::default())
    }

    /// Open a catalog at the configured save directory.
    pub fn from_config(config: &DeckConfig) -> Result<Self> {
        Self::with_codec(&config.save_dir, Codec::from_config(config))
    }

    /// Open a catalog that uses a specific codec.
    pub fn with_codec(root: impl Into<PathBuf>, codec: Codec) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            fs::create_dir_all(&root).map_err(|err| DeckError::io(&root, err))?;
            info!(dir = %root.display(), "created save directory");
        }
        Ok(Self { root, codec })
    }

    /// Directory this catalog manages.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path for a file name in this catalog.
    #[must_use]
    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Deck file names in the directory, sorted alphabetically.
    pub fn list_candidate_files(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let dir = fs::read_dir(&self.root).map_err(|err| DeckError::io(&self.root, err))?;
        for entry in dir {
            let entry = entry.map_err(|err| DeckError::io(&self.root, err))?;
            let is_file = entry
                .file_type()
                .map_err(|err| DeckError::io(entry.path(), err))?
                .is_file();
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if is_deck_file(name) {
                    files.push(name.to_string());
                }
            }
        }

        files.sort();
        Ok(files)
    }

    /// Deck files with size and header preview.
    ///
    /// Files whose header cannot be read are still listed, without a preview.
    pub fn entries(&self) -> Result<Vec<CatalogEntry>> {
        let mut entries = Vec::new();
        for file_name in self.list_candidate_files()? {
            let path = self.path_of(&file_name);
            let size_bytes = fs::metadata(&path)
                .map(|meta| meta.len())
                .map_err(|err| DeckError::io(&path, err))?;
            let header = match self.codec.peek_file(&path) {
                Ok(header) => Some(header),
                Err(err) => {
                    warn!("Failed to read deck header {:?}: {err}", path);
                    None
                }
            };
            entries.push(CatalogEntry {
                file_name,
                path,
                size_bytes,
                header,
            });
        }
        Ok(entries)
    }

    /// Check if a file exists in the catalog.
    #[must_use]
    pub fn exists(&self, file_name: &str) -> bool {
        self.path_of(file_name).is_file()
    }

    /// Remove a file from the catalog.
    pub fn delete(&self, file_name: &str) -> Result<()> {
        require_file_name(file_name)?;
        let path = self.path_of(file_name);
        fs::remove_file(&path).map_err(|err| DeckError::io(&path, err))?;
        info!(path = %path.display(), "deleted deck file");
        Ok(())
    }

    /// Save a deck under a sanitized name and return the written path.
    ///
    /// With no base name the deck's own name is used. Existing files are
    /// overwritten; check [`Catalog::exists`] first to avoid that.
    pub fn save<E: CardEffect>(&self, deck: &Deck<E>, base_name: Option<&str>) -> Result<PathBuf> {
        let base = base_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| deck.name());
        let file_name = deck_file_name(base);
        let path = self.path_of(&file_name);
        self.codec.save(deck, &path)?;
        Ok(path)
    }

    /// Save a deck to an existing catalog file name, as given.
    ///
    /// Unlike [`Catalog::save`] the name is neither sanitized nor given an
    /// extension, so a deck read with [`Catalog::load`] goes back to the
    /// same file.
    pub fn save_as<E: CardEffect>(&self, deck: &Deck<E>, file_name: &str) -> Result<PathBuf> {
        require_file_name(file_name)?;
        let path = self.path_of(file_name);
        self.codec.save(deck, &path)?;
        Ok(path)
    }

    /// Load a deck file into a new deck.
    pub fn load<E: CardEffect>(&self, file_name: &str) -> Result<Deck<E>> {
        require_file_name(file_name)?;
        self.codec.load(self.path_of(file_name))
    }

    /// Replace `deck`'s contents with a stored deck. On error `deck` is unchanged.
    pub fn load_into<E: CardEffect>(&self, file_name: &str, deck: &mut Deck<E>) -> Result<()> {
        let loaded = self.load(file_name)?;
        deck.replace_with(loaded);
        Ok(())
    }

    /// Decode only the header of a stored deck.
    pub fn preview(&self, file_name: &str) -> Result<DeckHeader> {
        require_file_name(file_name)?;
        self.codec.peek_file(self.path_of(file_name))
    }
}

/// Check if a file name carries the deck extension (case-insensitive).
#[must_use]
pub fn is_deck_file(file_name: &str) -> bool {
    let suffix_len = DECK_FILE_EXTENSION.len() + 1;
    file_name
        .len()
        .checked_sub(suffix_len)
        .and_then(|start| file_name.get(start..))
        .and_then(|suffix| suffix.strip_prefix('.'))
        .map(|ext| ext.eq_ignore_ascii_case(DECK_FILE_EXTENSION))
        .unwrap_or(false)
}

/// Strip the deck extension from a file name.
#[must_use]
pub fn deck_name_from_file(file_name: &str) -> &str {
    if is_deck_file(file_name) {
        &file_name[..file_name.len() - DECK_FILE_EXTENSION.len() - 1]
    } else {
        file_name
    }
}

/// Make user input safe to use as a file stem.
#[must_use]
pub fn sanitize_file_stem(input: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|ch| if INVALID_FILE_CHARS.contains(&ch) { '_' } else { ch })
        .collect();
    let trimmed = replaced.trim_matches(|ch| ch == ' ' || ch == '\t');
    if trimmed.is_empty() {
        FALLBACK_FILE_STEM.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Sanitized file name with the deck extension.
#[must_use]
pub fn deck_file_name(base_name: &str) -> String {
    format!("{}.{}", sanitize_file_stem(base_name), DECK_FILE_EXTENSION)
}

fn require_file_name(file_name: &str) -> Result<()> {
    if file_name.is_empty() {
        return Err(DeckError::InvalidArgument("file name cannot be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_deck_file() {
        assert!(is_deck_file("deck.dat"));
        assert!(is_deck_file("DECK.DAT"));
        assert!(is_deck_file("my.deck.Dat"));
        assert!(!is_deck_file("deck.json"));
        assert!(!is_deck_file("dat"));
        assert!(!is_deck_file(".dat.txt"));
        assert!(!is_deck_file("deckdat"));
    }

    #[test]
    fn test_is_deck_file_suffix_only() {
        assert!(is_deck_file(".dat"));
        assert!(is_deck_file(".DAT"));
        assert!(is_deck_file("été.dat"));
        // Multi-byte text where the suffix would split a character
        assert!(!is_deck_file("€€"));
        assert!(!is_deck_file("ab€"));
        assert_eq!(deck_name_from_file(".dat"), "");
    }

    #[test]
    fn test_deck_name_from_file() {
        assert_eq!(deck_name_from_file("travel.dat"), "travel");
        assert_eq!(deck_name_from_file("travel.DAT"), "travel");
        assert_eq!(deck_name_from_file("notes.txt"), "notes.txt");
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_file_stem("a<b>c:d"), "a_b_c_d");
        assert_eq!(sanitize_file_stem("  spaced  "), "spaced");
        assert_eq!(sanitize_file_stem("dir/name?"), "dir_name_");
        assert_eq!(sanitize_file_stem(" \t "), "unnamed_deck");
        assert_eq!(deck_file_name("My Deck"), "My Deck.dat");
    }

    #[test]
    fn test_display_name_falls_back_to_stem() {
        let entry = CatalogEntry {
            file_name: "broken.dat".to_string(),
            path: PathBuf::from("broken.dat"),
            size_bytes: 3,
            header: None,
        };
        assert_eq!(entry.display_name(), "broken");
    }
}
