//! Save-directory catalog integration tests.
//!
//! Every test runs against its own temporary directory.

use std::fs;

use rust_deck::cards::{PlayingCard, SpecialCard};
use rust_deck::catalog::{deck_file_name, sanitize_file_stem, Catalog, FALLBACK_FILE_STEM};
use rust_deck::core::DeckConfig;
use rust_deck::deck::Deck;
use rust_deck::DeckError;
use tempfile::tempdir;

fn small_deck(name: &str) -> Deck {
    let mut deck = Deck::new(5, name, "Owner").unwrap();
    deck.add(PlayingCard::new("One", 10).unwrap()).unwrap();
    deck.add(SpecialCard::new("Two", 20, "Glow".to_string()).unwrap())
        .unwrap();
    deck
}

// =============================================================================
// Directory handling
// =============================================================================

/// Test that opening a catalog creates a missing directory.
#[test]
fn test_open_creates_directory() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("nested").join("saves");
    assert!(!root.exists());

    let catalog = Catalog::open(&root).unwrap();
    assert!(root.is_dir());
    assert_eq!(catalog.root(), root.as_path());
    assert!(catalog.list_candidate_files().unwrap().is_empty());
}

/// Test that the catalog follows the configured save directory.
#[test]
fn test_from_config_uses_save_dir() {
    let dir = tempdir().unwrap();
    let config = DeckConfig::default().with_save_dir(dir.path().join("cfg"));
    let catalog = Catalog::from_config(&config).unwrap();
    assert_eq!(catalog.root(), dir.path().join("cfg").as_path());
}

/// Test that listing keeps only deck files, sorted by name.
#[test]
fn test_list_filters_and_sorts() {
    let dir = tempdir().unwrap();
    let catalog = Catalog::open(dir.path()).unwrap();

    for name in ["zeta.dat", "Alpha.DAT", "beta.Dat", "notes.txt", "dat", ".dat"] {
        fs::write(dir.path().join(name), b"x").unwrap();
    }
    fs::create_dir(dir.path().join("folder.dat")).unwrap();

    let files = catalog.list_candidate_files().unwrap();
    assert_eq!(files, vec![".dat", "Alpha.DAT", "beta.Dat", "zeta.dat"]);
}

// =============================================================================
// Save, load, delete
// =============================================================================

/// Test the full save, load and delete cycle.
#[test]
fn test_save_load_delete_cycle() {
    let dir = tempdir().unwrap();
    let catalog = Catalog::open(dir.path()).unwrap();
    let deck = small_deck("Travel Deck");

    let path = catalog.save(&deck, None).unwrap();
    assert_eq!(path, dir.path().join("Travel Deck.dat"));
    assert!(catalog.exists("Travel Deck.dat"));

    let loaded: Deck = catalog.load("Travel Deck.dat").unwrap();
    assert_eq!(loaded.cards(), deck.cards());
    assert_eq!(loaded.name(), "Travel Deck");

    catalog.delete("Travel Deck.dat").unwrap();
    assert!(!catalog.exists("Travel Deck.dat"));
    assert!(matches!(
        catalog.delete("Travel Deck.dat"),
        Err(DeckError::Io { .. })
    ));
}

/// Test that user-supplied names are sanitized.
#[test]
fn test_save_with_unsafe_name() {
    let dir = tempdir().unwrap();
    let catalog = Catalog::open(dir.path()).unwrap();

    let path = catalog.save(&small_deck("Deck"), Some("  a/b:c?  ")).unwrap();
    assert_eq!(path.file_name().unwrap(), "a_b_c_.dat");

    let path = catalog.save(&small_deck("Deck"), Some("   ")).unwrap();
    assert_eq!(path.file_name().unwrap(), "Deck.dat");
}

/// Test that a loaded deck is written back to the same file name.
#[test]
fn test_save_as_rewrites_loaded_file() {
    let dir = tempdir().unwrap();
    let catalog = Catalog::open(dir.path()).unwrap();

    for file_name in ["Mine.DAT", "no_extension", "odd?name.dat"] {
        let path = catalog.save_as(&small_deck("Mine"), file_name).unwrap();
        assert_eq!(path, dir.path().join(file_name));

        let mut deck: Deck = catalog.load(file_name).unwrap();
        deck.draw().unwrap();
        catalog.save_as(&deck, file_name).unwrap();

        let reloaded: Deck = catalog.load(file_name).unwrap();
        assert_eq!(reloaded.size(), 1);
    }

    let mut files: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    files.sort();
    assert_eq!(files, vec!["Mine.DAT", "no_extension", "odd?name.dat"]);
    assert!(matches!(
        catalog.save_as(&small_deck("Mine"), ""),
        Err(DeckError::InvalidArgument(_))
    ));
}

/// Test loading into an existing deck, successful and failing.
#[test]
fn test_load_into_is_all_or_nothing() {
    let dir = tempdir().unwrap();
    let catalog = Catalog::open(dir.path()).unwrap();
    catalog.save(&small_deck("Good"), None).unwrap();
    fs::write(dir.path().join("bad.dat"), [2u8, 0, 0]).unwrap();

    let mut target: Deck = Deck::new(1, "Target", "Me").unwrap();

    let err = catalog.load_into("bad.dat", &mut target).unwrap_err();
    assert!(err.is_corrupt());
    assert_eq!(target.name(), "Target");
    assert!(target.is_empty());

    catalog.load_into("Good.dat", &mut target).unwrap();
    assert_eq!(target.name(), "Good");
    assert_eq!(target.size(), 2);
}

/// Test that empty file names are rejected.
#[test]
fn test_empty_file_name_rejected() {
    let dir = tempdir().unwrap();
    let catalog = Catalog::open(dir.path()).unwrap();

    assert!(matches!(
        catalog.load::<String>(""),
        Err(DeckError::InvalidArgument(_))
    ));
    assert!(matches!(catalog.delete(""), Err(DeckError::InvalidArgument(_))));
    assert!(matches!(catalog.preview(""), Err(DeckError::InvalidArgument(_))));
}

// =============================================================================
// Previews
// =============================================================================

/// Test entries report size and header, and tolerate unreadable files.
#[test]
fn test_entries_with_preview() {
    let dir = tempdir().unwrap();
    let catalog = Catalog::open(dir.path()).unwrap();
    catalog.save(&small_deck("Readable"), None).unwrap();
    fs::write(dir.path().join("junk.dat"), b"not a deck").unwrap();

    let entries = catalog.entries().unwrap();
    assert_eq!(entries.len(), 2);

    let readable = &entries[0];
    assert_eq!(readable.file_name, "Readable.dat");
    assert_eq!(readable.display_name(), "Readable");
    let header = readable.header.as_ref().unwrap();
    assert_eq!(header.card_count, 2);
    assert_eq!(header.capacity, 5);
    assert_eq!(readable.size_bytes, fs::metadata(&readable.path).unwrap().len());

    let junk = &entries[1];
    assert_eq!(junk.file_name, "junk.dat");
    assert!(junk.header.is_none());
    assert_eq!(junk.size_bytes, 10);
}

/// Test preview of a single file.
#[test]
fn test_preview_file() {
    let dir = tempdir().unwrap();
    let catalog = Catalog::open(dir.path()).unwrap();
    catalog.save(&small_deck("Peek"), None).unwrap();

    let header = catalog.preview("Peek.dat").unwrap();
    assert_eq!(header.name, "Peek");
    assert_eq!(header.owner, "Owner");
}

// =============================================================================
// Names
// =============================================================================

/// Test file-name sanitizing rules.
#[test]
fn test_sanitize_rules() {
    assert_eq!(sanitize_file_stem("My Deck"), "My Deck");
    assert_eq!(sanitize_file_stem("<>:\"/\\|?*"), "_________");
    assert_eq!(sanitize_file_stem("  padded\t"), "padded");
    assert_eq!(sanitize_file_stem(""), FALLBACK_FILE_STEM);
    assert_eq!(sanitize_file_stem(" \t "), FALLBACK_FILE_STEM);
    assert_eq!(deck_file_name(""), "unnamed_deck.dat");
}
