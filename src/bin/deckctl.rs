//! Command-line front end for deck save directories.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rust_deck::{Catalog, Deck, DeckConfig, DeckRng};

#[derive(Parser, Debug)]
#[command(name = "deckctl", about = "Inspect and manage saved card decks")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Save directory (overrides the configuration)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Fixed shuffle seed (overrides the configuration)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List deck files with a header preview
    List,
    /// Create an empty deck file
    New {
        /// File name (".dat" is appended)
        file: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        capacity: Option<usize>,
    },
    /// Print every card in a deck file
    Show { file: String },
    /// Shuffle a deck file in place
    Shuffle { file: String },
    /// Draw cards from the top of a deck file
    Draw {
        file: String,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Delete a deck file
    Delete { file: String },
}

fn main() {
    init_logging();

    if let Err(err) = run(Cli::parse()) {
        tracing::error!("{err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<DeckConfig> {
    let mut config: DeckConfig = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => DeckConfig::default(),
    };
    if let Some(dir) = &cli.dir {
        config.save_dir = dir.clone();
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let catalog = Catalog::from_config(&config)?;

    match cli.command {
        Command::List => {
            let entries = catalog.entries()?;
            if entries.is_empty() {
                println!("No saved deck files found in: {}", catalog.root().display());
                return Ok(());
            }
            println!("{:<5}{:<25}{:<20}{:<10}File Size", "No.", "Filename", "Deck Name", "Cards");
            println!("{}", "-".repeat(70));
            for (i, entry) in entries.iter().enumerate() {
                let cards = entry
                    .header
                    .as_ref()
                    .map(|h| format!("{}/{}", h.card_count, h.capacity))
                    .unwrap_or_else(|| "?".to_string());
                println!(
                    "{:<5}{:<25}{:<20}{:<10}{} bytes",
                    i + 1,
                    entry.file_name,
                    entry.display_name(),
                    cards,
                    entry.size_bytes
                );
            }
        }
        Command::New {
            file,
            name,
            owner,
            capacity,
        } => {
            let deck: Deck = Deck::new(
                capacity.unwrap_or(config.capacity),
                name.unwrap_or_else(|| config.deck_name.clone()),
                owner.unwrap_or_else(|| config.owner.clone()),
            )?;
            let path = catalog.save(&deck, Some(file.as_str()))?;
            println!("Created {}", path.display());
        }
        Command::Show { file } => {
            let deck: Deck = catalog.load(&file)?;
            println!("{}", deck.display_all());
            println!("Total value: {}", deck.total_value());
        }
        Command::Shuffle { file } => {
            let mut deck: Deck = catalog.load(&file)?;
            if let Some(seed) = config.seed {
                deck.set_rng(DeckRng::new(seed));
            }
            deck.shuffle()?;
            catalog.save_as(&deck, &file)?;
            for (i, card) in deck.iter().enumerate() {
                println!("{:>3}. {card}", i + 1);
            }
        }
        Command::Draw { file, count } => {
            let mut deck: Deck = catalog.load(&file)?;
            for _ in 0..count {
                let card = deck.draw()?;
                println!("{}\n", card.render());
            }
            catalog.save_as(&deck, &file)?;
            println!("{deck}");
        }
        Command::Delete { file } => {
            catalog.delete(&file)?;
            println!("Deleted {file}");
        }
    }

    Ok(())
}
