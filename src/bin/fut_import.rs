//! fut-import: Extract player items from a capture into JSON records
//!
//! Usage:
//!   # Capture and reference file as arguments, JSON Lines to stdout
//!   fut-import fut.txt --players fut_db.json
//!
//!   # Paths from the environment, pretty JSON array to a file
//!   FUT_CAPTURE=fut.txt FUT_PLAYERS=fut_db.json fut-import --format json -o players.json
//!
//!   # Only gold players, fail if more than 10 items had to be skipped
//!   fut-import fut.txt -p fut_db.json --min-rating 75 --max-skipped-items 10

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use fut_import::{ImportConfig, Importer, OutputFormat, PlayerWriter, ReferenceStore};
use regex::Regex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// One JSON object per line
    Jsonl,
    /// A single JSON array
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Jsonl => OutputFormat::JsonLines,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "fut-import")]
#[command(about = "Extract player items from captured web-app traffic", long_about = None)]
struct Args {
    /// Capture file, one JSON response per line
    #[arg(value_name = "CAPTURE", env = "FUT_CAPTURE")]
    capture: PathBuf,

    /// Reference players export (LegendsPlayers + Players)
    #[arg(long, short = 'p', value_name = "FILE", env = "FUT_PLAYERS")]
    players: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Jsonl)]
    format: Format,

    /// Drop players rated below this value
    #[arg(long)]
    min_rating: Option<i64>,

    /// Keep only players whose resolved name matches this regex
    #[arg(long, value_name = "REGEX")]
    name: Option<String>,

    /// Exit with an error when more items than this were skipped
    #[arg(long)]
    max_skipped_items: Option<usize>,

    /// Print import counters to stderr as JSON
    #[arg(long)]
    summary: bool,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // stdout carries the records
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let mut config = ImportConfig::default();
    config.min_rating = args.min_rating;
    if let Some(pattern) = &args.name {
        let re = Regex::new(pattern).with_context(|| format!("Invalid --name regex: {}", pattern))?;
        config.name_filter = Some(re);
    }

    let store = ReferenceStore::load(&args.players)?;
    if store.is_empty() {
        tracing::warn!(path = %args.players.display(), "reference store is empty, names fall back to asset ids");
    }

    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut writer = PlayerWriter::new(BufWriter::new(output), args.format.into());

    let importer = Importer::new(&store, config);
    let report = importer.import_file(&args.capture, &mut writer)?;
    writer.finish()?;

    if args.summary {
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
    }

    if let Some(max) = args.max_skipped_items {
        if report.exceeds(max) {
            bail!(
                "{} items skipped, more than the allowed {}",
                report.skipped_items,
                max
            );
        }
    }

    Ok(())
}
