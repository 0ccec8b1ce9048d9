use crate::import::item::{ItemError, RawPlayer};
use crate::import::writer::PlayerSink;
use crate::reference::ReferenceStore;
use crate::types::{ImportConfig, Player};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Why a whole capture line was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineSkip {
    #[error("not JSON")]
    NotJson,

    #[error("no itemData")]
    NoItemData,

    #[error("itemData is not an array")]
    ItemDataNotArray,
}

/// A skipped unit of input. Lines are 1-indexed, items 0-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    SkippedLine {
        line: usize,
        reason: LineSkip,
    },
    SkippedItem {
        line: usize,
        item: usize,
        reason: ItemError,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SkippedLine { line, reason } => write!(f, "skip line {}, {}", line, reason),
            Diagnostic::SkippedItem { line, item, reason } => {
                write!(f, "skip item {} from line {}, {}", item, line, reason)
            }
        }
    }
}

/// Outcome of one import pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Lines read from the capture
    pub lines: usize,
    pub skipped_lines: usize,
    /// Items examined on lines that carried an item list
    pub items: usize,
    pub skipped_items: usize,
    /// Players delivered to the sink
    pub players: usize,
    /// Players rejected by the configured filters
    pub filtered: usize,
    #[serde(skip)]
    pub diagnostics: Vec<Diagnostic>,
}

impl ImportReport {
    /// Whether more items were skipped than `max_skipped_items` allows
    pub fn exceeds(&self, max_skipped_items: usize) -> bool {
        self.skipped_items > max_skipped_items
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::SkippedLine { line, reason } => {
                tracing::warn!(line, reason = %reason, "skipping line");
                self.skipped_lines += 1;
            }
            Diagnostic::SkippedItem { line, item, reason } => {
                tracing::warn!(line, item, reason = %reason, "skipping item");
                self.skipped_items += 1;
            }
        }
        self.diagnostics.push(diagnostic);
    }
}

/// Turns capture lines into enriched players
pub struct Importer<'a> {
    store: &'a ReferenceStore,
    config: ImportConfig,
}

impl<'a> Importer<'a> {
    pub fn new(store: &'a ReferenceStore, config: ImportConfig) -> Self {
        Importer { store, config }
    }

    /// Run one pass over a capture file
    pub fn import_file<P, S>(&self, path: P, sink: &mut S) -> Result<ImportReport>
    where
        P: AsRef<Path>,
        S: PlayerSink + ?Sized,
    {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open capture file: {}", path.display()))?;

        let report = self
            .import_reader(BufReader::new(file), sink)
            .with_context(|| format!("Failed to import capture file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            lines = report.lines,
            players = report.players,
            skipped_lines = report.skipped_lines,
            skipped_items = report.skipped_items,
            filtered = report.filtered,
            "import finished"
        );
        Ok(report)
    }

    /// Run one pass over newline-delimited capture data
    ///
    /// Malformed lines and items are recorded in the report and skipped.
    /// Only read failures and sink failures abort the pass.
    pub fn import_reader<R, S>(&self, reader: R, sink: &mut S) -> Result<ImportReport>
    where
        R: BufRead,
        S: PlayerSink + ?Sized,
    {
        let mut report = ImportReport::default();

        for (idx, line) in reader.split(b'\n').enumerate() {
            let line = line.context("Failed to read line")?;
            let line_no = idx + 1;
            report.lines += 1;

            let items = match self.line_items(&line) {
                Ok(items) => items,
                Err(reason) => {
                    report.record(Diagnostic::SkippedLine {
                        line: line_no,
                        reason,
                    });
                    continue;
                }
            };
            tracing::debug!(line = line_no, items = items.len(), "processing line");

            for (item_idx, item) in items.iter().enumerate() {
                report.items += 1;

                match self.parse_item(item) {
                    Ok(player) if self.config.accepts(&player) => {
                        sink.accept(player)?;
                        report.players += 1;
                    }
                    Ok(_) => report.filtered += 1,
                    Err(reason) => report.record(Diagnostic::SkippedItem {
                        line: line_no,
                        item: item_idx,
                        reason,
                    }),
                }
            }
        }

        Ok(report)
    }

    /// Extract the item list from one raw capture line
    pub fn line_items(&self, line: &[u8]) -> Result<Vec<Value>, LineSkip> {
        let value: Value = serde_json::from_slice(line).map_err(|_| LineSkip::NotJson)?;

        let Value::Object(mut obj) = value else {
            return Err(LineSkip::NoItemData);
        };

        match obj.remove(&self.config.item_data_key) {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(LineSkip::ItemDataNotArray),
            None => Err(LineSkip::NoItemData),
        }
    }

    /// Build a player from one item, resolving its name through the store
    pub fn parse_item(&self, item: &Value) -> Result<Player, ItemError> {
        let raw = RawPlayer::from_item(item, &self.config.player_item_type)?;

        let name = self
            .store
            .get_name(raw.asset_id)
            .map(str::to_owned)
            .unwrap_or_else(|| raw.asset_id.to_string());

        Ok(Player {
            asset_id: raw.asset_id,
            name,
            rating: raw.rating,
            loyalty_bonus: raw.loyalty_bonus,
            team: raw.team_id.to_string(),
            league: format!("{}{}", self.config.league_prefix, raw.team_id),
            nation: raw.nation_id.to_string(),
            position: raw.position,
        })
    }
}
