//! # fut-import - Player extraction from captured traffic
//!
//! Reads a capture of intercepted web-app responses (one JSON object per
//! line), pulls the player items out of each `itemData` list, and resolves
//! their names against a reference export of the player database.
//!
//! ## Modules
//!
//! - **reference**: asset id to display name lookup, loaded once
//! - **import**: line-by-line capture processing, diagnostics and output sinks
//!
//! ## Quick Start
//!
//! ```rust
//! use fut_import::{ImportConfig, Importer, ReferenceStore};
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = ReferenceStore::from_json(
//!     r#"{"LegendsPlayers":[],"Players":[{"id":100,"f":"Leo","l":"Messi","r":93}]}"#,
//! )?;
//!
//! let capture = r#"{"itemData":[{"itemType":"player","assetId":100,"rating":93,"loyaltyBonus":1,"teamid":5,"nation":52,"preferredPosition":"RW"}]}"#;
//!
//! let importer = Importer::new(&store, ImportConfig::default());
//! let mut players: Vec<fut_import::Player> = Vec::new();
//! let report = importer.import_reader(capture.as_bytes(), &mut players)?;
//!
//! assert_eq!(players[0].name, "Leo, Messi [93]");
//! assert_eq!(players[0].league, "of_team_5");
//! assert!(report.diagnostics.is_empty());
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::io::BufRead;

pub mod import;
pub mod reference;
pub mod types;

pub use import::{
    Diagnostic, ImportReport, Importer, ItemError, LineSkip, OutputFormat, PlayerSink,
    PlayerWriter,
};
pub use reference::{ReferenceError, ReferenceStore};
pub use types::{ImportConfig, Player};

/// Main entry point: import a capture stream with the default configuration
pub fn import_players<R: BufRead, S: PlayerSink + ?Sized>(
    reader: R,
    store: &ReferenceStore,
    sink: &mut S,
) -> Result<ImportReport> {
    Importer::new(store, ImportConfig::default()).import_reader(reader, sink)
}
