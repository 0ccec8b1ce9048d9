//! Capture import - turn newline-delimited captures into players
//!
//! Each capture line is parsed on its own. Lines that are not JSON or carry
//! no `itemData` list are skipped whole; inside a list, every item that is
//! not a well-formed player is skipped on its own. Both kinds of skip end up
//! as `Diagnostic`s in the `ImportReport` and never abort the pass.

pub mod importer;
pub mod item;
pub mod writer;

pub use importer::{Diagnostic, ImportReport, Importer, LineSkip};
pub use item::{is_truthy, ItemError, RawPlayer};
pub use writer::{OutputFormat, PlayerSink, PlayerWriter};
