//! Reference data - asset id to display name lookup
//!
//! The reference export carries two arrays of player entries
//! (`LegendsPlayers` and `Players`). Both are folded into one in-memory
//! table at load time; the table is read-only afterwards.

pub mod store;

pub use store::{ReferenceDocument, ReferenceEntry, ReferenceError, ReferenceStore};
