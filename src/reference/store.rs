use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to build a reference store. Always fatal for an import run.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to read reference file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid reference document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid reference document: {0}")]
    Simd(String),
}

impl From<simd_json::Error> for ReferenceError {
    fn from(err: simd_json::Error) -> Self {
        let message = match err.error() {
            simd_json::ErrorType::Serde(msg) => msg.to_string(),
            _ => err.to_string(),
        };
        ReferenceError::Simd(message)
    }
}

/// One player entry of the reference export
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceEntry {
    pub id: i64,
    #[serde(rename = "f")]
    pub first_name: String,
    #[serde(rename = "l")]
    pub last_name: String,
    /// Shown as-is; strings without quotes
    #[serde(rename = "r")]
    pub rating: Value,
}

impl ReferenceEntry {
    /// Display form used as the player name: "<first>, <last> [<rating>]"
    pub fn display_name(&self) -> String {
        let rating = match &self.rating {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        format!("{}, {} [{}]", self.first_name, self.last_name, rating)
    }
}

/// Top-level shape of the reference export. Both arrays are required.
#[derive(Debug, Deserialize)]
pub struct ReferenceDocument {
    #[serde(rename = "LegendsPlayers")]
    pub legends: Vec<ReferenceEntry>,
    #[serde(rename = "Players")]
    pub players: Vec<ReferenceEntry>,
}

/// Immutable lookup from asset id to display name
#[derive(Debug, Clone, Default)]
pub struct ReferenceStore {
    names: HashMap<i64, String>,
}

impl ReferenceStore {
    /// Build the store from an already parsed document.
    ///
    /// Legends are inserted first, so a regular entry sharing an id wins.
    pub fn from_document(doc: ReferenceDocument) -> Self {
        let mut names = HashMap::with_capacity(doc.legends.len() + doc.players.len());
        for entry in doc.legends.iter().chain(doc.players.iter()) {
            names.insert(entry.id, entry.display_name());
        }
        ReferenceStore { names }
    }

    /// Parse reference content held in memory
    pub fn from_json(content: &str) -> Result<Self, ReferenceError> {
        let doc: ReferenceDocument = serde_json::from_str(content)?;
        Ok(Self::from_document(doc))
    }

    /// Read and parse a reference file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ReferenceError> {
        let path = path.as_ref();
        let mut content = std::fs::read(path).map_err(|source| ReferenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let doc: ReferenceDocument = simd_json::serde::from_slice(&mut content)?;
        let store = Self::from_document(doc);

        tracing::info!(
            path = %path.display(),
            entries = store.len(),
            "loaded reference store"
        );
        Ok(store)
    }

    pub fn get_name(&self, asset_id: i64) -> Option<&str> {
        self.names.get(&asset_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MESSI: &str = r#"{"LegendsPlayers":[],"Players":[{"id":100,"f":"Leo","l":"Messi","r":93}]}"#;

    #[test]
    fn test_display_name_format() {
        let store = ReferenceStore::from_json(MESSI).unwrap();
        assert_eq!(store.get_name(100), Some("Leo, Messi [93]"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_id_is_none() {
        let store = ReferenceStore::from_json(MESSI).unwrap();
        assert_eq!(store.get_name(999), None);
    }

    #[test]
    fn test_legends_and_players_are_merged() {
        let content = r#"{
            "LegendsPlayers": [{"id": 1, "f": "Pele", "l": "Nascimento", "r": 98}],
            "Players": [{"id": 2, "f": "Kylian", "l": "Mbappe", "r": 91, "c": "Mbappe"}]
        }"#;
        let store = ReferenceStore::from_json(content).unwrap();
        assert_eq!(store.get_name(1), Some("Pele, Nascimento [98]"));
        assert_eq!(store.get_name(2), Some("Kylian, Mbappe [91]"));
    }

    #[test]
    fn test_duplicate_id_last_write_wins() {
        let content = r#"{
            "LegendsPlayers": [{"id": 7, "f": "Old", "l": "Entry", "r": 90}],
            "Players": [{"id": 7, "f": "New", "l": "Entry", "r": 80}]
        }"#;
        let store = ReferenceStore::from_json(content).unwrap();
        assert_eq!(store.get_name(7), Some("New, Entry [80]"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_array_is_fatal() {
        let err = ReferenceStore::from_json(r#"{"Players": []}"#).unwrap_err();
        assert!(matches!(err, ReferenceError::Json(_)));
        assert!(err.to_string().contains("LegendsPlayers"));
    }

    #[test]
    fn test_loose_rating_values() {
        let content = r#"{
            "LegendsPlayers": [{"id": 1, "f": "Leo", "l": "Messi", "r": "93"}],
            "Players": [
                {"id": 2, "f": "Half", "l": "Point", "r": 93.5},
                {"id": 3, "f": "No", "l": "Rating", "r": null}
            ]
        }"#;
        let store = ReferenceStore::from_json(content).unwrap();
        assert_eq!(store.get_name(1), Some("Leo, Messi [93]"));
        assert_eq!(store.get_name(2), Some("Half, Point [93.5]"));
        assert_eq!(store.get_name(3), Some("No, Rating [null]"));
    }

    #[test]
    fn test_negative_id() {
        let content = r#"{"LegendsPlayers": [], "Players": [{"id": -4, "f": "A", "l": "B", "r": 50}]}"#;
        let store = ReferenceStore::from_json(content).unwrap();
        assert_eq!(store.get_name(-4), Some("A, B [50]"));
    }

    #[test]
    fn test_invalid_json_is_fatal() {
        assert!(ReferenceStore::from_json("not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MESSI.as_bytes()).unwrap();

        let store = ReferenceStore::load(file.path()).unwrap();
        assert_eq!(store.get_name(100), Some("Leo, Messi [93]"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReferenceStore::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ReferenceError::Io { .. }));
    }

    #[test]
    fn test_load_string_rating() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"LegendsPlayers":[],"Players":[{"id":100,"f":"Leo","l":"Messi","r":"93"}]}"#)
            .unwrap();

        let store = ReferenceStore::load(file.path()).unwrap();
        assert_eq!(store.get_name(100), Some("Leo, Messi [93]"));
    }

    #[test]
    fn test_load_missing_array_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"Players": []}"#).unwrap();

        let err = ReferenceStore::load(file.path()).unwrap_err();
        assert!(matches!(err, ReferenceError::Simd(_)));
        let message = err.to_string();
        assert!(message.contains("missing field `LegendsPlayers`"));
        assert!(!message.contains("Serde("));
    }

    #[test]
    fn test_empty_store() {
        let store = ReferenceStore::from_json(r#"{"LegendsPlayers": [], "Players": []}"#).unwrap();
        assert!(store.is_empty());
        assert!(!ReferenceStore::from_json(MESSI).unwrap().is_empty());
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"LegendsPlayers": []"#).unwrap();
        assert!(ReferenceStore::load(file.path()).is_err());
    }
}
