//! Validated view of one `itemData` entry

use serde_json::{Map, Value};
use thiserror::Error;

/// Why an item could not become a player. Recorded as a diagnostic, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("item is not an object")]
    NotAnObject,

    #[error("not a player itemType: {0}")]
    NotPlayer(String),

    #[error("missing field {0}")]
    MissingField(&'static str),

    #[error("field {field} is not {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

/// Raw player fields, type-checked but not yet enriched
#[derive(Debug, Clone, PartialEq)]
pub struct RawPlayer {
    pub asset_id: i64,
    pub rating: i64,
    pub loyalty_bonus: bool,
    pub team_id: i64,
    pub nation_id: i64,
    pub position: String,
}

impl RawPlayer {
    /// Check the item type and pull the required fields out of an item
    pub fn from_item(item: &Value, player_item_type: &str) -> Result<Self, ItemError> {
        let obj = item.as_object().ok_or(ItemError::NotAnObject)?;

        match obj.get("itemType") {
            Some(Value::String(t)) if t == player_item_type => {}
            Some(Value::String(t)) => return Err(ItemError::NotPlayer(t.clone())),
            Some(other) => return Err(ItemError::NotPlayer(other.to_string())),
            None => return Err(ItemError::NotPlayer("none".to_string())),
        }

        let asset_id = integer(obj, "assetId")?;
        let rating = integer(obj, "rating")?;
        let loyalty_bonus = is_truthy(field(obj, "loyaltyBonus")?);
        let team_id = integer(obj, "teamid")?;
        let nation_id = integer(obj, "nation")?;
        let position = field(obj, "preferredPosition")?
            .as_str()
            .ok_or(ItemError::InvalidField {
                field: "preferredPosition",
                expected: "a string",
            })?
            .to_string();

        Ok(RawPlayer {
            asset_id,
            rating,
            loyalty_bonus,
            team_id,
            nation_id,
            position,
        })
    }
}

fn field<'a>(obj: &'a Map<String, Value>, name: &'static str) -> Result<&'a Value, ItemError> {
    obj.get(name).ok_or(ItemError::MissingField(name))
}

fn integer(obj: &Map<String, Value>, name: &'static str) -> Result<i64, ItemError> {
    field(obj, name)?.as_i64().ok_or(ItemError::InvalidField {
        field: name,
        expected: "an integer",
    })
}

/// JSON truthiness: null, false, zero, "", [] and {} are false
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
