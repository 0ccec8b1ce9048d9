use regex::Regex;
use serde::{Deserialize, Serialize};

/// A player item extracted from a capture line and enriched with its display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Item identifier, also the key into the reference store
    pub asset_id: i64,

    /// Display name from the reference store, or the stringified asset id
    pub name: String,

    /// Overall rating
    pub rating: i64,

    pub loyalty_bonus: bool,

    /// Stringified team id
    pub team: String,

    /// Synthetic league derived from the team id, e.g. "of_team_5"
    pub league: String,

    /// Stringified nation id
    pub nation: String,

    /// Preferred position code, e.g. "ST"
    pub position: String,
}

/// Configuration for the import pass
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Key holding the item list on each capture line
    pub item_data_key: String,

    /// Value of `itemType` that marks an item as a player
    pub player_item_type: String,

    /// Prefix for the synthetic league string
    pub league_prefix: String,

    /// Drop players rated below this value
    pub min_rating: Option<i64>,

    /// Keep only players whose resolved name matches
    pub name_filter: Option<Regex>,
}

impl ImportConfig {
    /// Whether a parsed player survives the configured filters
    pub fn accepts(&self, player: &Player) -> bool {
        if let Some(min) = self.min_rating {
            if player.rating < min {
                return false;
            }
        }

        match &self.name_filter {
            Some(re) => re.is_match(&player.name),
            None => true,
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            item_data_key: String::from("itemData"),
            player_item_type: String::from("player"),
            league_prefix: String::from("of_team_"),
            min_rating: None,
            name_filter: None,
        }
    }
}
