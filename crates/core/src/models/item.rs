use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the static item mapping (`mapping.json`).
///
/// Only `id` and `name` are required; the rest is carried through for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub examine: Option<String>,
    #[serde(default)]
    pub members: Option<bool>,
    /// GE buy limit per four hours.
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub highalch: Option<i64>,
}

impl MappingEntry {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            examine: None,
            members: None,
            limit: None,
            highalch: None,
        }
    }
}

/// A tradeable item with its prices aggregated across every snapshot window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub members: Option<bool>,
    pub limit: Option<u32>,
    pub high_alch: Option<i64>,

    /// Best sell price seen in any window; 0 when nothing was observed.
    pub max_high: i64,

    /// Best buy price seen in any window; `None` when no window reported one.
    pub min_low: Option<i64>,

    /// Instantaneous prices from the latest snapshot (0 when absent).
    pub current_high: i64,
    pub current_low: i64,
}

impl Item {
    /// Whether a buy price is known for this item.
    pub fn has_buy_price(&self) -> bool {
        self.min_low.is_some()
    }
}

/// Items keyed by id, with a case-insensitive name index.
///
/// The name index is the only join between recipes and prices. When two
/// mapping rows share a name, the later one wins the name slot.
#[derive(Debug, Clone, Default)]
pub struct ItemTable {
    by_id: HashMap<u32, Item>,
    by_name: HashMap<String, u32>,
}

impl ItemTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: Item) {
        self.by_name.insert(item.name.to_lowercase(), item.id);
        self.by_id.insert(item.id, item);
    }

    pub fn get(&self, id: u32) -> Option<&Item> {
        self.by_id.get(&id)
    }

    /// Case-insensitive lookup by item name.
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.by_name
            .get(&name.to_lowercase())
            .and_then(|id| self.by_id.get(id))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.by_id.values()
    }
}

impl FromIterator<Item> for ItemTable {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut table = Self::new();
        for item in iter {
            table.insert(item);
        }
        table
    }
}
