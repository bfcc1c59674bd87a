use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Items whose sale is not taxed, keyed by lowercase name.
///
/// Deserializes from the `taxExemptItems.json` shape (`{"<name>": bool}`).
/// Entries mapped to `false` are kept but do not exempt anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, bool>", into = "HashMap<String, bool>")]
pub struct TaxExemptSet {
    items: HashMap<String, bool>,
}

impl TaxExemptSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_exempt(&self, item_name: &str) -> bool {
        self.items
            .get(&item_name.to_lowercase())
            .copied()
            .unwrap_or(false)
    }

    pub fn insert(&mut self, item_name: &str, exempt: bool) {
        self.items.insert(item_name.to_lowercase(), exempt);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<HashMap<String, bool>> for TaxExemptSet {
    fn from(raw: HashMap<String, bool>) -> Self {
        let mut set = Self::new();
        for (name, exempt) in raw {
            set.insert(&name, exempt);
        }
        set
    }
}

impl From<TaxExemptSet> for HashMap<String, bool> {
    fn from(set: TaxExemptSet) -> Self {
        set.items
    }
}

impl<'a> FromIterator<&'a str> for TaxExemptSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name, true);
        }
        set
    }
}
