use tracing::debug;

use crate::models::item::{Item, ItemTable, MappingEntry};
use crate::models::price::PriceSnapshot;

/// Folds the latest snapshot and the windowed snapshots into one `Item` per mapping row.
///
/// Pure: no I/O. `snapshots[0]` must be the latest (instantaneous) snapshot;
/// the remaining entries are the averaged windows in any order.
///
/// Aggregation rules:
/// - **max_high**: maximum sell price over every snapshot that lists the item, or 0.
/// - **min_low**: minimum buy price over the same snapshots, or `None` when no
///   snapshot reported one. Never an unbounded value.
/// - **current_high / current_low**: taken from the latest snapshot only, 0 when absent.
pub struct PriceService;

impl PriceService {
    pub fn new() -> Self {
        Self
    }

    /// Build the full item table. Items missing from every snapshot are still
    /// included, with empty prices.
    pub fn aggregate(&self, mapping: &[MappingEntry], snapshots: &[PriceSnapshot]) -> ItemTable {
        let table: ItemTable = mapping
            .iter()
            .map(|entry| self.aggregate_item(entry, snapshots))
            .collect();
        debug!(
            items = table.len(),
            snapshots = snapshots.len(),
            "aggregated price snapshots"
        );
        table
    }

    /// Aggregate a single mapping row across all snapshots.
    pub fn aggregate_item(&self, entry: &MappingEntry, snapshots: &[PriceSnapshot]) -> Item {
        let records: Vec<_> = snapshots.iter().filter_map(|s| s.get(entry.id)).collect();

        let max_high = records
            .iter()
            .filter_map(|r| r.sell_price())
            .max()
            .unwrap_or(0);
        let min_low = records.iter().filter_map(|r| r.buy_price()).min();

        let latest = snapshots.first().and_then(|s| s.get(entry.id));
        let current_high = latest.and_then(|r| r.high).unwrap_or(0);
        let current_low = latest.and_then(|r| r.low).unwrap_or(0);

        Item {
            id: entry.id,
            name: entry.name.clone(),
            members: entry.members,
            limit: entry.limit,
            high_alch: entry.highalch,
            max_high,
            min_low,
            current_high,
            current_low,
        }
    }
}

impl Default for PriceService {
    fn default() -> Self {
        Self::new()
    }
}
