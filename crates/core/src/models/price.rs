use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One of the seven price snapshots a refresh pulls down.
///
/// `Latest` carries instantaneous prices; every other window carries
/// averages over that interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapshotWindow {
    Latest,
    FiveMinutes,
    TenMinutes,
    ThirtyMinutes,
    OneHour,
    SixHours,
    TwentyFourHours,
}

impl SnapshotWindow {
    /// Fetch order. Index 0 is always the latest snapshot.
    pub const ALL: [SnapshotWindow; 7] = [
        SnapshotWindow::Latest,
        SnapshotWindow::FiveMinutes,
        SnapshotWindow::TenMinutes,
        SnapshotWindow::ThirtyMinutes,
        SnapshotWindow::OneHour,
        SnapshotWindow::SixHours,
        SnapshotWindow::TwentyFourHours,
    ];

    /// Name of the cache file holding this snapshot.
    pub fn file_name(&self) -> &'static str {
        match self {
            SnapshotWindow::Latest => "latest.json",
            SnapshotWindow::FiveMinutes => "5m.json",
            SnapshotWindow::TenMinutes => "10m.json",
            SnapshotWindow::ThirtyMinutes => "30m.json",
            SnapshotWindow::OneHour => "1h.json",
            SnapshotWindow::SixHours => "6h.json",
            SnapshotWindow::TwentyFourHours => "24h.json",
        }
    }
}

impl std::fmt::Display for SnapshotWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotWindow::Latest => write!(f, "latest"),
            SnapshotWindow::FiveMinutes => write!(f, "5m"),
            SnapshotWindow::TenMinutes => write!(f, "10m"),
            SnapshotWindow::ThirtyMinutes => write!(f, "30m"),
            SnapshotWindow::OneHour => write!(f, "1h"),
            SnapshotWindow::SixHours => write!(f, "6h"),
            SnapshotWindow::TwentyFourHours => write!(f, "24h"),
        }
    }
}

/// Prices for a single item inside one snapshot.
///
/// The latest snapshot fills `high`/`low`; windowed snapshots fill the
/// `avg_*` fields. Missing, `null` and zero all mean "no trade observed".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    #[serde(default)]
    pub high: Option<i64>,
    #[serde(default)]
    pub low: Option<i64>,
    #[serde(default)]
    pub avg_high_price: Option<i64>,
    #[serde(default)]
    pub avg_low_price: Option<i64>,
}

impl PriceRecord {
    /// A record as reported by the latest snapshot.
    pub fn instant(high: Option<i64>, low: Option<i64>) -> Self {
        Self {
            high,
            low,
            ..Self::default()
        }
    }

    /// A record as reported by a windowed snapshot.
    pub fn averaged(high: Option<i64>, low: Option<i64>) -> Self {
        Self {
            avg_high_price: high,
            avg_low_price: low,
            ..Self::default()
        }
    }

    /// Sell-side price: the window average if present, else the instantaneous high.
    pub fn sell_price(&self) -> Option<i64> {
        observed(self.avg_high_price).or_else(|| observed(self.high))
    }

    /// Buy-side price: the window average if present, else the instantaneous low.
    pub fn buy_price(&self) -> Option<i64> {
        observed(self.avg_low_price).or_else(|| observed(self.low))
    }
}

fn observed(price: Option<i64>) -> Option<i64> {
    price.filter(|p| *p > 0)
}

/// A full snapshot: item id → prices. Items with no recent trades are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    #[serde(default)]
    pub timestamp: Option<i64>,
    pub data: HashMap<u32, PriceRecord>,
}

impl PriceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for assembling fixtures.
    pub fn with(mut self, id: u32, record: PriceRecord) -> Self {
        self.data.insert(id, record);
        self
    }

    pub fn get(&self, id: u32) -> Option<&PriceRecord> {
        self.data.get(&id)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
