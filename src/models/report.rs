use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Position, Trade, TradingStats};

/// The composite year-in-review snapshot served to every consumer.
///
/// Opaque and serializable: renderers and exporters read fields, nothing
/// re-derives statistics from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrappedReport {
    pub address: String,
    pub year: i32,
    pub stats: TradingStats,
    /// Most recent trades, capped by the caller's recency window.
    pub trades: Vec<Trade>,
    pub positions: Vec<Position>,
    pub generated_at: DateTime<Utc>,
}

/// Database row for the pincodes table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PinCode {
    pub code: String,
    pub address: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
}

impl PinCode {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
