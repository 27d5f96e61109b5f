use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Side;

/// One executed fill for an account.
///
/// `pnl` is `None` until the position ledger annotates the trade; a
/// position-opening trade carries `Some(0)` afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    /// Market (condition) identifier.
    pub market: String,
    pub market_title: String,
    pub side: Side,
    /// Outcome label, e.g. "Yes" / "No".
    pub outcome: String,
    pub price: Decimal,
    pub size: Decimal,
    pub timestamp: DateTime<Utc>,
    pub pnl: Option<Decimal>,
    pub category: Option<String>,
}

impl Trade {
    /// Traded notional value (price × size).
    pub fn notional(&self) -> Decimal {
        self.price * self.size
    }

    /// Category label, falling back to "Other" for uncategorized markets.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("Other")
    }
}
