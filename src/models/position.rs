use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Open-position snapshot from the Data API.
///
/// Passed through the wrapped report untouched; the analytics core never
/// values open positions (realized PnL only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub market_id: String,
    pub market_title: String,
    pub outcome: String,
    pub size: Decimal,
    pub average_price: Decimal,
    pub current_price: Decimal,
    pub pnl: Decimal,
    pub category: Option<String>,
}
