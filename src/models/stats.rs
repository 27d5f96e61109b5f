use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::persona::PersonaProfile;

use super::Trade;

/// Per-category rollup row (count + traded volume).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub trades: usize,
    pub volume: Decimal,
}

/// One `YYYY-MM` activity bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyActivity {
    pub month: String,
    pub trades: usize,
    pub volume: Decimal,
    pub pnl: Decimal,
}

/// Trade count for the single most-traded market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketActivity {
    pub market_title: String,
    pub trades: usize,
}

/// The aggregate result of one statistics pass.
///
/// Constructed once per report, never mutated afterwards; downstream
/// consumers only read fields. `best_trade`/`worst_trade` and the
/// first/last timestamps are `None` exactly when the account has no
/// PnL-bearing trades (resp. no trades at all).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingStats {
    pub total_trades: usize,
    /// Σ price×size over every trade, opening and closing alike.
    pub total_volume: Decimal,
    /// Σ realized PnL assigned by the position ledger.
    pub total_pnl: Decimal,
    /// Wins over wins+losses; break-even trades count toward neither.
    pub win_rate: Decimal,
    pub best_trade: Option<Trade>,
    pub worst_trade: Option<Trade>,
    /// Up to five categories, volume-descending.
    pub favorite_categories: Vec<CategoryBreakdown>,
    /// Buckets in ascending `YYYY-MM` order (UTC).
    pub monthly_activity: Vec<MonthlyActivity>,
    pub trading_persona: PersonaProfile,
    pub unique_markets: usize,
    pub average_trade_size: Decimal,
    pub longest_win_streak: u32,
    pub longest_loss_streak: u32,
    pub total_wins: usize,
    pub total_losses: usize,
    pub first_trade_at: Option<DateTime<Utc>>,
    pub last_trade_at: Option<DateTime<Utc>>,
    pub most_traded_market: Option<MarketActivity>,
}
