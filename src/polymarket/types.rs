use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Position, Side, Trade};

// ---------------------------------------------------------------------------
// Trade (Data API)
// ---------------------------------------------------------------------------

/// Raw trade record as the Data API returns it. Every field is optional;
/// the conversion below pins down the defaults so the core never sees a
/// missing number.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiTrade {
    pub id: Option<String>,
    #[serde(default, alias = "conditionId")]
    pub market: Option<String>,
    #[serde(default, alias = "asset")]
    pub asset_id: Option<String>,
    #[serde(default, alias = "market_title")]
    pub title: Option<String>,
    pub side: Option<String>,
    pub outcome: Option<String>,
    pub price: Option<Decimal>,
    pub size: Option<Decimal>,
    /// Epoch seconds, epoch milliseconds, or an RFC 3339 string,
    /// depending on the endpoint vintage.
    pub timestamp: Option<serde_json::Value>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ApiTrade {
    /// Convert to the domain model.
    ///
    /// Missing numerics become zero, a missing title becomes
    /// "Unknown Market", a missing outcome "Yes", and a missing id is
    /// synthesized from market + timestamp. Returns `None` when the side
    /// is absent or unrecognizable; such records carry no usable
    /// direction and are dropped at this boundary.
    pub fn into_trade(self) -> Option<Trade> {
        let side = Side::from_api_str(self.side.as_deref()?)?;

        let market = self
            .market
            .or(self.asset_id)
            .unwrap_or_else(|| "unknown".into());
        let timestamp =
            parse_timestamp(self.timestamp.as_ref()).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Some(Trade {
            id: self
                .id
                .unwrap_or_else(|| format!("{market}-{}", timestamp.timestamp_millis())),
            market,
            market_title: self.title.unwrap_or_else(|| "Unknown Market".into()),
            side,
            outcome: self.outcome.unwrap_or_else(|| "Yes".into()),
            price: self.price.unwrap_or(Decimal::ZERO),
            size: self.size.unwrap_or(Decimal::ZERO),
            timestamp,
            pnl: None,
            category: self.category,
        })
    }
}

// ---------------------------------------------------------------------------
// Position (Data API)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiPosition {
    #[serde(default, alias = "conditionId")]
    pub market: Option<String>,
    #[serde(default, alias = "asset")]
    pub asset_id: Option<String>,
    #[serde(default, alias = "market_title")]
    pub title: Option<String>,
    pub outcome: Option<String>,
    pub size: Option<Decimal>,
    #[serde(default, alias = "avgPrice", alias = "average_price")]
    pub avg_price: Option<Decimal>,
    #[serde(default, alias = "curPrice", alias = "current_price")]
    pub cur_price: Option<Decimal>,
    #[serde(default, alias = "cashPnl")]
    pub pnl: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ApiPosition {
    pub fn into_position(self) -> Position {
        Position {
            market_id: self
                .market
                .or(self.asset_id)
                .unwrap_or_else(|| "unknown".into()),
            market_title: self.title.unwrap_or_else(|| "Unknown Market".into()),
            outcome: self.outcome.unwrap_or_else(|| "Yes".into()),
            size: self.size.unwrap_or(Decimal::ZERO),
            average_price: self.avg_price.unwrap_or(Decimal::ZERO),
            current_price: self.cur_price.unwrap_or(Decimal::ZERO),
            pnl: self.pnl.unwrap_or(Decimal::ZERO),
            category: self.category,
        }
    }
}

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

/// Decode a Data API timestamp: integer epoch seconds, integer epoch
/// milliseconds (anything above 1e12), the same as strings, or RFC 3339.
fn parse_timestamp(ts: Option<&serde_json::Value>) -> Option<DateTime<Utc>> {
    ts.and_then(|t| match t {
        serde_json::Value::Number(n) => from_epoch(n.as_i64()?),
        serde_json::Value::String(s) => {
            if let Ok(epoch) = s.parse::<i64>() {
                return from_epoch(epoch);
            }
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }
        _ => None,
    })
}

fn from_epoch(value: i64) -> Option<DateTime<Utc>> {
    if value > 1_000_000_000_000 {
        chrono::DateTime::from_timestamp(value / 1000, ((value % 1000) * 1_000_000) as u32)
    } else {
        chrono::DateTime::from_timestamp(value, 0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
