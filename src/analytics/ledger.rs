use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{Side, Trade};

/// Running cost basis for one (market, outcome) pair during a single pass.
/// `avg_price` is meaningful only while `size > 0`.
#[derive(Debug, Default)]
struct OpenPosition {
    size: Decimal,
    avg_price: Decimal,
}

/// Assign a realized PnL to every trade of one account.
///
/// Trades are re-sorted by timestamp ascending (stable, so ties keep their
/// input order) before assignment, which makes the weighted-average cost
/// basis, and therefore the whole downstream computation, independent of
/// the order the upstream API returned them in.
///
/// Rules, per (market, outcome) pair:
/// - A buy re-weights the average entry price and never realizes PnL.
/// - A sell realizes `(price − avg_price) × min(size, held)`; the held size
///   is clamped at zero. There is no short inventory: selling more than is
///   held realizes PnL only on the tracked portion.
///
/// The input is left untouched; a new annotated vector is returned with
/// `pnl: Some(_)` on every trade (zero for opens).
pub fn assign_realized_pnl(trades: &[Trade]) -> Vec<Trade> {
    let mut ordered: Vec<Trade> = trades.to_vec();
    ordered.sort_by_key(|t| t.timestamp);

    let mut book: HashMap<(String, String), OpenPosition> = HashMap::new();

    for trade in &mut ordered {
        let key = (trade.market.clone(), trade.outcome.clone());
        let position = book.entry(key).or_default();

        let pnl = match trade.side {
            Side::Buy => {
                let new_size = position.size + trade.size;
                // Zero-size fills must not disturb the average price.
                if new_size > Decimal::ZERO {
                    position.avg_price = (position.avg_price * position.size
                        + trade.price * trade.size)
                        / new_size;
                    position.size = new_size;
                }
                Decimal::ZERO
            }
            Side::Sell => {
                let matched = trade.size.min(position.size);
                let realized = (trade.price - position.avg_price) * matched;
                position.size = (position.size - trade.size).max(Decimal::ZERO);
                realized
            }
        };

        trade.pnl = Some(pnl);
    }

    ordered
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
