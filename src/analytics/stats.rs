use std::collections::{BTreeMap, HashMap, HashSet};

use rust_decimal::Decimal;

use crate::models::{
    CategoryBreakdown, MarketActivity, MonthlyActivity, Position, Trade, TradingStats,
};

use super::ledger::assign_realized_pnl;
use super::persona::{classify, Persona, PersonaFeatures};

/// How many favorite categories the report keeps.
const FAVORITE_CATEGORY_LIMIT: usize = 5;

/// Compute the aggregate statistics for one account.
///
/// Total over its input domain: an empty trade list yields the zero
/// sentinel (persona `CautiousBettor`), never an error. The position
/// snapshot rides along in the report envelope but does not enter any
/// metric; only realized PnL is scored.
///
/// The result is a pure function of the trade *set*: the ledger re-sorts
/// by timestamp internally, so callers may pass trades in any order.
pub fn compute_stats(trades: &[Trade], _positions: &[Position]) -> TradingStats {
    if trades.is_empty() {
        return empty_stats();
    }

    let annotated = assign_realized_pnl(trades);

    let total_volume: Decimal = annotated.iter().map(Trade::notional).sum();
    let total_pnl: Decimal = annotated.iter().filter_map(|t| t.pnl).sum();
    let average_trade_size = total_volume / Decimal::from(annotated.len() as u64);

    let (total_wins, total_losses) = win_loss_counts(&annotated);
    let win_rate = win_rate(total_wins, total_losses);
    let (best_trade, worst_trade) = best_and_worst(&annotated);
    let (longest_win_streak, longest_loss_streak) = streaks(&annotated);

    let trading_persona = classify(&PersonaFeatures {
        total_trades: annotated.len(),
        total_volume,
        win_rate,
        average_trade_size,
        total_pnl,
    })
    .profile();

    let unique_markets = annotated
        .iter()
        .map(|t| t.market.as_str())
        .collect::<HashSet<_>>()
        .len();

    TradingStats {
        total_trades: annotated.len(),
        total_volume,
        total_pnl,
        win_rate,
        best_trade,
        worst_trade,
        favorite_categories: favorite_categories(&annotated),
        monthly_activity: monthly_activity(&annotated),
        trading_persona,
        unique_markets,
        average_trade_size,
        longest_win_streak,
        longest_loss_streak,
        total_wins,
        total_losses,
        first_trade_at: annotated.first().map(|t| t.timestamp),
        last_trade_at: annotated.last().map(|t| t.timestamp),
        most_traded_market: most_traded_market(&annotated),
    }
}

/// The documented zero sentinel for accounts with no trades.
pub fn empty_stats() -> TradingStats {
    TradingStats {
        total_trades: 0,
        total_volume: Decimal::ZERO,
        total_pnl: Decimal::ZERO,
        win_rate: Decimal::ZERO,
        best_trade: None,
        worst_trade: None,
        favorite_categories: Vec::new(),
        monthly_activity: Vec::new(),
        trading_persona: Persona::CautiousBettor.profile(),
        unique_markets: 0,
        average_trade_size: Decimal::ZERO,
        longest_win_streak: 0,
        longest_loss_streak: 0,
        total_wins: 0,
        total_losses: 0,
        first_trade_at: None,
        last_trade_at: None,
        most_traded_market: None,
    }
}

// ---------------------------------------------------------------------------
// Win / loss
// ---------------------------------------------------------------------------

/// Count winning and losing trades. Break-even trades (PnL exactly zero,
/// which includes every position-opening trade) count toward neither.
pub fn win_loss_counts(trades: &[Trade]) -> (usize, usize) {
    let mut wins = 0;
    let mut losses = 0;
    for trade in trades {
        match trade.pnl {
            Some(p) if p > Decimal::ZERO => wins += 1,
            Some(p) if p < Decimal::ZERO => losses += 1,
            _ => {}
        }
    }
    (wins, losses)
}

/// Wins over wins+losses; zero when nothing settled either way.
pub fn win_rate(wins: usize, losses: usize) -> Decimal {
    let settled = wins + losses;
    if settled == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(wins as u64) / Decimal::from(settled as u64)
}

// ---------------------------------------------------------------------------
// Extremes
// ---------------------------------------------------------------------------

/// Arg-max and arg-min of PnL over PnL-annotated trades.
///
/// A left fold that only replaces on a strict improvement, so ties go to
/// the earliest trade in ledger order.
pub fn best_and_worst(trades: &[Trade]) -> (Option<Trade>, Option<Trade>) {
    let mut best: Option<&Trade> = None;
    let mut worst: Option<&Trade> = None;

    for trade in trades {
        let Some(pnl) = trade.pnl else { continue };

        if best.and_then(|b| b.pnl).map_or(true, |bp| pnl > bp) {
            best = Some(trade);
        }
        if worst.and_then(|w| w.pnl).map_or(true, |wp| pnl < wp) {
            worst = Some(trade);
        }
    }

    (best.cloned(), worst.cloned())
}

// ---------------------------------------------------------------------------
// Rollups
// ---------------------------------------------------------------------------

/// Top categories by traded volume, descending, capped at five.
/// Volume ties resolve to the category seen first in ledger order.
pub fn favorite_categories(trades: &[Trade]) -> Vec<CategoryBreakdown> {
    let mut by_category: HashMap<&str, (usize, Decimal, usize)> = HashMap::new();

    for (idx, trade) in trades.iter().enumerate() {
        let entry = by_category
            .entry(trade.category_label())
            .or_insert((0, Decimal::ZERO, idx));
        entry.0 += 1;
        entry.1 += trade.notional();
    }

    let mut rows: Vec<(&str, usize, Decimal, usize)> = by_category
        .into_iter()
        .map(|(category, (count, volume, first_seen))| (category, count, volume, first_seen))
        .collect();

    // HashMap iteration order is arbitrary; the first-seen index pins ties.
    rows.sort_by(|a, b| b.2.cmp(&a.2).then(a.3.cmp(&b.3)));
    rows.truncate(FAVORITE_CATEGORY_LIMIT);

    rows.into_iter()
        .map(|(category, count, volume, _)| CategoryBreakdown {
            category: category.to_string(),
            trades: count,
            volume,
        })
        .collect()
}

/// Activity bucketed by `YYYY-MM`, ascending. Months are derived in UTC so
/// the same trade set buckets identically on every host.
pub fn monthly_activity(trades: &[Trade]) -> Vec<MonthlyActivity> {
    let mut buckets: BTreeMap<String, (usize, Decimal, Decimal)> = BTreeMap::new();

    for trade in trades {
        let key = trade.timestamp.format("%Y-%m").to_string();
        let entry = buckets
            .entry(key)
            .or_insert((0, Decimal::ZERO, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += trade.notional();
        entry.2 += trade.pnl.unwrap_or_default();
    }

    buckets
        .into_iter()
        .map(|(month, (count, volume, pnl))| MonthlyActivity {
            month,
            trades: count,
            volume,
            pnl,
        })
        .collect()
}

/// Market with the most fills, by title. First seen wins ties.
pub fn most_traded_market(trades: &[Trade]) -> Option<MarketActivity> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();

    for (idx, trade) in trades.iter().enumerate() {
        let entry = counts.entry(trade.market_title.as_str()).or_insert((0, idx));
        entry.0 += 1;
    }

    counts
        .into_iter()
        .max_by(|a, b| {
            // Higher count wins; on equal counts the earlier first-seen
            // index must compare greater to survive max_by.
            (a.1 .0).cmp(&b.1 .0).then((b.1 .1).cmp(&a.1 .1))
        })
        .map(|(market_title, (count, _))| MarketActivity {
            market_title: market_title.to_string(),
            trades: count,
        })
}

// ---------------------------------------------------------------------------
// Streaks
// ---------------------------------------------------------------------------

/// Longest runs of consecutive wins and losses, walked in ledger
/// (chronological) order over trades with non-zero PnL.
pub fn streaks(trades: &[Trade]) -> (u32, u32) {
    let mut longest_win = 0u32;
    let mut longest_loss = 0u32;
    let mut current_win = 0u32;
    let mut current_loss = 0u32;

    for trade in trades {
        let pnl = match trade.pnl {
            Some(p) if !p.is_zero() => p,
            _ => continue,
        };

        if pnl > Decimal::ZERO {
            current_win += 1;
            current_loss = 0;
            longest_win = longest_win.max(current_win);
        } else {
            current_loss += 1;
            current_win = 0;
            longest_loss = longest_loss.max(current_loss);
        }
    }

    (longest_win, longest_loss)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Side;
    use chrono::{Duration, TimeZone, Utc};

    fn make_trade(
        market: &str,
        side: Side,
        price: &str,
        size: i64,
        minute: i64,
        category: Option<&str>,
    ) -> Trade {
        let base = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
        Trade {
            id: format!("{market}-{minute}"),
            market: market.to_string(),
            market_title: format!("{market} title"),
            side,
            outcome: "Yes".to_string(),
            price: price.parse().unwrap(),
            size: Decimal::from(size),
            timestamp: base + Duration::minutes(minute),
            pnl: None,
            category: category.map(str::to_string),
        }
    }

    fn annotated(pnls: &[i64]) -> Vec<Trade> {
        pnls.iter()
            .enumerate()
            .map(|(i, &p)| {
                let mut t = make_trade("m", Side::Sell, "0.50", 10, i as i64, None);
                t.pnl = Some(Decimal::from(p));
                t
            })
            .collect()
    }

    #[test]
    fn test_total_volume_is_price_times_size() {
        let trades = vec![
            make_trade("m1", Side::Buy, "0.50", 100, 0, None),
            make_trade("m2", Side::Buy, "0.25", 40, 1, None),
        ];

        let stats = compute_stats(&trades, &[]);

        // 50 + 10
        assert_eq!(stats.total_volume, Decimal::from(60));
        assert_eq!(stats.average_trade_size, Decimal::from(30));
    }

    #[test]
    fn test_round_trip_realizes_pnl() {
        let trades = vec![
            make_trade("m1", Side::Buy, "0.50", 100, 0, None),
            make_trade("m1", Side::Sell, "0.80", 100, 1, None),
        ];

        let stats = compute_stats(&trades, &[]);

        assert_eq!(stats.total_pnl, Decimal::from(30));
        assert_eq!(stats.total_wins, 1);
        assert_eq!(stats.total_losses, 0);
        assert_eq!(stats.win_rate, Decimal::ONE);
        assert_eq!(
            stats.best_trade.and_then(|t| t.pnl),
            Some(Decimal::from(30))
        );
        // The opening buy (PnL 0) is still the arg-min.
        assert_eq!(stats.worst_trade.and_then(|t| t.pnl), Some(Decimal::ZERO));
    }

    #[test]
    fn test_wins_plus_losses_bounded_by_trades() {
        let trades = vec![
            make_trade("m1", Side::Buy, "0.50", 100, 0, None),
            make_trade("m1", Side::Sell, "0.50", 50, 1, None), // break-even
            make_trade("m1", Side::Sell, "0.70", 50, 2, None),
        ];

        let stats = compute_stats(&trades, &[]);

        assert!(stats.total_wins + stats.total_losses <= stats.total_trades);
        // The break-even sell is excluded from the denominator.
        assert_eq!(stats.total_wins, 1);
        assert_eq!(stats.total_losses, 0);
        assert_eq!(stats.win_rate, Decimal::ONE);
    }

    #[test]
    fn test_input_order_never_changes_output() {
        let trades = vec![
            make_trade("m1", Side::Buy, "0.50", 100, 0, Some("Politics")),
            make_trade("m1", Side::Sell, "0.60", 40, 5, Some("Politics")),
            make_trade("m2", Side::Buy, "0.30", 200, 2, Some("Sports")),
            make_trade("m2", Side::Sell, "0.20", 100, 9, Some("Sports")),
        ];
        let mut reversed = trades.clone();
        reversed.reverse();

        let a = serde_json::to_value(compute_stats(&trades, &[])).unwrap();
        let b = serde_json::to_value(compute_stats(&reversed, &[])).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_streak_example() {
        let trades = annotated(&[1, 1, -1, 1, 1, 1]);

        let (win, loss) = streaks(&trades);

        assert_eq!(win, 3);
        assert_eq!(loss, 1);
    }

    #[test]
    fn test_streaks_skip_flat_trades() {
        let trades = annotated(&[1, 0, 1, 0, 1]);

        let (win, loss) = streaks(&trades);

        // Zero-PnL trades neither extend nor break a run.
        assert_eq!(win, 3);
        assert_eq!(loss, 0);
    }

    #[test]
    fn test_empty_input_yields_sentinel() {
        let stats = compute_stats(&[], &[]);

        assert_eq!(stats.total_trades, 0);
        assert_eq!(stats.win_rate, Decimal::ZERO);
        assert!(stats.best_trade.is_none());
        assert!(stats.worst_trade.is_none());
        assert!(stats.first_trade_at.is_none());
        assert!(stats.last_trade_at.is_none());
        assert!(stats.most_traded_market.is_none());
        assert_eq!(stats.trading_persona.kind, "Cautious Bettor");
    }

    #[test]
    fn test_favorite_categories_capped_and_sorted() {
        let categories = ["a", "b", "c", "d", "e", "f", "g"];
        let trades: Vec<Trade> = categories
            .into_iter()
            .enumerate()
            .map(|(i, c)| {
                // Increasing volume per category: 10, 20, 30, ...
                make_trade("m", Side::Buy, "1.00", (i as i64 + 1) * 10, i as i64, Some(c))
            })
            .collect();

        let rows = favorite_categories(&trades);

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].category, "g");
        for pair in rows.windows(2) {
            assert!(pair[0].volume >= pair[1].volume);
        }
    }

    #[test]
    fn test_category_volume_ties_break_by_first_seen() {
        let trades = vec![
            make_trade("m1", Side::Buy, "0.50", 100, 0, Some("Sports")),
            make_trade("m2", Side::Buy, "0.50", 100, 1, Some("Politics")),
        ];

        let rows = favorite_categories(&trades);

        assert_eq!(rows[0].category, "Sports");
        assert_eq!(rows[1].category, "Politics");
    }

    #[test]
    fn test_missing_category_becomes_other() {
        let trades = vec![make_trade("m1", Side::Buy, "0.50", 100, 0, None)];

        let rows = favorite_categories(&trades);

        assert_eq!(rows[0].category, "Other");
    }

    #[test]
    fn test_monthly_buckets_ascend() {
        let jan = make_trade("m1", Side::Buy, "0.50", 100, 0, None);
        let mut mar = make_trade("m1", Side::Buy, "0.50", 100, 1, None);
        mar.timestamp = Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap();
        let mut feb = make_trade("m1", Side::Buy, "0.50", 100, 2, None);
        feb.timestamp = Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap();

        let buckets = monthly_activity(&[jan, mar, feb]);

        let months: Vec<&str> = buckets.iter().map(|b| b.month.as_str()).collect();
        assert_eq!(months, vec!["2025-01", "2025-02", "2025-03"]);
    }

    #[test]
    fn test_most_traded_market_first_seen_wins_ties() {
        let trades = vec![
            make_trade("m1", Side::Buy, "0.50", 10, 0, None),
            make_trade("m2", Side::Buy, "0.50", 10, 1, None),
            make_trade("m1", Side::Buy, "0.50", 10, 2, None),
            make_trade("m2", Side::Buy, "0.50", 10, 3, None),
        ];

        let top = most_traded_market(&trades).unwrap();

        assert_eq!(top.market_title, "m1 title");
        assert_eq!(top.trades, 2);
    }

    #[test]
    fn test_unique_markets_counts_ids_not_titles() {
        let mut a = make_trade("m1", Side::Buy, "0.50", 10, 0, None);
        let mut b = make_trade("m2", Side::Buy, "0.50", 10, 1, None);
        // Same display title, different market ids.
        a.market_title = "same".into();
        b.market_title = "same".into();

        let stats = compute_stats(&[a, b], &[]);

        assert_eq!(stats.unique_markets, 2);
    }

    #[test]
    fn test_best_and_worst_ties_go_to_earliest() {
        let trades = annotated(&[5, 5, -3, -3]);

        let (best, worst) = best_and_worst(&trades);

        assert_eq!(best.map(|t| t.id), Some("m-0".to_string()));
        assert_eq!(worst.map(|t| t.id), Some("m-2".to_string()));
    }
}
