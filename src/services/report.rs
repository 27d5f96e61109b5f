use std::time::Instant;

use chrono::Utc;
use metrics::{counter, histogram};

use crate::analytics::compute_stats;
use crate::errors::AppError;
use crate::models::{Position, Trade, WrappedReport};
use crate::polymarket::{ApiPosition, ApiTrade};
use crate::AppState;

/// Assemble the wrapped report for one address.
///
/// Trades and positions are fetched concurrently. A trade-fetch failure is
/// surfaced as an upstream error; a position-fetch failure degrades to an
/// empty snapshot, since positions never enter the statistics. An account
/// with no usable trades is "not found", distinct from both the malformed-
/// address case (rejected at the handler) and an upstream outage.
pub async fn build_wrapped_report(
    state: &AppState,
    address: &str,
) -> Result<WrappedReport, AppError> {
    let started = Instant::now();

    let (trades_res, positions_res) = tokio::join!(
        state
            .data_client
            .get_user_trades(address, state.config.trade_fetch_limit),
        state.data_client.get_user_positions(address),
    );

    let raw_trades = trades_res.inspect_err(|e| {
        counter!("upstream_errors_total").increment(1);
        tracing::error!(error = %e, address = %address, "Trade fetch failed");
    })?;

    let raw_positions = match positions_res {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(error = %e, address = %address, "Position fetch failed, continuing without snapshot");
            Vec::new()
        }
    };

    let trades: Vec<Trade> = raw_trades
        .into_iter()
        .filter_map(ApiTrade::into_trade)
        .collect();

    if trades.is_empty() {
        return Err(AppError::NotFound(
            "No trading activity found for this address".into(),
        ));
    }

    let positions: Vec<Position> = raw_positions
        .into_iter()
        .map(ApiPosition::into_position)
        .collect();

    let stats = compute_stats(&trades, &positions);

    // Bound the envelope to a recency window; the stats above already saw
    // the full fetch.
    let mut recent = trades;
    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    recent.truncate(state.config.report_trade_limit);

    let mut positions = positions;
    positions.truncate(state.config.report_position_limit);

    histogram!("report_build_seconds").record(started.elapsed().as_secs_f64());
    counter!("wrapped_reports_total").increment(1);

    tracing::info!(
        address = %address,
        trades = recent.len(),
        positions = positions.len(),
        persona = %stats.trading_persona.kind,
        "Wrapped report generated"
    );

    Ok(WrappedReport {
        address: address.to_string(),
        year: state.config.report_year,
        stats,
        trades: recent,
        positions,
        generated_at: Utc::now(),
    })
}

/// An account identifier is a 0x-prefixed 20-byte hex address.
pub fn is_valid_address(address: &str) -> bool {
    let Some(hex) = address.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_validation() {
        assert!(is_valid_address(
            "0x56687bf447db6ffa42ffe2204a05edaa20f55839"
        ));
        assert!(is_valid_address(
            "0x56687BF447DB6FFA42FFE2204A05EDAA20F55839"
        ));

        assert!(!is_valid_address(""));
        assert!(!is_valid_address("56687bf447db6ffa42ffe2204a05edaa20f55839"));
        assert!(!is_valid_address("0x56687bf447db6ffa42ffe2204a05edaa20f5583")); // 39 hex chars
        assert!(!is_valid_address(
            "0x56687bf447db6ffa42ffe2204a05edaa20f5583z"
        ));
    }
}
