use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trading persona labels.
///
/// `CautiousBettor` is reserved for the zero-trade sentinel and is never
/// produced by the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Persona {
    Whale,
    DayTrader,
    StrategicInvestor,
    DegenTrader,
    RiskTaker,
    HodlKing,
    MarketMaven,
    CautiousBettor,
}

impl Persona {
    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Whale => "Whale",
            Persona::DayTrader => "Day Trader",
            Persona::StrategicInvestor => "Strategic Investor",
            Persona::DegenTrader => "Degen Trader",
            Persona::RiskTaker => "Risk Taker",
            Persona::HodlKing => "HODL King",
            Persona::MarketMaven => "Market Maven",
            Persona::CautiousBettor => "Cautious Bettor",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Persona::Whale => "You move markets with your massive trades",
            Persona::DayTrader => "You live for the thrill of constant trading",
            Persona::StrategicInvestor => "You pick your spots carefully and win consistently",
            Persona::DegenTrader => "You bet big and live on the edge",
            Persona::RiskTaker => "You take chances others wouldn't dare",
            Persona::HodlKing => "You believe in your positions and hold strong",
            Persona::MarketMaven => "You know the markets inside and out",
            Persona::CautiousBettor => "Just getting started",
        }
    }

    fn traits(&self) -> [&'static str; 3] {
        match self {
            Persona::Whale => ["High Volume", "Large Positions", "Market Mover"],
            Persona::DayTrader => ["High Frequency", "Active", "Quick Moves"],
            Persona::StrategicInvestor => ["High Win Rate", "Calculated", "Patient"],
            Persona::DegenTrader => ["High Risk", "Bold", "Aggressive"],
            Persona::RiskTaker => ["Fearless", "Persistent", "Ambitious"],
            Persona::HodlKing => ["Patient", "Conviction", "Long-term"],
            Persona::MarketMaven => ["Knowledgeable", "Diverse", "Experienced"],
            Persona::CautiousBettor => ["New", "Learning", "Careful"],
        }
    }

    fn emoji(&self) -> &'static str {
        match self {
            Persona::Whale => "🐋",
            Persona::DayTrader => "⚡",
            Persona::StrategicInvestor => "🎯",
            Persona::DegenTrader => "🎲",
            Persona::RiskTaker => "🔥",
            Persona::HodlKing => "💎",
            Persona::MarketMaven => "🧠",
            Persona::CautiousBettor => "🌱",
        }
    }

    /// The serialized card shown to consumers.
    pub fn profile(&self) -> PersonaProfile {
        PersonaProfile {
            kind: self.as_str().to_string(),
            description: self.description().to_string(),
            traits: self.traits().iter().map(|t| t.to_string()).collect(),
            emoji: self.emoji().to_string(),
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation form of a persona, embedded in `TradingStats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaProfile {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub traits: Vec<String>,
    pub emoji: String,
}

/// The feature vector the classifier sees. All fields come straight from
/// the aggregate statistics pass.
#[derive(Debug, Clone, Copy)]
pub struct PersonaFeatures {
    pub total_trades: usize,
    pub total_volume: Decimal,
    pub win_rate: Decimal,
    pub average_trade_size: Decimal,
    pub total_pnl: Decimal,
}

/// Classify an account's trading behavior.
///
/// The rules form an ordered decision list: the first matching row wins,
/// and reordering rows changes classification outcomes.
/// 1. **Whale**: volume > 100k and average clip > 2k.
/// 2. **DayTrader**: more than 200 trades.
/// 3. **StrategicInvestor**: win rate > 65% over more than 20 trades.
/// 4. **DegenTrader**: average clip > 3k over more than 50 trades.
/// 5. **RiskTaker**: down more than 1k over more than 30 trades.
/// 6. **HodlKing**: fewer than 20 trades but volume > 10k.
/// 7. **MarketMaven**: everything else.
pub fn classify(f: &PersonaFeatures) -> Persona {
    let rules: [(Persona, bool); 6] = [
        (
            Persona::Whale,
            f.total_volume > Decimal::from(100_000)
                && f.average_trade_size > Decimal::from(2_000),
        ),
        (Persona::DayTrader, f.total_trades > 200),
        (
            Persona::StrategicInvestor,
            f.win_rate > Decimal::new(65, 2) && f.total_trades > 20,
        ),
        (
            Persona::DegenTrader,
            f.average_trade_size > Decimal::from(3_000) && f.total_trades > 50,
        ),
        (
            Persona::RiskTaker,
            f.total_pnl < Decimal::from(-1_000) && f.total_trades > 30,
        ),
        (
            Persona::HodlKing,
            f.total_trades < 20 && f.total_volume > Decimal::from(10_000),
        ),
    ];

    rules
        .iter()
        .find(|(_, matched)| *matched)
        .map(|(persona, _)| *persona)
        .unwrap_or(Persona::MarketMaven)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn features(
        trades: usize,
        volume: i64,
        win_rate: &str,
        avg_size: i64,
        pnl: i64,
    ) -> PersonaFeatures {
        PersonaFeatures {
            total_trades: trades,
            total_volume: Decimal::from(volume),
            win_rate: win_rate.parse().unwrap(),
            average_trade_size: Decimal::from(avg_size),
            total_pnl: Decimal::from(pnl),
        }
    }

    #[test]
    fn test_whale_outranks_day_trader() {
        // Matches both rule 1 and rule 2; the earlier row must win.
        let f = features(500, 500_000, "0.50", 2_500, 1_000);
        assert_eq!(classify(&f), Persona::Whale);
    }

    #[test]
    fn test_day_trader() {
        let f = features(250, 5_000, "0.40", 20, 100);
        assert_eq!(classify(&f), Persona::DayTrader);
    }

    #[test]
    fn test_strategic_investor() {
        let f = features(40, 8_000, "0.70", 200, 500);
        assert_eq!(classify(&f), Persona::StrategicInvestor);
    }

    #[test]
    fn test_degen_trader() {
        // Win rate too low for StrategicInvestor, clip too small for Whale.
        let f = features(60, 90_000, "0.40", 3_500, -200);
        assert_eq!(classify(&f), Persona::DegenTrader);
    }

    #[test]
    fn test_risk_taker() {
        let f = features(40, 9_000, "0.30", 225, -2_000);
        assert_eq!(classify(&f), Persona::RiskTaker);
    }

    #[test]
    fn test_hodl_king() {
        let f = features(10, 15_000, "0.50", 1_500, 300);
        assert_eq!(classify(&f), Persona::HodlKing);
    }

    #[test]
    fn test_market_maven_default() {
        let f = features(25, 1_000, "0.50", 40, 50);
        assert_eq!(classify(&f), Persona::MarketMaven);
    }

    #[test]
    fn test_cautious_bettor_unreachable_from_rules() {
        // An all-zero vector still falls through to the default; the
        // sentinel persona only comes from the empty-stats path.
        let f = features(0, 0, "0", 0, 0);
        assert_eq!(classify(&f), Persona::MarketMaven);
    }

    #[test]
    fn test_profile_card() {
        let card = Persona::Whale.profile();
        assert_eq!(card.kind, "Whale");
        assert_eq!(card.traits.len(), 3);
        assert!(!card.emoji.is_empty());
    }
}
