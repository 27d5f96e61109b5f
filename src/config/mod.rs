use std::env;

const DEFAULT_DATA_API_URL: &str = "https://data-api.polymarket.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    // Upstream
    pub data_api_url: String,
    /// How many trades to pull from the Data API per report.
    pub trade_fetch_limit: u32,

    // Report envelope
    pub report_year: i32,
    /// Recency window: how many trades ride along in the report.
    pub report_trade_limit: usize,
    pub report_position_limit: usize,

    // Pin codes
    pub pincode_ttl_days: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            data_api_url: env::var("DATA_API_URL")
                .unwrap_or_else(|_| DEFAULT_DATA_API_URL.into()),
            trade_fetch_limit: env::var("TRADE_FETCH_LIMIT")
                .unwrap_or_else(|_| "1000".into())
                .parse()
                .unwrap_or(1000),

            report_year: env::var("REPORT_YEAR")
                .unwrap_or_else(|_| "2025".into())
                .parse()
                .unwrap_or(2025),
            report_trade_limit: env::var("REPORT_TRADE_LIMIT")
                .unwrap_or_else(|_| "100".into())
                .parse()
                .unwrap_or(100),
            report_position_limit: env::var("REPORT_POSITION_LIMIT")
                .unwrap_or_else(|_| "20".into())
                .parse()
                .unwrap_or(20),

            pincode_ttl_days: env::var("PINCODE_TTL_DAYS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .unwrap_or(30),
        })
    }
}
