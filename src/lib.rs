pub mod analytics;
pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod polymarket;
pub mod services;

use crate::config::AppConfig;
use crate::polymarket::DataClient;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
    pub data_client: DataClient,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
