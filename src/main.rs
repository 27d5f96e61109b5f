use polywrapped::api::router::create_router;
use polywrapped::config::AppConfig;
use polywrapped::polymarket::DataClient;
use polywrapped::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let db = db::init_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&db).await?;
    tracing::info!("Database ready");

    let metrics_handle = metrics::init_metrics();

    let data_client =
        DataClient::with_base_url(reqwest::Client::new(), config.data_api_url.clone());
    tracing::info!(data_api = %config.data_api_url, year = config.report_year, "Data client ready");

    let state = AppState {
        db,
        config,
        data_client,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
