use actix_web::{web, HttpServer};
use anyhow::Context;
use portfolio_api::{
    background_task::start_limiter_sweep,
    build_app,
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    settings::{AppConfig, AppEnvironment},
    shared_repos::SharedRepositories,
    AppState,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if AppEnvironment::from_env() == AppEnvironment::Production {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::new().context("Configuration error")?;
    tracing::info!("Loaded configuration: {:?}", config);

    let pool = create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to create database connection pool")?;

    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let server_addr = format!("{}:{}", config.host, config.port);
    let workers = config.worker_count;
    let environment = config.env.clone();

    let app_state = web::Data::new(AppState::new(config, SharedRepositories::new(pool)));

    tokio::spawn(start_limiter_sweep(app_state.contact_limiter.clone()));

    let server = HttpServer::new({
        let app_state = app_state.clone();
        move || build_app(app_state.clone())
    })
    .workers(workers)
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run();

    tracing::info!(
        "🚀 Starting Portfolio API v{} on http://{} ({})",
        env!("CARGO_PKG_VERSION"),
        server_addr,
        environment
    );
    tracing::info!("📚 API docs: http://{}/api", server_addr);

    tokio::select! {
        res = server => res.context("HTTP server failed")?,
        _ = shutdown_signal() => {},
    }

    Ok(())
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    run().await.inspect_err(|e| tracing::error!("{:#}", e))
}
