use anyhow::Context;
use tokio::net::TcpListener;

mod adapters;
mod app_state;
mod auth;
mod config;
mod domain;
mod factory;
mod router;
mod routes;
mod telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    if let Err(err) = run().await {
        tracing::error!("Startup failed: {:#}", err);
        return Err(err);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let settings = config::read_config().context("failed to read configuration")?;
    domain::projection::verify_rename_tables().context("account rename tables are inconsistent")?;

    let app_state = factory::build_state(&settings).await?;
    let app = router::create(app_state);

    let addr = format!("{}:{}", settings.application.host, settings.application.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        environment = %settings.application.environment,
        "Listening on {}",
        listener.local_addr()?
    );
    axum::serve(listener, app).await?;

    Ok(())
}
