use std::error::Error;

use lawsphere_api::{app, config::Config, db::Database, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let db = Database::seeded()?;
    info!(
        topics = db.topics.len(),
        resources = db.resources.len(),
        lawyers = db.lawyers.len(),
        "seed data loaded"
    );

    let addr = config.listen_addr.clone();
    let notifications = config.notifications;
    let production = config.production;
    let app = app(AppState::new(config, db))?;

    info!(%addr, production, notifications, "API server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
