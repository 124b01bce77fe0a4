use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;

use sqlx::postgres::PgPoolOptions;

use contacts::app;
use contacts::repo::PgContactStore;
use contacts::settings::Settings;
use contacts::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::set_subscriber(telemetry::create_subscriber("info", std::io::stdout))?;

    let settings = Settings::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections())
        .connect_with(settings.database.connect_options()?)
        .await
        .context("Failed to connect to the database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database connected");

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!("Server running on http://{}", listener.local_addr()?);

    let store = Arc::new(PgContactStore::new(pool));
    let allowed_origin = settings.cors.allowed_origin()?;

    app::run(listener, store, allowed_origin)?
        .await
        .context("Failed to run app")
}
