use std::error::Error;

use sqlx::postgres::PgPoolOptions;
use tracing::{info, Level};

use chairdesk::config::redact;
use chairdesk::{create_app, AppState, Config, PgStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = Config::from_env()?;
    let tokens: Vec<String> = config.chair_tokens.keys().map(|t| redact(t)).collect();
    info!("Loaded {} chair token(s): {}", tokens.len(), tokens.join(", "));

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    if config.run_migrations {
        info!("Running database migrations");
        sqlx::migrate!().run(&pool).await?;
    }

    let bind_addr = config.bind_addr.clone();
    let app = create_app(AppState::new(PgStore::new(pool), config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Server is running on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
