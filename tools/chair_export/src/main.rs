use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use sqlx::PgPool;
use tracing::info;

use chairdesk::chair::{authors_csv, export_filename, submissions_csv, ExportEntity};
use chairdesk::{ChairStore, PgStore};

#[derive(Parser, Debug)]
#[command(name = "chair_export")]
#[command(about = "Write the submissions or authors CSV of a conference to a file")]
struct Args {
    /// Conference ID
    #[arg(short, long)]
    conference: i64,

    /// What to export: submissions or authors
    #[arg(short, long, default_value = "submissions")]
    entity: ExportEntity,

    /// Output file (default: <entity>-<timestamp>.csv in the current directory)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Public origin for manuscript links (default: PUBLIC_BASE_URL or http://localhost)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let store = PgStore::new(pool);

    let conference = store
        .conference(args.conference)
        .await?
        .with_context(|| format!("Conference {} not found", args.conference))?;
    info!("Exporting {} of {}", args.entity, conference.title());

    let body = match args.entity {
        ExportEntity::Submissions => {
            let base_url = args
                .base_url
                .or_else(|| std::env::var("PUBLIC_BASE_URL").ok())
                .unwrap_or_else(|| "http://localhost".to_string());
            let records = store.submissions(conference.id).await?;
            submissions_csv(&records, &base_url)?
        }
        ExportEntity::Authors => {
            let members = store.members().await?;
            let counts = store.authorship_counts(conference.id).await?;
            authors_csv(&members, &counts)?
        }
    };

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(export_filename(args.entity, Local::now().naive_local())));
    std::fs::write(&out, &body).with_context(|| format!("Failed to write {}", out.display()))?;

    info!("Wrote {} bytes to {}", body.len(), out.display());
    Ok(())
}
