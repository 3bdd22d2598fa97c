use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::models::NewAdvocate;
use crate::database::{schema, seed, DatabaseManager};
use crate::source::fixture_data;

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Create the advocates table and its indexes")]
    Migrate,

    #[command(about = "Replace all advocates with the built-in dataset or a JSON file")]
    Seed {
        #[arg(long, help = "JSON array of advocates (camelCase fields) to insert instead of the built-in dataset")]
        file: Option<PathBuf>,
        #[arg(long, help = "Do not create the schema before seeding")]
        skip_migrate: bool,
    },
}

pub async fn handle(cmd: DbCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    if config.database.url.is_none() {
        anyhow::bail!("DATABASE_URL is not set");
    }
    let pool = DatabaseManager::connect(&config.database).await?;

    let result = match cmd {
        DbCommands::Migrate => {
            schema::ensure_schema(&pool).await?;
            output_success(&output_format, "Advocates schema is up to date", None)
        }
        DbCommands::Seed { file, skip_migrate } => {
            if !skip_migrate {
                schema::ensure_schema(&pool).await?;
            }
            let records = match file {
                Some(path) => load_dataset(&path)?,
                None => fixture_data::advocates(),
            };
            let report = seed::seed(&pool, &records).await?;
            output_success(
                &output_format,
                &format!("Seeded {} advocates ({} total)", report.inserted, report.total),
                Some(json!({ "inserted": report.inserted, "total": report.total })),
            )
        }
    };

    pool.close().await;
    result
}

fn load_dataset(path: &Path) -> anyhow::Result<Vec<NewAdvocate>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_dataset(&raw).with_context(|| format!("invalid advocate dataset in {}", path.display()))
}

fn parse_dataset(raw: &str) -> anyhow::Result<Vec<NewAdvocate>> {
    Ok(serde_json::from_str(raw)?)
}
