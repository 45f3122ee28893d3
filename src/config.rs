use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{info, warn};

use crate::error::AppError;

/// Store used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://learning_path.db";

/// Env files applied by `load_environment`. Nothing is logged while loading;
/// the caller logs the report once tracing is installed.
#[derive(Debug, Default)]
pub struct EnvReport {
    pub loaded: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
}

impl EnvReport {
    pub fn log(&self) {
        for path in &self.loaded {
            info!("Loaded environment from: {}", path);
        }
        for path in &self.skipped {
            warn!("Environment file {} not found, skipping", path);
        }
    }
}

pub fn load_environment() -> Result<EnvReport, dotenvy::Error> {
    let is_production =
        dotenvy::var("ROCKET_PROFILE").unwrap_or("development".to_string()) == "production";

    let env_files = if is_production {
        ["config/common.env", "config/prod.env", ".secrets.env"]
    } else {
        ["config/common.env", "config/dev.env", ".secrets.env"]
    };

    load_env_files(&env_files)
}

pub fn load_env_files(paths: &[&'static str]) -> Result<EnvReport, dotenvy::Error> {
    let mut report = EnvReport::default();

    for &path in paths {
        if Path::new(path).exists() {
            dotenvy::from_filename_override(path)?;
            report.loaded.push(path);
        } else {
            report.skipped.push(path);
        }
    }

    Ok(report)
}

/// Resolves the backing store from `DATABASE_URL`, falling back to a local
/// SQLite file next to the working directory.
pub fn database_url() -> String {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => DEFAULT_DATABASE_URL.to_string(),
    }
}

pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    info!(database_url = %database_url, "Connected to database");

    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Migrations completed successfully");
    Ok(())
}
