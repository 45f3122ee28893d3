use clap::{Parser, Subcommand};
use tracing::info;

use crate::catalog::select_catalog;
use crate::config::{connect, database_url, run_migrations};
use crate::seed::seed_database;
use crate::{Error, init_rocket};

#[derive(Parser)]
#[command(name = "learning-path")]
#[command(about = "Python learning path web application")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Database URL, e.g. sqlite:///var/lib/learning-path/app.db
        ///
        /// Defaults to $DATABASE_URL, then to sqlite://learning_path.db.
        #[arg(short, long)]
        database_url: Option<String>,
    },
    /// Create the schema and load the resource and job-skill catalog
    InitDb {
        /// Database URL, e.g. sqlite:///var/lib/learning-path/app.db
        ///
        /// Defaults to $DATABASE_URL, then to sqlite://learning_path.db.
        #[arg(short, long)]
        database_url: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<(), Error> {
        match self.command {
            Commands::Serve { database_url: url } => {
                serve(&url.unwrap_or_else(database_url)).await?;
            }
            Commands::InitDb { database_url: url } => {
                init_db(&url.unwrap_or_else(database_url)).await?;
            }
        }
        Ok(())
    }
}

pub async fn serve(database_url: &str) -> Result<(), Error> {
    let pool = connect(database_url).await?;
    run_migrations(&pool).await?;

    let catalog = select_catalog(&pool).await?;

    let _rocket = init_rocket(pool, catalog).launch().await?;
    Ok(())
}

pub async fn init_db(database_url: &str) -> Result<(), Error> {
    let pool = connect(database_url).await?;
    run_migrations(&pool).await?;

    let report = seed_database(&pool).await?;
    if report.is_empty() {
        info!("Nothing to seed");
    } else {
        info!(
            categories = report.categories,
            resources = report.resources,
            skills = report.skills,
            "Seeding complete"
        );
    }

    pool.close().await;
    Ok(())
}
