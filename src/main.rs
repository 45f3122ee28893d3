use clap::Parser;
use learning_path::Error;
use learning_path::cli::Cli;
use learning_path::config::load_environment;
use learning_path::telemetry::init_tracing;
use tracing::error;

#[rocket::main]
async fn main() -> Result<(), Error> {
    // Env files may set RUST_LOG, so they are read before the subscriber
    // is built and reported after.
    let env = load_environment();
    let _telemetry = init_tracing()?;

    match env {
        Ok(report) => report.log(),
        Err(e) => error!("Failed to load environment files: {}", e),
    }

    Cli::parse().run().await
}
