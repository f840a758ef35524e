use std::{io, process::ExitCode};

use provisioner::{
    helper::banner,
    tasks::{
        config::{CollectorConfig, RequiredSettings},
        report::WriterReporter,
        tokio::{builder::BuilderTask, collector::Collector},
    },
};

/// Upper bound for a whole run; builders sleep at most 20 seconds.
const RUN_TIMEOUT_MS: u64 = 60_000;

fn init_tracing() {
    let default_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    init_tracing();
    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "Failed to load .env file");
        }
    }

    print!("{}", banner::render());

    let settings = RequiredSettings::from_env();
    if let Err(e) = settings.validate() {
        tracing::error!(error = %e, "Required settings are missing");
        // Printed regardless of the RUST_LOG filter
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    println!("working...");

    let config = CollectorConfig::new().timeout_ms(RUN_TIMEOUT_MS);
    let collector = match Collector::new(config) {
        Ok(collector) => collector,
        Err(e) => {
            tracing::error!(error = %e, "Invalid collector configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut reporter = WriterReporter::new(io::stdout());
    match collector.run(BuilderTask::defaults(), &mut reporter).await {
        Ok(outcome) => {
            tracing::info!(order = ?outcome.kinds(), "Every service is ready");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Provisioning failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
