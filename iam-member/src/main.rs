//! iam-member entry point.

use clap::Parser;
use iam_member::cli::{self, Cli};
use iam_member::config::ProviderConfig;
use iam_member::resource::Diagnostics;
use iam_member::startup::Provider;
use service_core::observability::init_tracing;
use std::process::ExitCode;

fn report(diagnostics: &Diagnostics) -> ExitCode {
    match serde_json::to_string_pretty(diagnostics) {
        Ok(json) => println!("{}", json),
        Err(_) => eprintln!("{}", diagnostics),
    }
    ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ProviderConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return report(&Diagnostics::from(e));
        }
    };

    if let Err(e) = init_tracing(
        "iam-member",
        &config.log.log_level,
        config.log.otlp_endpoint.as_deref(),
    ) {
        eprintln!("Failed to initialize tracing: {}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        address = %config.address,
        insecure = config.insecure,
        "Starting iam-member"
    );

    let provider = match Provider::build(&config).await {
        Ok(provider) => provider,
        Err(diagnostics) => return report(&diagnostics),
    };

    match cli::run(cli.command, &provider).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(diagnostics) => {
            tracing::error!(diagnostics = %diagnostics, "Command failed");
            report(&diagnostics)
        }
    }
}
