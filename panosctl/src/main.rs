//! panosctl
//!
//! Command-line interface for PAN-OS Panorama operational commands.

use anyhow::Result;
use clap::Parser;
use panos_client::{ApiSession, Panorama};
use panosctl::cli::{handle_dg, handle_info, handle_vm_auth_key, Cli, Commands, OutputFormat};
use panosctl::config::CliConfig;
use panosctl::format;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Build configuration using priority chain: defaults → file → env → CLI args
    let mut builder = CliConfig::builder();

    // Load config file (unless --no-config is specified)
    builder = builder.with_config_file(!cli.no_config)?;

    // Apply environment variable overrides
    builder = builder.with_env_overrides();

    // Apply CLI argument overrides (highest priority)
    if let Some(ref host) = cli.host {
        builder = builder.with_host(host)?;
    }
    if let Some(ref api_key) = cli.api_key {
        builder = builder.with_api_key(api_key);
    }
    if let Some(ref format) = cli.format {
        let format_str = match format {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        };
        builder = builder.with_output_format(format_str)?;
    }
    if let Some(verbose) = cli.verbose {
        builder = builder.with_verbose(verbose);
    }
    if cli.insecure {
        builder = builder.with_insecure(true);
    }

    // Build final configuration with validation
    let config = match builder.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if config.host.is_empty() {
        eprintln!("Error: no device host configured");
        eprintln!("Pass --host, set PANOSCTL_HOST, or add `host` to the config file.");
        std::process::exit(1);
    }
    if config.api_key.is_empty() {
        eprintln!("Error: no API key configured");
        eprintln!("Set PANOSCTL_API_KEY, pass --api-key, or add `api_key` to the config file.");
        std::process::exit(1);
    }

    init_logging(config.verbose);

    let session = match ApiSession::builder()
        .host(config.host.clone())
        .api_key(config.api_key.clone())
        .timeout(Duration::from_secs(config.timeout))
        .accept_invalid_certs(config.insecure)
        .build()
    {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: cannot create session for {}", config.host);
            eprintln!("Session error: {}", e);
            std::process::exit(1);
        }
    };
    let client = Panorama::new(session);

    let output_format = match config.output_format.as_str() {
        "json" => format::OutputFormat::Json,
        _ => format::OutputFormat::Table,
    };

    // Execute commands
    let result = match cli.command {
        Commands::Info => handle_info(&client, &output_format).await,
        Commands::VmAuthKey { command } => {
            handle_vm_auth_key(&client, command, &output_format).await
        }
        Commands::Dg { command } => handle_dg(&client, command, &output_format).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if config.verbose {
            eprintln!("Error details: {:?}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_filter = if verbose {
        "panos_client=debug,panosctl=debug"
    } else {
        "panos_client=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
