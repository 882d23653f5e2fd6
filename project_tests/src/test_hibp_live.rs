//! # HIBP Live Data Test
//!
//! Connects to the real Have I Been Pwned service through lib_hibp and
//! prints what comes back. Useful to check the models still match the wire
//! format; the offline suite lives under `tests/`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use lib_hibp::configs::ClientConfig;
use lib_hibp::loggers::{init_tracing, LogFormat};
use lib_hibp::{ApiResponse, BreachQuery, HibpClient};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Query the live HIBP v2 API and print the decoded records")]
struct Args {
    /// Log level (trace, debug, info, warn, error). RUST_LOG overrides it.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Override the API base URL.
    #[arg(long, env = "HIBP_BASE_URL")]
    base_url: Option<String>,

    /// Transport timeout in seconds.
    #[arg(long, default_value_t = 15)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Breaches an email address appears in.
    Account {
        email: String,
        #[arg(long)]
        domain: Option<String>,
        #[arg(long)]
        truncate: bool,
        #[arg(long)]
        unverified: bool,
    },
    /// All breaches, optionally for one domain.
    Breaches {
        #[arg(long)]
        domain: Option<String>,
    },
    /// A single breach by name.
    Breach { name: String },
    /// The data class taxonomy.
    DataClasses,
    /// Pastes an email address appears in.
    Pastes { email: String },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level, LogFormat::Text)
        .map_err(|e| anyhow::anyhow!(e))
        .context("installing tracing subscriber")?;

    // // Statement: Build the client from defaults plus command-line overrides
    let mut config = ClientConfig::default().with_timeout_secs(args.timeout);
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    let client = HibpClient::from_config(&config).context("building HIBP client")?;

    println!("[*] Requesting live data from {}", client.api().base_url());

    match args.command {
        Command::Account {
            email,
            domain,
            truncate,
            unverified,
        } => {
            let mut query = BreachQuery::default();
            if let Some(domain) = domain {
                query = query.domain(domain);
            }
            if truncate {
                query = query.truncated();
            }
            if unverified {
                query = query.unverified();
            }
            report(client.breaches_for_account(&email, &query)?)
        }
        Command::Breaches { domain } => report(client.breaches(domain.as_deref())?),
        Command::Breach { name } => report(client.breach(&name)?),
        Command::DataClasses => report(client.data_classes()?),
        Command::Pastes { email } => report(client.pastes_for_account(&email)?),
    }
}

fn report<T: Serialize>(response: ApiResponse<T>) -> anyhow::Result<()> {
    info!(status = response.status, "response received");

    match response.data {
        Some(data) => {
            println!("\n[SUCCESS] Data received:");
            println!("-----------------------------------------------");
            println!("{}", serde_json::to_string_pretty(&data)?);
            println!("-----------------------------------------------");
        }
        None => {
            println!("\n[HTTP {}] {}", response.status, response.diagnostic);
            if let Some(body) = response.error_body {
                println!(">>> {}", body);
            }
        }
    }
    Ok(())
}
