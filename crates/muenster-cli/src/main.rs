mod render;

use anyhow::Context;
use clap::{Parser, Subcommand};
use muenster_client::{Method, OdpMuenster, StadtMuenster};
use muenster_core::ClientConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "muenster-cli")]
#[command(about = "Query open data published by the city of Münster")]
struct Cli {
    /// Request timeout in seconds (overrides MUENSTER_REQUEST_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List parking garages with their current occupancy
    Garages {
        /// Print the garages as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Send a raw GET request to the Open Data Platform and print the JSON
    Request {
        /// Path relative to the dataset root (e.g. parkhaeuser)
        path: String,
        /// Query parameter as key=value; may be repeated
        #[arg(long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Command-line flags take precedence over `MUENSTER_*` settings.
fn apply_overrides(cli: &Cli, config: &mut ClientConfig) {
    if let Some(timeout) = cli.timeout {
        config.request_timeout_secs = timeout;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = muenster_core::load_client_config()?;
    apply_overrides(&cli, &mut config);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Garages { json } => {
            let client = StadtMuenster::from_config(&config, None)
                .context("failed to build Stadt Münster client")?;
            let result = client.garages().await;
            client.close();
            let garages = match result {
                Ok(garages) => garages,
                Err(e) => {
                    tracing::warn!(error = %e, kind = ?e.kind(), "garage fetch failed");
                    return Err(e).context("failed to fetch parking garages");
                }
            };
            tracing::info!(count = garages.len(), "fetched parking garages");

            let output = if json {
                serde_json::to_string_pretty(&garages)?
            } else {
                render::garage_table(&garages)
            };
            println!("{output}");
        }
        Commands::Request { path, params } => {
            let client = OdpMuenster::from_config(&config, None)
                .context("failed to build Open Data Platform client")?;
            let borrowed: Vec<(&str, &str)> = params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let result = client.request(&path, Method::GET, &borrowed).await;
            client.close();
            let body = match result {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(
                        path = %path,
                        error = %e,
                        kind = ?e.kind(),
                        "request failed"
                    );
                    return Err(e).with_context(|| format!("request to '{path}' failed"));
                }
            };
            tracing::info!(path = %path, "request succeeded");
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}
