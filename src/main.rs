//! prefixdb CLI - containment queries over a reloadable CIDR dataset
//!
//! Loads the prefix dataset, answers single and batch containment
//! queries, and exercises the reload lifecycle. Every command prints one
//! JSON document so the binary can be wrapped by other tooling.

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::warn;
use prefix_db::{Error, FileSource, IndexManager, DEFAULT_BATCH_WORKERS};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prefixdb")]
#[command(about = "IP prefix containment lookups over a reloadable CIDR dataset")]
#[command(version)]
struct Cli {
    /// Path to the prefix dataset JSON file
    #[arg(short, long, default_value = "prefixes.json")]
    dataset: PathBuf,

    /// Worker count for batch lookups
    #[arg(short, long, default_value_t = DEFAULT_BATCH_WORKERS)]
    workers: usize,

    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a single IP address
    Lookup {
        /// The address to look up
        ip: String,
    },

    /// Look up many IP addresses in one batch
    Batch {
        /// The addresses to look up (at least one)
        #[arg(required = true)]
        ips: Vec<String>,
    },

    /// Rebuild the index from the dataset and swap it live
    Reload,

    /// Show index statistics
    Stats,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let manager =
        IndexManager::with_workers(Box::new(FileSource::new(&cli.dataset)), cli.workers)?;

    match cli.command {
        Commands::Lookup { ip } => {
            let addr = match ip.parse::<IpAddr>() {
                Ok(addr) => addr,
                Err(_) => reject(&cli.format, Error::InvalidAddress(ip)),
            };
            match manager.lookup(&addr) {
                Some(entries) => {
                    output(
                        &cli.format,
                        &serde_json::json!({
                            "status": "ok",
                            "result": entries
                        }),
                    );
                }
                None => {
                    warn!("{} not found in any subnet", addr);
                    output(
                        &cli.format,
                        &serde_json::json!({
                            "status": "error",
                            "message": "IP not found in any subnet"
                        }),
                    );
                    std::process::exit(1);
                }
            }
        }

        Commands::Batch { ips } => {
            // validate every address up front; one bad address rejects
            // the whole request before anything reaches the index
            let mut addrs = Vec::with_capacity(ips.len());
            for ip in &ips {
                match ip.parse::<IpAddr>() {
                    Ok(addr) => addrs.push(addr),
                    Err(_) => reject(&cli.format, Error::InvalidAddress(ip.clone())),
                }
            }

            let results = manager.batch_lookup(&addrs);
            let found = results.iter().filter(|slot| slot.is_some()).count();
            // positionally aligned with the input: one slot per address,
            // null where nothing matched
            let slots: Vec<serde_json::Value> = results
                .iter()
                .map(|slot| match slot {
                    Some(entries) => serde_json::json!(entries),
                    None => serde_json::Value::Null,
                })
                .collect();

            if found == 0 {
                output(
                    &cli.format,
                    &serde_json::json!({
                        "status": "error",
                        "message": "No IPs found in any subnet",
                        "results": slots
                    }),
                );
                std::process::exit(1);
            }
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "count": slots.len(),
                    "found": found,
                    "results": slots
                }),
            );
        }

        Commands::Reload => match manager.reload() {
            Ok(report) => {
                output(
                    &cli.format,
                    &serde_json::json!({
                        "status": "ok",
                        "message": "index reloaded",
                        "inserted": report.inserted,
                        "nodes": report.node_count
                    }),
                );
            }
            Err(e) => {
                output(
                    &cli.format,
                    &serde_json::json!({
                        "status": "error",
                        "message": format!("reload failed: {}", e)
                    }),
                );
                std::process::exit(1);
            }
        },

        Commands::Stats => {
            output(
                &cli.format,
                &serde_json::json!({
                    "dataset": cli.dataset.display().to_string(),
                    "nodes": manager.node_count(),
                    "workers": manager.workers()
                }),
            );
        }
    }

    Ok(())
}

/// Print an error document and exit with the validation status code
fn reject(format: &OutputFormat, err: Error) -> ! {
    output(
        format,
        &serde_json::json!({
            "status": "error",
            "message": err.to_string()
        }),
    );
    std::process::exit(2);
}

fn output(format: &OutputFormat, value: &serde_json::Value) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(value).unwrap());
        }
        OutputFormat::Text => {
            println!("{}", serde_json::to_string_pretty(value).unwrap());
        }
    }
}
