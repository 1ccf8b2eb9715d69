use std::{path::PathBuf, str::FromStr, time::Duration};

use clap::{Parser, Subcommand, command};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Wallet and endpoint settings, required by the demos that touch the
    /// network.
    #[serde(default)]
    pub eth: Option<Eth>,
    #[serde(default)]
    pub app: App,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Eth {
    /// URL to an Ethereum JSON-RPC endpoint, Sepolia for the on-chain demos.
    #[serde(deserialize_with = "parse_url")]
    pub rpc: Url,
    /// Hex-encoded private key of the funded wallet.
    pub private_key: String,
    /// Expected chain id of the endpoint, checked on connect when set.
    #[serde(default)]
    pub chain_id: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct App {
    /// Wait after a broadcast before the first receipt lookup, roughly one
    /// slot so the tx has a chance to propagate.
    #[serde(default = "defaults::propagation_delay")]
    #[serde(deserialize_with = "human_readable_duration")]
    pub propagation_delay: Duration,
    /// How long to keep polling for a receipt before giving up.
    #[serde(default = "defaults::receipt_timeout")]
    #[serde(deserialize_with = "human_readable_duration")]
    pub receipt_timeout: Duration,
    /// Pause between receipt lookups.
    #[serde(default = "defaults::receipt_poll_interval")]
    #[serde(deserialize_with = "human_readable_duration")]
    pub receipt_poll_interval: Duration,
    /// Trusted setup file for the native backend. The embedded Ethereum
    /// setup is used when absent.
    #[serde(default)]
    pub trusted_setup_path: Option<PathBuf>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            propagation_delay: defaults::propagation_delay(),
            receipt_timeout: defaults::receipt_timeout(),
            receipt_poll_interval: defaults::receipt_poll_interval(),
            trusted_setup_path: None,
        }
    }
}

mod defaults {
    use std::time::Duration;

    pub fn propagation_delay() -> Duration {
        Duration::from_secs(12)
    }

    pub fn receipt_timeout() -> Duration {
        Duration::from_secs(120)
    }

    pub fn receipt_poll_interval() -> Duration {
        Duration::from_secs(6)
    }
}

fn parse_url<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let url_str: String = Deserialize::deserialize(deserializer)?;
    Url::from_str(&url_str).map_err(|e| {
        let msg = format!("Failed to parse URL '{url_str}': {e}");
        serde::de::Error::custom(msg)
    })
}

fn human_readable_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let duration_str: String = Deserialize::deserialize(deserializer)?;
    humantime::parse_duration(&duration_str).map_err(|e| {
        let msg = format!("Failed to parse duration '{duration_str}': {e}");
        serde::de::Error::custom(msg)
    })
}

#[derive(Parser)]
#[command(
    name = "blob-lab",
    version,
    about,
    propagate_version = true,
    arg_required_else_help(true)
)]
pub struct Cli {
    #[arg(long, value_name = "FILE", help = "Path to the configuration file")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Pack a random payload into blobs and broadcast it as a type-3 tx
    SendBlob(SendBlobArgs),
    /// Compute EIP-7594 cell proofs, drop half the cells and recover them
    CellProofs(CellProofsArgs),
    /// Race the native KZG backend against the portable one
    CompareBackends(CompareBackendsArgs),
    /// Open one field element and have the precompile check the proof
    PointEval(PointEvalArgs),
}

#[derive(clap::Args)]
pub struct SendBlobArgs {
    /// Size of the random payload in bytes
    #[arg(long, default_value_t = 200_000, conflicts_with = "message")]
    pub payload_bytes: usize,
    /// Carry this UTF-8 message as the payload instead of random bytes
    #[arg(long)]
    pub message: Option<String>,
    /// Fail unless the payload packs into exactly this many blobs
    #[arg(long)]
    pub expect_blobs: Option<usize>,
}

#[derive(clap::Args)]
pub struct CellProofsArgs {
    /// Number of blobs to run the cell pipeline over
    #[arg(long, default_value_t = 2)]
    pub blobs: usize,
    /// Also broadcast the blobs in their EIP-4844 wire form
    #[arg(long, default_value_t = false)]
    pub broadcast: bool,
}

#[derive(clap::Args)]
pub struct CompareBackendsArgs {
    /// Number of blobs per round
    #[arg(long, default_value_t = 2)]
    pub blobs: usize,
    /// Number of timed rounds
    #[arg(long, default_value_t = 3)]
    pub rounds: usize,
}

#[derive(clap::Args)]
pub struct PointEvalArgs {
    /// Index of the field element to open
    #[arg(long, default_value_t = 0)]
    pub index: usize,
    /// Seed for the deterministic blob
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Skip the on-chain precompile check
    #[arg(long, default_value_t = false)]
    pub offline: bool,
}

pub fn parse() -> crate::errors::Result<(Cli, Config)> {
    let cli = Cli::parse();

    let mut builder = config::Config::builder();
    if let Some(path) = &cli.config {
        builder = builder.add_source(config::File::from(path.clone()));
    }
    let config = builder
        .add_source(config::Environment::with_prefix("BLOB_LAB").separator("__"))
        .build()?;
    let config = config.try_deserialize()?;

    Ok((cli, config))
}
