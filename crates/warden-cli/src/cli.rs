//! CLI argument definitions.

use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::{Args, Parser};

use warden_http::{ClientConfig, ENV_ALLOW_HTTP, ENV_BASE_URL, ENV_ORIGIN, ENV_TIMEOUT_SECS};

use crate::commands::Commands;

/// Session client for cookie-authenticated APIs.
#[derive(Parser, Debug)]
#[command(name = "warden")]
#[command(author, version = env!("WARDEN_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Transport settings shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct ApiArgs {
    /// API base URL [default: http://localhost:8080/api/v1]
    #[arg(long, global = true, env = ENV_BASE_URL)]
    pub api_url: Option<String>,

    /// Request timeout in seconds [default: 30]
    #[arg(long, global = true, env = ENV_TIMEOUT_SECS)]
    pub timeout_secs: Option<String>,

    /// Origin header to send; empty to send none [default: the API origin]
    #[arg(long, global = true, env = ENV_ORIGIN)]
    pub origin: Option<String>,

    /// Allow a plain-HTTP API URL on non-loopback hosts
    #[arg(long, global = true, env = ENV_ALLOW_HTTP, value_parser = FalseyValueParser::new())]
    pub allow_http: bool,
}

impl ApiArgs {
    /// Resolve the transport configuration, validated the same way as the
    /// environment.
    pub fn client_config(&self) -> Result<ClientConfig> {
        ClientConfig::from_lookup(|key| match key {
            ENV_BASE_URL => self.api_url.clone(),
            ENV_TIMEOUT_SECS => self.timeout_secs.clone(),
            ENV_ORIGIN => self.origin.clone(),
            ENV_ALLOW_HTTP => self.allow_http.then(|| "true".to_string()),
            _ => None,
        })
        .context("Invalid API configuration")
    }
}
