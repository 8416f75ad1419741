//! Settings command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ApiArgs;
use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct SettingsArgs {}

pub async fn run(_args: SettingsArgs, api: &ApiArgs) -> Result<()> {
    let session = CliSession::open(api, "/")?;

    let settings = session
        .store
        .public_settings()
        .await
        .context("Failed to fetch public settings")?;

    output::json_pretty(&settings)
}
