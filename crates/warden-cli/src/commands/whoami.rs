//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ApiArgs;
use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, api: &ApiArgs) -> Result<()> {
    let session = CliSession::open(api, "/")?;

    session.store.restore().await;

    let user = session
        .store
        .current_user()
        .context("No active session. Run 'warden login' first.")?;

    output::user(&user);
    if session.store.is_admin() {
        output::field("Admin", "yes");
    }

    Ok(())
}
