//! Send-code command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use warden_core::SendVerifyCodeRequest;

use crate::cli::ApiArgs;
use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct SendCodeArgs {
    /// Address to send the code to
    #[arg(long)]
    pub email: String,

    /// Human-verification token, when the server requires one
    #[arg(long)]
    pub turnstile_token: Option<String>,
}

pub async fn run(args: SendCodeArgs, api: &ApiArgs) -> Result<()> {
    let session = CliSession::open(api, "/register")?;

    let request = SendVerifyCodeRequest {
        email: args.email,
        turnstile_token: args.turnstile_token,
    };

    eprintln!("{}", "Requesting verification code...".dimmed());

    let sent = session
        .store
        .send_verify_code(&request)
        .await
        .context("Failed to send verification code")?;

    output::success(sent.message.as_deref().unwrap_or("Verification code sent"));
    output::field("Retry in", &format!("{}s", sent.countdown));

    Ok(())
}
