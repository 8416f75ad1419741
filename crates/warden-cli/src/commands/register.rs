//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use warden_core::RegisterRequest;

use crate::cli::ApiArgs;
use crate::output;
use crate::session::{CliSession, HoldArgs};

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "WARDEN_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Code from `warden send-code`, when email verification is enabled
    #[arg(long)]
    pub verify_code: Option<String>,

    /// Human-verification token, when the server requires one
    #[arg(long)]
    pub turnstile_token: Option<String>,

    #[command(flatten)]
    pub hold: HoldArgs,
}

pub async fn run(args: RegisterArgs, api: &ApiArgs) -> Result<()> {
    let session = CliSession::with_refresh_interval(api, "/register", args.hold.refresh_interval())?;

    let mut request = RegisterRequest::new(args.email, args.password);
    if let Some(code) = args.verify_code {
        request = request.with_verify_code(code);
    }
    if let Some(token) = args.turnstile_token {
        request = request.with_turnstile_token(token);
    }

    eprintln!("{}", "Creating account...".dimmed());

    let user = session
        .store
        .register(&request)
        .await
        .context("Failed to register")?;

    output::success("Account created");
    println!();
    output::user(&user);

    if args.hold.hold {
        session.hold().await?;
    }

    Ok(())
}
