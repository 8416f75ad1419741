//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use warden_core::Credentials;

use crate::cli::ApiArgs;
use crate::output;
use crate::session::{CliSession, HoldArgs};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "WARDEN_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Human-verification token, when the server requires one
    #[arg(long)]
    pub turnstile_token: Option<String>,

    #[command(flatten)]
    pub hold: HoldArgs,
}

pub async fn run(args: LoginArgs, api: &ApiArgs) -> Result<()> {
    let session = CliSession::with_refresh_interval(api, "/login", args.hold.refresh_interval())?;

    let mut credentials = Credentials::new(args.email, args.password);
    if let Some(token) = args.turnstile_token {
        credentials = credentials.with_turnstile_token(token);
    }

    eprintln!("{}", "Logging in...".dimmed());

    let user = session
        .store
        .login(&credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::user(&user);

    if args.hold.hold {
        session.hold().await?;
    }

    Ok(())
}
