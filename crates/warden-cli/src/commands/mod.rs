//! Subcommand implementations.

mod login;
mod register;
mod send_code;
mod settings;
mod whoami;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::ApiArgs;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the server's public settings
    Settings(settings::SettingsArgs),

    /// Request an email verification code
    SendCode(send_code::SendCodeArgs),

    /// Log in with email and password
    Login(login::LoginArgs),

    /// Create an account and log in
    Register(register::RegisterArgs),

    /// Restore the current session and show its user
    Whoami(whoami::WhoamiArgs),
}

pub async fn handle(cmd: Commands, api: &ApiArgs) -> Result<()> {
    match cmd {
        Commands::Settings(args) => settings::run(args, api).await,
        Commands::SendCode(args) => send_code::run(args, api).await,
        Commands::Login(args) => login::run(args, api).await,
        Commands::Register(args) => register::run(args, api).await,
        Commands::Whoami(args) => whoami::run(args, api).await,
    }
}
