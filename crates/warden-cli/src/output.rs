//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use warden_core::User;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print the identity fields of a user.
pub fn user(user: &User) {
    field("ID", &user.id.to_string());
    field("Email", &user.email);
    field("Name", user.display_name());
    let role = if user.is_admin() {
        user.role.to_string().yellow().to_string()
    } else {
        user.role.to_string()
    };
    field("Role", &role);
    if let Some(status) = &user.status {
        field("Status", status);
    }
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
