//! Build script that stamps the binary with a version string.

use std::process::Command;

fn main() {
    // Re-stamp when HEAD moves or a tag is added
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    // Outside a checkout (e.g. a published crate) fall back to the manifest
    let version = git_version().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=WARDEN_VERSION={}", version);
}

fn git_version() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    if described.is_empty() {
        return None;
    }

    // Tags are "v1.2.3"; clap prints "warden 1.2.3"
    Some(described.trim_start_matches('v').to_string())
}
