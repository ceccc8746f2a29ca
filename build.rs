use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let hash = command_stdout("git", &["rev-parse", "--short", "HEAD"])
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());
    let status = command_stdout("git", &["status", "--porcelain"])
        .map(|porcelain| if porcelain.is_empty() { "clean" } else { "dirty" })
        .unwrap_or(UNKNOWN);
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let target = env::var("TARGET").unwrap_or_else(|_| UNKNOWN.to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_string());
    let rustc = command_stdout("rustc", &["--version"]).unwrap_or_else(|| UNKNOWN.to_string());

    for (key, value) in [
        ("HASH", hash.as_str()),
        ("STATUS", status),
        ("TIMESTAMP", timestamp.as_str()),
        ("TARGET", target.as_str()),
        ("PROFILE", profile.as_str()),
        ("RUSTC", rustc.as_str()),
    ] {
        println!("cargo:rustc-env=ROOMSHARE_BUILD_{key}={value}");
    }
}

/// Trimmed stdout of a successful command, `None` if it could not run.
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
