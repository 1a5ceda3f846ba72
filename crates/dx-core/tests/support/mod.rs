//! Shared helpers for dx CLI tests.

use assert_cmd::Command;

/// A `dx` command isolated from the caller's config and log settings.
pub fn dx() -> Command {
    let mut cmd = Command::cargo_bin("dx").expect("dx binary should exist");
    cmd.env_remove("DX_CONFIG")
        .env_remove("DX_LOG")
        .env_remove("DX_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", "/nonexistent/dx-test-config");
    cmd
}

/// Run `dx` with `args` expecting success, and parse stdout as JSON.
#[allow(dead_code)]
pub fn dx_json(args: &[&str]) -> serde_json::Value {
    let output = dx().args(args).output().expect("dx should run");
    assert!(
        output.status.success(),
        "dx {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}
