use std::process::{Command, Output};

use composite_smoke::{EXIT_HARNESS_ERROR, SmokeEnv};

/// Run the binary with only `vars` set among the harness variables.
fn run_binary(vars: &[(SmokeEnv, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_composite-smoke"));
    for key in SmokeEnv::ALL {
        cmd.env_remove(key.as_str());
    }
    for (key, value) in vars {
        cmd.env(key.as_str(), value);
    }
    cmd.env("RUST_LOG", "off");
    cmd.output().expect("failed to launch composite-smoke")
}

fn assert_config_rejected(output: &Output) {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(i32::from(EXIT_HARNESS_ERROR)), "stderr: {stderr}");
    assert!(
        stderr.contains("composite-smoke: failed to load configuration"),
        "stderr: {stderr}"
    );
    // Nothing was reported, so no request was sent.
    assert!(stdout.is_empty(), "stdout: {stdout}");
}

#[test]
fn zero_timeout_exits_with_harness_error() {
    let output = run_binary(&[(SmokeEnv::TimeoutSeconds, "0")]);
    assert_config_rejected(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("COMPOSITE_SMOKE_TIMEOUT_SECS"));
}

#[test]
fn non_http_base_url_exits_with_harness_error() {
    let output = run_binary(&[(SmokeEnv::BaseUrl, "ftp://x")]);
    assert_config_rejected(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("scheme must be http or https"));
}
