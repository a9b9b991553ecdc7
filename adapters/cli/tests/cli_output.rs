use std::process::Command;

fn strata(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_strata"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run strata binary")
}

#[test]
fn json_report_describes_the_requested_seed() {
    let output = strata(&["--seed", "0", "--format", "json"]);
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is json");
    assert_eq!(report["seed"], 0);
    assert_eq!(report["highest_level"], 25);
    let radiation = report["levels"]
        .as_array()
        .and_then(|levels| levels.iter().find(|level| level["level"] == 14))
        .expect("level 14 listed");
    assert_eq!(radiation["uncampable_reason"], "Radiation");
}

#[test]
fn negative_seeds_are_accepted() {
    let output = strata(&["--seed", "-12"]);
    assert!(output.status.success());
    let table = String::from_utf8(output.stdout).expect("utf-8 table");
    assert!(table.starts_with("seed -12 "));
}

#[test]
fn unreadable_config_fails_with_context() {
    let output = strata(&["--seed", "1", "--config", "/nonexistent/strata.toml"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/nonexistent/strata.toml"), "{stderr}");
}
