mod common;

use common::TestEnv;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use std::fs;

#[test]
fn unix_rendering_omits_the_windows_pin_and_windows_includes_it() {
    let env = TestEnv::new();

    env.cmd()
        .arg("--guide")
        .arg(env.guide_dir.to_str().unwrap())
        .args(["guide", "--platform", "generic-unix"])
        .assert()
        .success()
        .stdout(contains("alpha-dev").and(contains("gamma-sys").not()));

    env.cmd()
        .arg("--guide")
        .arg(env.guide_dir.to_str().unwrap())
        .args(["guide", "--platform", "windows"])
        .assert()
        .success()
        .stdout(contains("gamma-sys").and(contains("gammaperl")));
}

#[test]
fn quickstart_and_detailed_reference_the_same_commands() {
    let env = TestEnv::new();

    let quick = env.run_json_guide(&["quickstart", "--platform", "generic-unix"]);
    assert_eq!(quick["ok"], true);
    let commands: Vec<String> = quick["data"]["commands"]
        .as_array()
        .expect("command array")
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert!(commands.contains(&"cargo test --workspace --release".to_string()));
    assert!(commands.contains(&"cargo build --workspace --release".to_string()));

    let detailed = env.run_json_guide(&["guide", "--platform", "generic-unix"]);
    let text = detailed["data"]["text"].as_str().expect("rendered text");
    assert!(text.contains("cargo test --workspace --release"));
    assert!(text.contains("cargo build --workspace --release"));
}

#[test]
fn fixture_guide_passes_validate_for_all_platforms() {
    let env = TestEnv::new();

    let report = env.run_json_guide(&["validate"]);
    assert_eq!(report["ok"], true);
    assert_eq!(report["data"]["overall"], "ok");
}

#[test]
fn dep_named_twice_fails_validate_with_nonzero_exit() {
    let env = TestEnv::new();

    let manifest_path = env.guide_dir.join(".primer/guide.json");
    let mut manifest: Value =
        serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
    manifest["platforms"][0]["notes"] = serde_json::json!(["alpha-dev is ancient"]);
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest).unwrap()).unwrap();

    let out = env
        .cmd()
        .arg("--json")
        .arg("--guide")
        .arg(env.guide_dir.to_str().unwrap())
        .arg("validate")
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let report: Value = serde_json::from_slice(&out).expect("report json");
    assert_eq!(report["ok"], false);
    assert_eq!(report["data"]["overall"], "needs_attention");
    let failed: Vec<&str> = report["data"]["checks"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["status"] == "failed")
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(failed, ["dep-mention-count"]);
}

#[test]
fn mark_done_progress_reset_cycle() {
    let env = TestEnv::new();

    let marked = env.run_json_guide(&["mark-done", "toolchain", "--platform", "generic-unix"]);
    assert_eq!(marked["ok"], true);
    assert_eq!(marked["data"]["step"], "toolchain");

    let progress = env.run_json_guide(&["progress", "--platform", "generic-unix"]);
    assert_eq!(progress["data"]["done"], serde_json::json!(["toolchain"]));
    let pending = progress["data"]["pending"].as_array().unwrap();
    assert_eq!(pending.len(), 4);

    // Progress is tracked per platform.
    let windows = env.run_json_guide(&["progress", "--platform", "windows"]);
    assert_eq!(windows["data"]["done"], serde_json::json!([]));

    let reset = env.run_json_guide(&["reset"]);
    assert_eq!(reset["data"], 1);

    let after = env.run_json_guide(&["progress", "--platform", "generic-unix"]);
    assert_eq!(after["data"]["done"], serde_json::json!([]));
}

#[test]
fn mark_done_rejects_steps_the_platform_does_not_render() {
    let env = TestEnv::new();

    let out = env
        .cmd()
        .arg("--json")
        .arg("--guide")
        .arg(env.guide_dir.to_str().unwrap())
        .args(["mark-done", "pins", "--platform", "generic-unix"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let err: Value = serde_json::from_slice(&out).expect("error json");
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"]["code"], "STEP_NOT_FOUND");
}

#[test]
fn source_add_then_listing_spans_builtin_and_registered_guides() {
    let env = TestEnv::new();

    let added = env.run_json(&["source", "add", env.guide_dir.to_str().unwrap()]);
    assert_eq!(added["ok"], true);
    assert_eq!(added["data"]["name"], "demo");

    let sources = env.run_json(&["source", "list"]);
    let names: Vec<&str> = sources["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"builtin"));
    assert!(names.contains(&"demo"));

    let guides = env.run_json(&["list"]);
    let listed: Vec<&str> = guides["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert!(listed.contains(&"lighthouse"));
    assert!(listed.contains(&"demo"));
}

#[test]
fn config_allowlist_blocks_unlisted_remote_sources() {
    let env = TestEnv::new();

    let config_path = env.home.join(".config/primer/config.toml");
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(
        &config_path,
        r#"[general]
allowed_sources = ["sigp/lighthouse"]
"#,
    )
    .unwrap();

    let out = env
        .cmd()
        .arg("--json")
        .arg("--guide")
        .arg("evil/guides")
        .arg("deps")
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let err: Value = serde_json::from_slice(&out).expect("error json");
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"]["code"], "SOURCE_NOT_ALLOWED");

    // Local fixture sources stay usable under the same allowlist.
    let deps = env.run_json_guide(&["deps"]);
    assert_eq!(deps["ok"], true);
}

#[test]
fn author_flow_scaffolds_a_guide_that_validates() {
    let env = TestEnv::new();
    let authored = env.home.join("authored");
    fs::create_dir_all(&authored).unwrap();
    let dir = authored.to_str().unwrap();

    let init = env.run_json(&[
        "author", "init", "--guide-dir", dir, "--name", "authored", "--repo",
        "https://example.com/authored/authored", "--summary", "Build authored from source.",
    ]);
    assert_eq!(init["ok"], true);

    let dep = env.run_json(&[
        "author", "dep", "add", "delta", "--guide-dir", dir, "--purpose", "archives",
        "--probe", "delta-tool",
    ]);
    assert_eq!(dep["ok"], true);

    let pin = env.run_json(&[
        "author", "pin", "add", "epsilon-sys", "2.0.1", "--guide-dir", dir, "--platform",
        "windows",
    ]);
    assert_eq!(pin["ok"], true);

    let report = env.run_json(&["--guide", dir, "validate"]);
    assert_eq!(report["data"]["overall"], "ok");

    env.cmd()
        .args(["--guide", dir, "guide", "--platform", "windows"])
        .assert()
        .success()
        .stdout(contains("epsilon-sys"));
}
