use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub guide_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let guide_dir = make_fixture_guide(tmp.path());

        Self {
            _tmp: tmp,
            home,
            guide_dir,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("primer").expect("primer binary");
        cmd.env("HOME", &self.home);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_guide(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .arg("--guide")
            .arg(self.guide_dir.to_str().expect("guide path utf8"))
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

pub fn make_fixture_guide(base: &Path) -> PathBuf {
    let dir = base.join("demo-guide");
    fs::create_dir_all(dir.join(".primer")).expect("create .primer");

    let manifest = serde_json::json!({
        "name": "demo",
        "summary": "Build the demo service from source.",
        "repository": {"url": "https://example.com/demo/demo", "submodules": true},
        "toolchain": {
            "channel": "stable",
            "nightly_compatible": true,
            "inspect": "rustup show",
            "update": "rustup update"
        },
        "native_deps": [
            {"name": "alpha-dev", "purpose": "linker support", "probe": null},
            {"name": "beta", "purpose": "code generation", "probe": "beta-codegen"}
        ],
        "commands": {
            "test": "cargo test --workspace --release",
            "build": "cargo build --workspace --release"
        },
        "platforms": [
            {
                "id": "generic-unix",
                "package_manager": "apt",
                "install_prefix": "sudo apt install -y",
                "extra_packages": [],
                "probes": [],
                "pins": [],
                "notes": []
            },
            {
                "id": "windows",
                "package_manager": "choco",
                "install_prefix": "choco install -y",
                "extra_packages": ["gammaperl"],
                "probes": ["perl"],
                "pins": [
                    {"dependency": "gamma-sys", "pin": "1.2.3", "file": "Cargo.toml", "reason": "newer releases need gammaperl patches"}
                ],
                "notes": []
            }
        ]
    });
    fs::write(
        dir.join(".primer/guide.json"),
        serde_json::to_string_pretty(&manifest).expect("serialize guide"),
    )
    .expect("write guide manifest");

    dir
}
