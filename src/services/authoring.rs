use std::path::PathBuf;

fn guide_manifest_path(guide_dir: &str) -> PathBuf {
    PathBuf::from(guide_dir).join(".primer/guide.json")
}

fn load_guide_value(guide_dir: &str) -> anyhow::Result<serde_json::Value> {
    let p = guide_manifest_path(guide_dir);
    Ok(serde_json::from_str(&std::fs::read_to_string(p)?)?)
}

fn save_guide_value(guide_dir: &str, v: &serde_json::Value) -> anyhow::Result<()> {
    let p = guide_manifest_path(guide_dir);
    if let Some(parent) = p.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(p, serde_json::to_string_pretty(v)?)?;
    Ok(())
}

fn ensure_array_field<'a>(
    obj: &'a mut serde_json::Value,
    field: &str,
) -> anyhow::Result<&'a mut Vec<serde_json::Value>> {
    if obj.get(field).is_none() {
        obj[field] = serde_json::Value::Array(vec![]);
    }
    obj.get_mut(field)
        .and_then(|x| x.as_array_mut())
        .ok_or_else(|| anyhow::anyhow!("invalid array field {}", field))
}

fn platform_section_mut<'a>(
    m: &'a mut serde_json::Value,
    platform: &str,
) -> anyhow::Result<&'a mut serde_json::Value> {
    let arr = m
        .get_mut("platforms")
        .and_then(|x| x.as_array_mut())
        .ok_or_else(|| anyhow::anyhow!("missing platforms array"))?;
    arr.iter_mut()
        .find(|p| p.get("id").and_then(|x| x.as_str()) == Some(platform))
        .ok_or_else(|| anyhow::anyhow!("platform section not found: {}", platform))
}

/// Scaffold a guide directory with a manifest covering both platforms.
pub fn guide_init(guide_dir: &str, name: &str, repo: &str, summary: &str) -> anyhow::Result<()> {
    let p = guide_manifest_path(guide_dir);
    if p.exists() {
        anyhow::bail!("guide manifest exists: {}", p.display());
    }
    let manifest = serde_json::json!({
        "name": name,
        "summary": summary,
        "repository": {"url": repo, "submodules": false},
        "toolchain": {
            "channel": "stable",
            "nightly_compatible": true,
            "inspect": "rustup show",
            "update": "rustup update"
        },
        "native_deps": [],
        "commands": {
            "test": "cargo test --all --release",
            "build": "cargo build --all --release"
        },
        "platforms": [
            {"id": "generic-unix", "package_manager": "apt", "install_prefix": "sudo apt install -y", "extra_packages": [], "probes": [], "pins": [], "notes": []},
            {"id": "windows", "package_manager": "choco", "install_prefix": "choco install -y", "extra_packages": [], "probes": [], "pins": [], "notes": []}
        ]
    });
    save_guide_value(guide_dir, &manifest)
}

pub fn dep_add(
    guide_dir: &str,
    name: &str,
    purpose: Option<&str>,
    probe: Option<&str>,
) -> anyhow::Result<()> {
    let mut m = load_guide_value(guide_dir)?;
    let deps = ensure_array_field(&mut m, "native_deps")?;
    if deps
        .iter()
        .any(|d| d.get("name").and_then(|x| x.as_str()) == Some(name))
    {
        anyhow::bail!("native dependency exists: {}", name);
    }
    deps.push(serde_json::json!({"name": name, "purpose": purpose, "probe": probe}));
    save_guide_value(guide_dir, &m)
}

pub fn dep_remove(guide_dir: &str, name: &str) -> anyhow::Result<()> {
    let mut m = load_guide_value(guide_dir)?;
    let deps = ensure_array_field(&mut m, "native_deps")?;
    deps.retain(|d| d.get("name").and_then(|x| x.as_str()) != Some(name));
    save_guide_value(guide_dir, &m)
}

pub fn pin_add(
    guide_dir: &str,
    platform: &str,
    dependency: &str,
    pin: &str,
    file: &str,
    reason: Option<&str>,
) -> anyhow::Result<()> {
    let mut m = load_guide_value(guide_dir)?;
    let section = platform_section_mut(&mut m, platform)?;
    let pins = ensure_array_field(section, "pins")?;
    pins.retain(|p| p.get("dependency").and_then(|x| x.as_str()) != Some(dependency));
    pins.push(serde_json::json!({
        "dependency": dependency,
        "pin": pin,
        "file": file,
        "reason": reason
    }));
    save_guide_value(guide_dir, &m)
}

pub fn pin_remove(guide_dir: &str, platform: &str, dependency: &str) -> anyhow::Result<()> {
    let mut m = load_guide_value(guide_dir)?;
    let section = platform_section_mut(&mut m, platform)?;
    let pins = ensure_array_field(section, "pins")?;
    pins.retain(|p| p.get("dependency").and_then(|x| x.as_str()) != Some(dependency));
    save_guide_value(guide_dir, &m)
}
