use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Source string that resolves to the embedded guide.
pub const BUILTIN_GUIDE_SOURCE: &str = "builtin";

const BUILTIN_GUIDE_JSON: &str = include_str!("../guides/lighthouse.json");

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Guide {
    pub name: String,
    pub summary: String,
    pub repository: Repository,
    pub toolchain: Toolchain,
    pub native_deps: Vec<NativeDep>,
    pub commands: BuildCommands,
    pub platforms: Vec<PlatformSection>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Repository {
    pub url: String,
    #[serde(default)]
    pub submodules: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Toolchain {
    pub channel: String,
    #[serde(default)]
    pub nightly_compatible: bool,
    pub inspect: String,
    pub update: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NativeDep {
    pub name: String,
    pub purpose: Option<String>,
    /// Executable the doctor can look up on PATH. Library-only packages
    /// carry no probe and are reported as unchecked.
    pub probe: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BuildCommands {
    pub test: String,
    pub build: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PlatformSection {
    pub id: PlatformId,
    pub package_manager: String,
    pub install_prefix: String,
    #[serde(default)]
    pub extra_packages: Vec<String>,
    #[serde(default)]
    pub probes: Vec<String>,
    #[serde(default)]
    pub pins: Vec<VersionPin>,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// A manual dependency version-constraint edit required on one platform.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VersionPin {
    pub dependency: String,
    pub pin: String,
    pub file: String,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformId {
    GenericUnix,
    Windows,
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformId::GenericUnix => write!(f, "generic-unix"),
            PlatformId::Windows => write!(f, "windows"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum GuideError {
    #[error("guide has no section for platform: {0}")]
    PlatformNotCovered(PlatformId),
    #[error("step not found: {0}")]
    StepNotFound(String),
    #[error("guide source not allowed by config: {0}")]
    SourceNotAllowed(String),
}

impl GuideError {
    /// Stable machine code for the JSON error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            GuideError::PlatformNotCovered(_) => "PLATFORM_NOT_COVERED",
            GuideError::StepNotFound(_) => "STEP_NOT_FOUND",
            GuideError::SourceNotAllowed(_) => "SOURCE_NOT_ALLOWED",
        }
    }
}

fn looks_like_github_shorthand(source: &str) -> bool {
    source.split('/').count() == 2 && !source.contains("://") && !source.starts_with('.')
}

fn normalize_source(source: &str) -> String {
    if looks_like_github_shorthand(source) {
        format!(
            "https://raw.githubusercontent.com/{}/main/.primer/guide.json",
            source
        )
    } else {
        source.to_string()
    }
}

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://")
        || source.starts_with("https://")
        || looks_like_github_shorthand(source)
}

pub fn resolve_guide_file(source: &str) -> PathBuf {
    let p = Path::new(source);
    if p.is_dir() {
        p.join(".primer").join("guide.json")
    } else {
        p.to_path_buf()
    }
}

fn cache_path(source: &str) -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    let id = hex::encode(hasher.finalize());
    Ok(PathBuf::from(home)
        .join(".cache")
        .join("primer")
        .join("guides")
        .join(format!("{}.json", id)))
}

fn fetch_guide_text(source: &str, timeout_ms: u64) -> anyhow::Result<String> {
    let url = normalize_source(source);
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()?;
    let resp = client.get(url).send()?.error_for_status()?;
    Ok(resp.text()?)
}

pub fn refresh_guide(source: &str) -> anyhow::Result<()> {
    if !is_remote(source) {
        return Ok(());
    }
    let body = fetch_guide_text(source, 3000)?;
    let cache = cache_path(source)?;
    if let Some(parent) = cache.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(cache, body)?;
    Ok(())
}

pub fn load_guide(source: &str) -> anyhow::Result<Guide> {
    if source == BUILTIN_GUIDE_SOURCE {
        return builtin_guide();
    }

    if is_remote(source) {
        let cache = cache_path(source)?;
        match fetch_guide_text(source, 2500) {
            Ok(body) => {
                if let Some(parent) = cache.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&cache, &body)?;
                return Ok(serde_json::from_str(&body)?);
            }
            Err(_) if cache.exists() => {
                let raw = std::fs::read_to_string(cache)?;
                return Ok(serde_json::from_str(&raw)?);
            }
            Err(e) => return Err(e),
        }
    }

    let file = resolve_guide_file(source);
    let raw = std::fs::read_to_string(file)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn builtin_guide() -> anyhow::Result<Guide> {
    Ok(serde_json::from_str(BUILTIN_GUIDE_JSON)?)
}

pub fn platform_section(guide: &Guide, platform: PlatformId) -> Result<&PlatformSection, GuideError> {
    guide
        .platforms
        .iter()
        .find(|p| p.id == platform)
        .ok_or(GuideError::PlatformNotCovered(platform))
}

/// All pins across every platform section, in declaration order.
pub fn all_pins(guide: &Guide) -> Vec<&VersionPin> {
    guide.platforms.iter().flat_map(|p| p.pins.iter()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_guide_parses_and_covers_both_platforms() {
        let g = builtin_guide().expect("builtin guide parses");
        assert_eq!(g.name, "lighthouse");
        assert!(platform_section(&g, PlatformId::GenericUnix).is_ok());
        assert!(platform_section(&g, PlatformId::Windows).is_ok());
        assert_eq!(g.native_deps.len(), 4);
    }

    #[test]
    fn only_windows_carries_pins_in_builtin_guide() {
        let g = builtin_guide().unwrap();
        let unix = platform_section(&g, PlatformId::GenericUnix).unwrap();
        let windows = platform_section(&g, PlatformId::Windows).unwrap();
        assert!(unix.pins.is_empty());
        assert_eq!(windows.pins.len(), 1);
    }

    #[test]
    fn github_shorthand_normalizes_to_raw_manifest() {
        assert_eq!(
            normalize_source("sigp/lighthouse"),
            "https://raw.githubusercontent.com/sigp/lighthouse/main/.primer/guide.json"
        );
        assert!(is_remote("sigp/lighthouse"));
        assert!(!is_remote("builtin"));
        assert!(!is_remote("./fixtures/demo"));
    }

    #[test]
    fn directory_sources_resolve_to_manifest_path() {
        let tmp = std::env::temp_dir();
        assert_eq!(
            resolve_guide_file(tmp.to_str().unwrap()),
            tmp.join(".primer").join("guide.json")
        );
        assert_eq!(
            resolve_guide_file("guide.json"),
            PathBuf::from("guide.json")
        );
    }
}
