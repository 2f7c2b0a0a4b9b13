use crate::domain::models::{ConfigFile, ConfigGeneral};
use crate::guide::{is_remote, GuideError};
use std::path::PathBuf;

pub fn load_config() -> anyhow::Result<ConfigFile> {
    let home = std::env::var("HOME")?;
    let path = PathBuf::from(home).join(".config/primer/config.toml");
    if !path.exists() {
        return Ok(ConfigFile {
            general: ConfigGeneral::default(),
        });
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// Remote sources must match the allowlist when one is configured.
/// Local paths and the builtin guide are always allowed.
pub fn enforce_source_allowed(config: &ConfigFile, source: &str) -> Result<(), GuideError> {
    if config.general.allowed_sources.is_empty() || !is_remote(source) {
        return Ok(());
    }
    if config
        .general
        .allowed_sources
        .iter()
        .any(|allowed| source_matches_allowed(source, allowed))
    {
        Ok(())
    } else {
        Err(GuideError::SourceNotAllowed(source.to_string()))
    }
}

pub fn canonical_source_id(raw: &str) -> String {
    let s = raw.trim();

    if s.split('/').count() == 2 && !s.contains("://") && !s.starts_with('.') {
        return format!("github:{}", s.to_ascii_lowercase());
    }

    if let Some(rest) = s.strip_prefix("https://github.com/") {
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() >= 2 {
            let owner = parts[0];
            let repo = parts[1].trim_end_matches(".git");
            if !owner.is_empty() && !repo.is_empty() {
                return format!(
                    "github:{}/{}",
                    owner.to_ascii_lowercase(),
                    repo.to_ascii_lowercase()
                );
            }
        }
    }

    if let Some(rest) = s.strip_prefix("https://raw.githubusercontent.com/") {
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() >= 2 {
            let owner = parts[0];
            let repo = parts[1];
            if !owner.is_empty() && !repo.is_empty() {
                return format!(
                    "github:{}/{}",
                    owner.to_ascii_lowercase(),
                    repo.to_ascii_lowercase()
                );
            }
        }
    }

    let p = PathBuf::from(s);
    if p.exists() {
        if let Ok(c) = p.canonicalize() {
            return format!("path:{}", c.to_string_lossy());
        }
    }

    s.trim_end_matches('/').to_ascii_lowercase()
}

pub fn source_matches_allowed(source: &str, allowed: &str) -> bool {
    canonical_source_id(source) == canonical_source_id(allowed)
}
