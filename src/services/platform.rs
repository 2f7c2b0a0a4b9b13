use crate::cli::PlatformArg;
use crate::domain::models::ConfigFile;
use crate::guide::PlatformId;
use std::path::PathBuf;

pub fn host_platform() -> PlatformId {
    if cfg!(windows) {
        PlatformId::Windows
    } else {
        PlatformId::GenericUnix
    }
}

/// Resolution order: explicit argument, then config override, then host.
pub fn resolve_platform(arg: PlatformArg, config: &ConfigFile) -> PlatformId {
    match arg {
        PlatformArg::GenericUnix => PlatformId::GenericUnix,
        PlatformArg::Windows => PlatformId::Windows,
        PlatformArg::Auto => match config.general.default_platform.as_deref() {
            Some("generic-unix") => PlatformId::GenericUnix,
            Some("windows") => PlatformId::Windows,
            _ => host_platform(),
        },
    }
}

/// Look an executable up on PATH. Presence is the probe; nothing is run.
pub fn find_in_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path) {
        for candidate in candidates(name) {
            let p = dir.join(&candidate);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn candidates(name: &str) -> Vec<String> {
    if cfg!(windows) {
        vec![
            format!("{}.exe", name),
            format!("{}.cmd", name),
            format!("{}.bat", name),
            name.to_string(),
        ]
    } else {
        vec![name.to_string()]
    }
}
