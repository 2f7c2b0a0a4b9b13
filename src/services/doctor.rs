use crate::domain::models::{CheckItem, DoctorReport};
use crate::guide::{platform_section, Guide, GuideError, PlatformId};
use crate::services::platform::find_in_path;
use tracing::debug;

/// Tools every guide needs regardless of platform section.
const BASE_TOOLS: [&str; 3] = ["rustup", "cargo", "git"];

fn probe(name: &str) -> CheckItem {
    let status = match find_in_path(name) {
        Some(path) => {
            debug!(tool = name, path = %path.display(), "probe ok");
            "ok"
        }
        None => "missing",
    };
    CheckItem {
        name: name.to_string(),
        status: status.to_string(),
    }
}

pub fn run_doctor(guide: &Guide, platform: PlatformId) -> Result<DoctorReport, GuideError> {
    let section = platform_section(guide, platform)?;
    let mut checks = Vec::new();

    for tool in BASE_TOOLS {
        checks.push(probe(tool));
    }

    for dep in &guide.native_deps {
        match &dep.probe {
            Some(bin) => {
                let mut item = probe(bin);
                item.name = dep.name.clone();
                checks.push(item);
            }
            // Library-only packages ship no executable to look up.
            None => checks.push(CheckItem {
                name: dep.name.clone(),
                status: "unchecked".to_string(),
            }),
        }
    }

    for extra in &section.probes {
        checks.push(probe(extra));
    }

    let overall = if checks.iter().any(|c| c.status == "missing") {
        "needs_attention"
    } else {
        "ok"
    }
    .to_string();

    Ok(DoctorReport {
        overall,
        platform: platform.to_string(),
        checks,
    })
}
