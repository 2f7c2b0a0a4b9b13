use crate::domain::models::{ConsistencyCheck, ConsistencyReport};
use crate::guide::{all_pins, Guide, PlatformId};
use crate::services::render::{render_detailed, render_quickstart};
use std::collections::HashSet;

/// Documentation-consistency checks, evaluated against the rendered
/// material rather than the manifest. Structural manifest checks run
/// first; rendering checks run per platform.
pub fn check_guide(guide: &Guide, platform: Option<PlatformId>) -> ConsistencyReport {
    let mut checks = structural_checks(guide);

    let platforms: Vec<PlatformId> = match platform {
        Some(p) => vec![p],
        None => guide.platforms.iter().map(|s| s.id).collect(),
    };
    for p in platforms {
        checks.extend(platform_checks(guide, p));
    }

    let overall = if checks.iter().all(|c| c.status == "ok") {
        "ok"
    } else {
        "needs_attention"
    }
    .to_string();

    ConsistencyReport { overall, checks }
}

fn structural_checks(guide: &Guide) -> Vec<ConsistencyCheck> {
    let mut checks = Vec::new();

    let mut seen = HashSet::new();
    let dup_platform = guide.platforms.iter().find(|s| !seen.insert(s.id));
    checks.push(structural(
        "platform-ids-unique",
        dup_platform.map(|s| format!("duplicate platform section: {}", s.id)),
    ));

    let mut seen = HashSet::new();
    let dup_dep = guide.native_deps.iter().find(|d| !seen.insert(&d.name));
    checks.push(structural(
        "dep-names-unique",
        dup_dep.map(|d| format!("duplicate native dependency: {}", d.name)),
    ));

    let missing = guide.commands.test.trim().is_empty() || guide.commands.build.trim().is_empty();
    checks.push(structural(
        "commands-present",
        missing.then(|| "test and build commands must be non-empty".to_string()),
    ));

    checks.push(structural(
        "has-platforms",
        guide
            .platforms
            .is_empty()
            .then(|| "guide covers no platform".to_string()),
    ));

    checks
}

fn structural(name: &str, failure: Option<String>) -> ConsistencyCheck {
    ConsistencyCheck {
        name: format!("structure/{}", name),
        platform: None,
        status: if failure.is_none() { "ok" } else { "failed" }.to_string(),
        detail: failure,
    }
}

fn platform_checks(guide: &Guide, platform: PlatformId) -> Vec<ConsistencyCheck> {
    let (detailed, quick) = match (
        render_detailed(guide, platform),
        render_quickstart(guide, platform),
    ) {
        (Ok(d), Ok(q)) => (d, q),
        _ => {
            return vec![ConsistencyCheck {
                name: "render".to_string(),
                platform: Some(platform.to_string()),
                status: "failed".to_string(),
                detail: Some("platform section missing".to_string()),
            }]
        }
    };

    let mut checks = Vec::new();
    checks.push(pin_coverage(guide, platform, &detailed));
    checks.push(dep_mention_count(guide, platform, &detailed));
    checks.push(command_agreement(guide, platform, &detailed, &quick));
    checks
}

/// The platform that carries version pins must reference every one of them;
/// every other platform must reference none.
fn pin_coverage(guide: &Guide, platform: PlatformId, detailed: &str) -> ConsistencyCheck {
    let own_pins: Vec<&str> = guide
        .platforms
        .iter()
        .filter(|s| s.id == platform)
        .flat_map(|s| s.pins.iter())
        .map(|p| p.dependency.as_str())
        .collect();

    let failure = if own_pins.is_empty() {
        all_pins(guide)
            .iter()
            .find(|p| detailed.contains(&p.dependency))
            .map(|p| format!("references foreign version pin: {}", p.dependency))
    } else {
        own_pins
            .iter()
            .find(|d| !detailed.contains(*d))
            .map(|d| format!("missing version pin reference: {}", d))
    };

    ConsistencyCheck {
        name: "pin-coverage".to_string(),
        platform: Some(platform.to_string()),
        status: if failure.is_none() { "ok" } else { "failed" }.to_string(),
        detail: failure,
    }
}

/// Each native dependency name appears exactly once in the detailed
/// rendering.
fn dep_mention_count(guide: &Guide, platform: PlatformId, detailed: &str) -> ConsistencyCheck {
    let failure = guide.native_deps.iter().find_map(|d| {
        let n = detailed.matches(d.name.as_str()).count();
        (n != 1).then(|| format!("{} mentioned {} times", d.name, n))
    });

    ConsistencyCheck {
        name: "dep-mention-count".to_string(),
        platform: Some(platform.to_string()),
        status: if failure.is_none() { "ok" } else { "failed" }.to_string(),
        detail: failure,
    }
}

/// Quickstart and detailed renderings reference the same test command and
/// the same build command.
fn command_agreement(
    guide: &Guide,
    platform: PlatformId,
    detailed: &str,
    quick: &[String],
) -> ConsistencyCheck {
    let mut failure = None;
    for (label, cmd) in [("test", &guide.commands.test), ("build", &guide.commands.build)] {
        let in_detailed = detailed.contains(cmd.as_str());
        let in_quick = quick.iter().any(|c| c == cmd);
        if !in_detailed || !in_quick {
            failure = Some(format!("{} command missing from a rendering", label));
            break;
        }
    }

    ConsistencyCheck {
        name: "command-agreement".to_string(),
        platform: Some(platform.to_string()),
        status: if failure.is_none() { "ok" } else { "failed" }.to_string(),
        detail: failure,
    }
}
