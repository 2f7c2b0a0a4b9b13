use crate::domain::models::{State, StepRecord};
use crate::guide::PlatformId;
use std::path::PathBuf;

pub fn audit(action: &str, data: serde_json::Value) {
    let home = match std::env::var("HOME") {
        Ok(h) => h,
        Err(_) => return,
    };
    let path = PathBuf::from(home).join(".config/primer/audit.jsonl");
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let event = serde_json::json!({
        "ts": chrono::Utc::now().to_rfc3339(),
        "action": action,
        "data": data
    });
    let line = format!("{}\n", event);
    let _ = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()));
}

/// Record a completed step, replacing any earlier record for the same
/// guide/platform/step triple.
pub fn upsert_progress(state: &mut State, entry: StepRecord) {
    if let Some(existing) = state.progress.iter_mut().find(|r| {
        r.guide == entry.guide && r.platform == entry.platform && r.step == entry.step
    }) {
        *existing = entry;
    } else {
        state.progress.push(entry);
    }
}

/// Drop every progress record for one guide. Returns how many were removed.
pub fn clear_progress(state: &mut State, guide: &str) -> usize {
    let before = state.progress.len();
    state.progress.retain(|r| r.guide != guide);
    before.saturating_sub(state.progress.len())
}

pub fn completed_steps(state: &State, guide: &str, platform: PlatformId) -> Vec<String> {
    state
        .progress
        .iter()
        .filter(|r| r.guide == guide && r.platform == platform)
        .map(|r| r.step.clone())
        .collect()
}

fn state_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/primer/state.json"))
}

pub fn load_state() -> anyhow::Result<State> {
    let p = state_path()?;
    if !p.exists() {
        return Ok(State::default());
    }
    let raw = std::fs::read_to_string(p)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn save_state(s: &State) -> anyhow::Result<()> {
    let p = state_path()?;
    if let Some(parent) = p.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(p, serde_json::to_string_pretty(s)?)?;
    Ok(())
}
