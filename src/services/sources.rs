use crate::cli::DEFAULT_GUIDE_SOURCE;
use crate::domain::models::{ConfigFile, GuideSummary, SourceRef, State};
use crate::guide;
use crate::services::config::enforce_source_allowed;
use crate::services::storage::save_state;
use std::collections::HashSet;
use tracing::warn;

pub fn ensure_builtin_source(state: &mut State) -> anyhow::Result<()> {
    if !state
        .sources
        .iter()
        .any(|s| s.source == DEFAULT_GUIDE_SOURCE)
    {
        state.sources.insert(
            0,
            SourceRef {
                name: "builtin".to_string(),
                source: DEFAULT_GUIDE_SOURCE.to_string(),
            },
        );
        save_state(state)?;
    }
    Ok(())
}

pub fn dedupe_sources(sources: &mut Vec<SourceRef>) {
    let mut seen = HashSet::new();
    sources.retain(|s| seen.insert(format!("{}::{}", s.name, s.source)));
}

/// Load a guide source after the config allowlist has had its say.
pub fn checked_load_guide(source: &str, config: &ConfigFile) -> anyhow::Result<guide::Guide> {
    enforce_source_allowed(config, source)?;
    guide::load_guide(source)
}

/// Guides visible across the registered sources. Sources that fail to load
/// are skipped rather than failing the listing.
pub fn guides_across(sources: &[SourceRef], config: &ConfigFile) -> Vec<GuideSummary> {
    let mut out = Vec::new();
    for s in sources {
        match checked_load_guide(&s.source, config) {
            Ok(g) => out.push(GuideSummary {
                name: g.name.clone(),
                source: s.source.clone(),
                summary: g.summary.clone(),
                platforms: g.platforms.iter().map(|p| p.id.to_string()).collect(),
            }),
            Err(e) => {
                warn!(source = %s.source, error = %e, "skipping unloadable guide source");
            }
        }
    }
    out
}
