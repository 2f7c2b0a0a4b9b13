use crate::guide::{NativeDep, PlatformId, Toolchain};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct State {
    pub sources: Vec<SourceRef>,
    pub progress: Vec<StepRecord>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SourceRef {
    pub name: String,
    pub source: String,
}

/// One completed step of one guide on one platform.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StepRecord {
    pub guide: String,
    pub platform: PlatformId,
    pub step: String,
    pub completed_at: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub general: ConfigGeneral,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigGeneral {
    /// Overrides host auto-detection when set ("generic-unix" or "windows").
    #[serde(default)]
    pub default_platform: Option<String>,
    /// When non-empty, remote guide sources must match one entry.
    #[serde(default)]
    pub allowed_sources: Vec<String>,
}

/// One rendered instruction step.
#[derive(Debug, Serialize, Clone)]
pub struct Step {
    pub id: String,
    pub title: String,
    pub commands: Vec<String>,
    pub notes: Vec<String>,
}

#[derive(Serialize)]
pub struct GuideRender {
    pub guide: String,
    pub platform: String,
    pub steps: Vec<Step>,
    pub text: String,
}

#[derive(Serialize)]
pub struct QuickstartRender {
    pub guide: String,
    pub platform: String,
    pub commands: Vec<String>,
}

#[derive(Serialize)]
pub struct DepsReport {
    pub guide: String,
    pub native_deps: Vec<NativeDep>,
}

#[derive(Serialize)]
pub struct ToolchainReport {
    pub guide: String,
    pub toolchain: Toolchain,
}

#[derive(Serialize)]
pub struct CheckItem {
    pub name: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct DoctorReport {
    pub overall: String,
    pub platform: String,
    pub checks: Vec<CheckItem>,
}

#[derive(Serialize)]
pub struct ConsistencyCheck {
    pub name: String,
    pub platform: Option<String>,
    pub status: String,
    pub detail: Option<String>,
}

#[derive(Serialize)]
pub struct ConsistencyReport {
    pub overall: String,
    pub checks: Vec<ConsistencyCheck>,
}

#[derive(Serialize)]
pub struct ProgressReport {
    pub guide: String,
    pub platform: String,
    pub done: Vec<String>,
    pub pending: Vec<String>,
}

#[derive(Serialize, Clone)]
pub struct GuideSummary {
    pub name: String,
    pub source: String,
    pub summary: String,
    pub platforms: Vec<String>,
}
