//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `admin.rs` — guide authoring command tree.
//! - `runtime.rs` — guide/quickstart/doctor/validate/progress/source/etc.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod admin;
pub mod runtime;

pub use admin::handle_author_commands;
pub use runtime::handle_runtime_commands;
