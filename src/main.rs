use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

pub mod cli;
pub mod commands;
pub mod domain;
pub mod guide;
pub mod services;

pub use cli::*;
pub use domain::models::*;
pub use services::config::*;
pub use services::consistency::*;
pub use services::doctor::*;
pub use services::output::*;
pub use services::platform::*;
pub use services::render::*;
pub use services::sources::*;
pub use services::storage::*;

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        emit_error(cli.json, &e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if commands::handle_author_commands(cli)? {
        return Ok(());
    }

    let config = load_config()?;
    let mut state = load_state()?;
    ensure_builtin_source(&mut state)?;

    // Best-effort refresh of allowed sources; offline operation falls
    // back to cached copies.
    for s in &state.sources {
        if enforce_source_allowed(&config, &s.source).is_ok() {
            let _ = guide::refresh_guide(&s.source);
        }
    }
    if enforce_source_allowed(&config, &cli.guide).is_ok() {
        let _ = guide::refresh_guide(&cli.guide);
    }

    let loaded = checked_load_guide(&cli.guide, &config)?;
    debug!(guide = %loaded.name, source = %cli.guide, "guide loaded");

    commands::handle_runtime_commands(cli, &config, &mut state, &loaded)
}
