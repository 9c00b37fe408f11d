use crate::cli::{actions::Action, commands, dispatch::handler, globals::GlobalArgs, telemetry};
use anyhow::Result;
use tracing::debug;

/// Start the CLI
/// # Errors
/// Returns an error if logging cannot be initialized or the arguments are incomplete.
pub fn start() -> Result<(Action, GlobalArgs)> {
    let matches = commands::new().get_matches();

    let verbosity = matches.get_one::<u8>("verbosity").map_or(0, |&v| v);
    telemetry::init(Some(telemetry::verbosity_level(verbosity)))?;
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        commit = crate::GIT_COMMIT_HASH,
        "starting scireg"
    );

    handler(&matches)
}
