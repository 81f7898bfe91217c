//! Opt-in diagnostic logging.
//!
//! Writing log lines to the terminal would corrupt the game screen, so nothing is installed
//! unless [`LOG_PATH_VAR`] names a file. The verbosity follows `RUST_LOG` and defaults to `info`.

use std::{env, fs::File};

use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

/// Environment variable holding the path of the log file.
pub const LOG_PATH_VAR: &str = "MERGETUINE_LOG";

/// Installs the global subscriber if [`LOG_PATH_VAR`] is set.
///
/// Returns whether a subscriber was installed. Failing to create the log file or finding another
/// subscriber already in place leaves logging disabled rather than aborting the game.
pub fn init_tracing() -> bool {
    let Ok(path) = env::var(LOG_PATH_VAR) else {
        return false;
    };
    let Ok(file) = File::create(&path) else {
        return false;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_ok()
}
