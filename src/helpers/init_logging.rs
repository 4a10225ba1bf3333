use env_logger::Env;

use crate::constants::{defaults, envvars};

/// Initialize env_logger.
///
/// Respects the LOG_LEVEL env var, defaulting to "info". Log output goes
/// to stderr so that command output on stdout stays machine readable.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        Env::default().filter_or(envvars::LOG_LEVEL, defaults::LOG_LEVEL),
    )
    .try_init();
}
