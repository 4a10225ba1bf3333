use std::{env, path::PathBuf};

use once_cell::sync::Lazy;

use crate::constants::{defaults, envvars};

/// Config file used when none is given on the command line.
pub static CONFIG_PATH: Lazy<PathBuf> = Lazy::new(|| {
    if let Ok(config_path) = env::var(envvars::CONFIG_PATH) {
        return config_path.into();
    }
    PathBuf::from(defaults::CONFIG_FILE)
});
