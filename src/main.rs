mod argsets;
mod command;

use anyhow::{anyhow, Result};
use everblu_meter::helpers::{self, CONFIG_PATH};

const CMD_VALIDATE: &str = "validate";
const CMD_BUILD_FLAGS: &str = "build-flags";
const CMD_CALLS: &str = "calls";
const CMD_DUMP_CONFIG: &str = "dump-config";

fn main() -> Result<()> {
    let dotenv_path = helpers::load_dotenv();
    helpers::init_logging();
    if let Some(path) = dotenv_path {
        log::debug!("Loaded {}", path.display());
    }

    let mut args = pico_args::Arguments::from_env();
    let subcommand = args.subcommand()?;
    let config_args = argsets::ConfigArgs {
        config_path: args
            .opt_free_from_str()?
            .unwrap_or_else(|| CONFIG_PATH.clone()),
    };
    let unused = args.finish();
    if !unused.is_empty() {
        return Err(anyhow!("Unexpected arguments: {:?}", unused));
    }

    match subcommand.as_deref() {
        Some(CMD_VALIDATE) => command::validate(config_args),
        Some(CMD_BUILD_FLAGS) => command::build_flags(config_args),
        Some(CMD_CALLS) => command::calls(config_args),
        Some(CMD_DUMP_CONFIG) => command::dump_config(config_args),
        _ => Err(anyhow!(
            "Subcommand must be one of 'validate', 'build-flags', 'calls', 'dump-config'"
        )),
    }
}
