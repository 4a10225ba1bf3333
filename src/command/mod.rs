mod build_flags;
mod calls;
mod dump_config;
mod validate;

pub use build_flags::build_flags;
pub use calls::calls;
pub use dump_config::dump_config;
pub use validate::validate;

use anyhow::{Context, Result};
use everblu_meter::config::{self, MeterConfig};

use crate::argsets::ConfigArgs;

fn load_config(args: &ConfigArgs) -> Result<MeterConfig> {
    config::from_path(&args.config_path).with_context(|| {
        format!(
            "Invalid meter configuration in {}",
            args.config_path.display()
        )
    })
}
