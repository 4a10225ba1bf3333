use anyhow::Result;

use super::load_config;
use crate::argsets::ConfigArgs;

pub fn validate(args: ConfigArgs) -> Result<()> {
    let config = load_config(&args)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    log::info!("Configuration {} is valid", args.config_path.display());
    Ok(())
}
