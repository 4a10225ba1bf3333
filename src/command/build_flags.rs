use anyhow::Result;
use everblu_meter::codegen::{self, BuildContext};
use everblu_meter::driver::SetterLog;

use super::load_config;
use crate::argsets::ConfigArgs;

pub fn build_flags(args: ConfigArgs) -> Result<()> {
    let config = load_config(&args)?;
    let mut ctx = BuildContext::new();
    codegen::to_code(&config, &mut ctx, &mut SetterLog::new());
    for flag in ctx.build_flags() {
        println!("{flag}");
    }
    Ok(())
}
