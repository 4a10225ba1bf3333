use anyhow::Result;
use everblu_meter::codegen::{self, BuildContext};
use everblu_meter::driver::SetterLog;

use super::load_config;
use crate::argsets::ConfigArgs;

pub fn calls(args: ConfigArgs) -> Result<()> {
    let config = load_config(&args)?;
    let mut setter_log = SetterLog::new();
    codegen::to_code(&config, &mut BuildContext::new(), &mut setter_log);
    for call in setter_log.calls() {
        println!("{call}");
    }
    Ok(())
}
