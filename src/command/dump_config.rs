use anyhow::Result;
use everblu_meter::codegen::{self, BuildContext};
use everblu_meter::driver::EverbluMeterComponent;

use super::load_config;
use crate::argsets::ConfigArgs;

pub fn dump_config(args: ConfigArgs) -> Result<()> {
    let config = load_config(&args)?;
    let mut component = EverbluMeterComponent::new(config.id.as_str());
    codegen::to_code(&config, &mut BuildContext::new(), &mut component);
    component.setup();
    component.dump_config();
    Ok(())
}
