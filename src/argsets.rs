use std::path::PathBuf;

pub struct ConfigArgs {
    pub config_path: PathBuf,
}
