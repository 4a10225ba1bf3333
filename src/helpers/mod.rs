mod config_path;
mod init_logging;
mod load_dotenv;

pub use config_path::CONFIG_PATH;
pub use init_logging::init_logging;
pub use load_dotenv::load_dotenv;
