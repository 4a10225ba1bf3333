use std::path::PathBuf;

/// Load a local `.env`, returning its path if one was found.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenv::dotenv().ok()
}
