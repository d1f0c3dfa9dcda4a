use crate::cli::OutputFormat;
use molscene::engine::config::ImportConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub format: OutputFormat,
    pub core_config: ImportConfig,
}
