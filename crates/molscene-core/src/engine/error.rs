use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::mol::MolError;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read MOL data: {0}")]
    Parse(#[from] MolError),

    #[error(
        "Bond on line {line} references atom {index} as its {field}, but valid atom indices are 1 to {atom_count}"
    )]
    Reference {
        line: usize,
        field: &'static str,
        index: usize,
        atom_count: usize,
    },

    #[error("Invalid import configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Scene construction failed: {message}")]
    Scene {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
