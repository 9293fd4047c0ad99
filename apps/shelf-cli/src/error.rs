//! # CLI Errors
//!
//! Everything that can stop a `shelf` command, in one enum.

use shelf_core::CatalogError;
use shelf_io::LoadError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration could not be read or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A data file could not be loaded.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// A purchase or return was refused.
    #[error("Operation refused: {0}")]
    Catalog(#[from] CatalogError),

    /// An argument was syntactically fine but unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing to the console failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// JSON rendering failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::ProductId;

    #[test]
    fn test_wraps_catalog_error() {
        let err: CliError = CatalogError::NotInInventory(ProductId::from("L404")).into();
        assert!(matches!(err, CliError::Catalog(_)));
        assert!(err.to_string().contains("L404"));
    }

    #[test]
    fn test_wraps_load_error() {
        let err: CliError = LoadError::malformed(3, "expected 5 fields, found 2").into();
        assert!(err.to_string().starts_with("Load error:"));
    }
}
