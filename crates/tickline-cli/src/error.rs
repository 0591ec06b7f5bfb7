use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] tickline_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Remark cannot be empty")]
    EmptyRemark,
    #[error(
        "Not signed in. Run `tickline auth login --email <email> --password <password>` first."
    )]
    NotSignedIn,
    #[error(
        "No API base URL configured. Run `tickline config init --api-base-url <url>` first."
    )]
    ApiNotConfigured,
}
