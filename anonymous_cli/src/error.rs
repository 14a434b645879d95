use hex::FromHexError;
use libanonymous::CryptoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid hex for {field}: {source}")]
    InvalidHex {
        field: &'static str,
        #[source]
        source: FromHexError,
    },
    #[error("{0}")]
    Crypto(#[from] CryptoError),
    #[error("Could not format output: {0}")]
    Json(#[from] serde_json::Error),
}
