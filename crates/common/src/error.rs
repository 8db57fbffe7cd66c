//! Error types shared across the suite

use thiserror::Error;

/// Result type alias using the suite Error
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by the common layer.
///
/// `Database` covers transport and query failures against the session store.
/// A lookup that finds no record is not an error; `SessionStore::fetch_otp`
/// reports it as `Ok(None)` so callers cannot collapse the two cases.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid mobile number {0:?}: expected exactly 10 digits")]
    InvalidMobile(String),

    #[error("invalid one-time code {0:?}: expected exactly 6 digits")]
    InvalidOtp(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
