//! Error types for the interaction substrate

use std::time::Duration;
use thirtyfour::error::WebDriverError;
use thiserror::Error;

/// Result type alias for substrate operations
pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Substrate failure taxonomy.
///
/// Every variant that involves a locator carries the target description, so
/// a failed step reports what was attempted, not just the WebDriver message.
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("timed out after {waited:?} waiting for {target}")]
    Timeout { target: String, waited: Duration },

    #[error("element {target} found but not interactable: {source}")]
    NotInteractable {
        target: String,
        #[source]
        source: WebDriverError,
    },

    #[error("code entry shape mismatch: {fields} input fields for {digits} digits")]
    ShapeMismatch { fields: usize, digits: usize },

    #[error("code entry field discovery: expected {expected} fields, found {found}")]
    IncompleteEntry { expected: usize, found: usize },

    #[error("action on {target} failed: {source}")]
    Action {
        target: String,
        #[source]
        source: WebDriverError,
    },

    #[error(transparent)]
    Validation(#[from] digielv_common::Error),

    #[error(transparent)]
    WebDriver(#[from] WebDriverError),
}
