//! DigiELV Acceptance Suite Common Library
//!
//! Shared pieces consumed by every scenario run: the validated identifier and
//! one-time-code types, the run configuration, and the session-store client
//! used to fetch OTPs and reset the logged-in flag at teardown.

pub mod config;
pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::{FlowValues, RunConfig};
pub use error::{Error, Result};
pub use store::SessionStore;
pub use types::{MobileNumber, Otp};

/// Suite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
