//! Per-run scenario context
//!
//! Every run owns its own context: identifier, fetched code, handles.
//! Nothing is shared between runs, so concurrent runs only need distinct
//! identifiers and their own browser sessions.

use std::time::Duration;

use digielv_common::{MobileNumber, Otp, RunConfig, SessionStore};
use digielv_driver::Actuator;

/// State threaded through the steps of one scenario run.
pub struct RunContext {
    pub actuator: Actuator,
    pub store: SessionStore,
    pub config: RunConfig,
    /// Identifier this run logs in as. Validated at construction.
    pub mobile: MobileNumber,
    /// One-time code fetched by the preamble; consumed by the entry step.
    pub otp: Option<Otp>,
}

impl RunContext {
    pub fn new(
        actuator: Actuator,
        store: SessionStore,
        config: RunConfig,
        mobile: MobileNumber,
    ) -> Self {
        Self {
            actuator,
            store,
            config,
            mobile,
            otp: None,
        }
    }

    /// Wait budget for mandatory element waits.
    pub fn timeout(&self) -> Duration {
        self.config.default_timeout()
    }
}
