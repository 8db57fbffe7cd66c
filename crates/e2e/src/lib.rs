//! DigiELV acceptance scenarios
//!
//! Each scenario is an ordered, dependency-chained list of named steps: the
//! shared login/OTP preamble followed by one business flow. The runner
//! executes steps strictly in order, cascade-skips dependents of a failed
//! step, and always runs teardown (login-flag reset, browser session close)
//! whatever the body did.

pub mod context;
pub mod login;
pub mod runner;
pub mod scenarios;

pub use context::RunContext;
pub use runner::{
    execute_steps, Runner, Scenario, ScenarioResult, Step, StepRecord, StepStatus, SuiteResult,
};
