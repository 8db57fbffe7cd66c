//! The five DigiELV business flows, each as a login preamble plus
//! flow-specific steps.

pub mod bank_account;
pub mod bid_cancel;
pub mod cd_sell;
pub mod market_offer;
pub mod withdrawal;

use crate::runner::Scenario;

/// All scenarios in a stable order.
pub fn all() -> Vec<Scenario> {
    vec![
        withdrawal::scenario(),
        bank_account::scenario(),
        bid_cancel::scenario(),
        cd_sell::scenario(),
        market_offer::scenario(),
    ]
}

/// Look a scenario up by its registered name.
pub fn by_name(name: &str) -> Option<Scenario> {
    all().into_iter().find(|s| s.name == name)
}

/// Registered scenario names, for CLI help and validation.
pub fn names() -> Vec<&'static str> {
    all().iter().map(|s| s.name).collect()
}
