//! Optional-interstitial handling
//!
//! Some overlays (the KYC prompt after login) may or may not appear. Absence
//! is a success path: the probe is bounded by a short budget and every
//! failure class, including a click racing the overlay's own dismissal,
//! classifies as absent. This is the single place in the substrate where a
//! wait expiry is not an error.

use std::time::Duration;
use thirtyfour::error::WebDriverError;
use tracing::info;

use crate::actuator::{retriable_by_force, Actuator, Probe, Target};

/// Outcome of a best-effort interstitial dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    Dismissed,
    Absent,
}

/// Probe briefly for a dismissible overlay and click it if it shows up.
///
/// Never returns an error. `short_timeout` must stay well below flow-level
/// wait budgets so the common no-overlay case does not stall the scenario.
pub async fn dismiss_if_present(
    actuator: &Actuator,
    target: &Target,
    short_timeout: Duration,
) -> Dismissal {
    match actuator.probe(target, short_timeout).await {
        Probe::Found(elem) => {
            // Direct dispatch first, same as any other click; the forced
            // path only backs up an interaction-class rejection.
            let clicked = match elem.click().await {
                Ok(()) => Ok(()),
                Err(e) if retriable_by_force(&e) => actuator.force_click(&elem).await,
                Err(e) => Err(e),
            };
            let outcome = after_click(clicked);
            match outcome {
                Dismissal::Dismissed => info!(target = %target.desc, "interstitial dismissed"),
                Dismissal::Absent => {
                    info!(target = %target.desc, "interstitial vanished before dismissal")
                }
            }
            outcome
        }
        Probe::Absent => {
            info!(target = %target.desc, "no interstitial appeared");
            Dismissal::Absent
        }
    }
}

/// An overlay that failed its dismissal click counts as absent; its defining
/// characteristic is optionality, so the contract is best-effort.
fn after_click(result: Result<(), WebDriverError>) -> Dismissal {
    match result {
        Ok(()) => Dismissal::Dismissed,
        Err(_) => Dismissal::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_click_is_dismissed() {
        assert_eq!(after_click(Ok(())), Dismissal::Dismissed);
    }

    #[test]
    fn click_race_counts_as_absent_not_error() {
        // An overlay that detaches between probe and click reports the
        // element as gone.
        assert_eq!(
            after_click(Err(WebDriverError::NoSuchElement(
                "overlay detached".to_string()
            ))),
            Dismissal::Absent
        );
        assert_eq!(
            after_click(Err(WebDriverError::Timeout("gone".to_string()))),
            Dismissal::Absent
        );
        assert_eq!(
            after_click(Err(WebDriverError::CustomError(
                "session lost".to_string()
            ))),
            Dismissal::Absent
        );
    }
}
