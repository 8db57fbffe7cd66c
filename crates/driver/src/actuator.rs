//! Resilient element actuator
//!
//! Polls the DOM until a target is interactable, then performs the action.
//! Clicks that the browser rejects (overlap, animation, off-screen) get a
//! single forced retry: scroll to viewport center, dispatch programmatically.

use std::fmt;
use std::time::{Duration, Instant};
use thirtyfour::error::WebDriverError;
use thirtyfour::fantoccini::error::CmdError;
use thirtyfour::prelude::*;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{DriverError, DriverResult};

/// How often bounded waits re-poll the DOM.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A locator plus the human-readable name failure reports carry.
#[derive(Debug, Clone)]
pub struct Target {
    pub by: By,
    pub desc: String,
}

impl Target {
    pub fn new(by: By, desc: impl Into<String>) -> Self {
        Self {
            by,
            desc: desc.into(),
        }
    }

    pub fn xpath(expr: &str, desc: impl Into<String>) -> Self {
        Self::new(By::XPath(expr), desc)
    }

    pub fn id(id: &str, desc: impl Into<String>) -> Self {
        Self::new(By::Id(id), desc)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{:?}]", self.desc, self.by)
    }
}

/// Outcome of a bounded element probe. Absence is an ordinary value here,
/// not an error.
pub enum Probe {
    Found(WebElement),
    Absent,
}

/// Performs waits and actions against a live session with uniform failure
/// reporting. Cheap to clone; scenarios share one per run.
#[derive(Clone)]
pub struct Actuator {
    driver: WebDriver,
    default_timeout: Duration,
}

impl Actuator {
    pub fn new(driver: WebDriver, default_timeout: Duration) -> Self {
        Self {
            driver,
            default_timeout,
        }
    }

    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    pub async fn goto(&self, url: &str) -> DriverResult<()> {
        self.driver.goto(url).await?;
        Ok(())
    }

    pub async fn title(&self) -> DriverResult<String> {
        Ok(self.driver.title().await?)
    }

    /// Poll until `target` resolves to a displayed, enabled element or the
    /// budget expires.
    pub async fn wait_until_ready(
        &self,
        target: &Target,
        timeout: Duration,
    ) -> DriverResult<WebElement> {
        let start = Instant::now();
        loop {
            match self.driver.find(target.by.clone()).await {
                // Readiness re-checks can race a re-render; treat any probe
                // failure as "not yet" and keep polling. A stale handle also
                // reports as NoSuchElement.
                Ok(elem) => {
                    if elem.is_clickable().await.unwrap_or(false) {
                        return Ok(elem);
                    }
                }
                Err(WebDriverError::NoSuchElement(_)) => {}
                Err(e) => {
                    return Err(DriverError::Action {
                        target: target.to_string(),
                        source: e,
                    })
                }
            }
            if start.elapsed() >= timeout {
                return Err(DriverError::Timeout {
                    target: target.to_string(),
                    waited: timeout,
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Poll until `target` is present in the DOM, visible or not. Used for
    /// hidden controls such as file inputs.
    pub async fn wait_present(&self, target: &Target, timeout: Duration) -> DriverResult<WebElement> {
        let start = Instant::now();
        loop {
            match self.driver.find(target.by.clone()).await {
                Ok(elem) => return Ok(elem),
                Err(WebDriverError::NoSuchElement(_)) => {}
                Err(e) => {
                    return Err(DriverError::Action {
                        target: target.to_string(),
                        source: e,
                    })
                }
            }
            if start.elapsed() >= timeout {
                return Err(DriverError::Timeout {
                    target: target.to_string(),
                    waited: timeout,
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Wait for `target`, then click it. A rejected direct dispatch gets one
    /// forced retry; if that also fails, the original rejection is the root
    /// cause surfaced to the caller.
    pub async fn click(&self, target: &Target, timeout: Duration) -> DriverResult<()> {
        let elem = self.wait_until_ready(target, timeout).await?;
        match elem.click().await {
            Ok(()) => Ok(()),
            Err(e) if retriable_by_force(&e) => {
                debug!(target = %target.desc, cause = %e, "direct click rejected, trying forced dispatch");
                if let Err(force_err) = self.force_click(&elem).await {
                    warn!(target = %target.desc, error = %force_err, "forced dispatch failed");
                    return Err(DriverError::NotInteractable {
                        target: target.to_string(),
                        source: e,
                    });
                }
                Ok(())
            }
            Err(e) => Err(DriverError::Action {
                target: target.to_string(),
                source: e,
            }),
        }
    }

    /// Wait for `target`, then click it through the forced path without
    /// attempting a direct dispatch first.
    pub async fn force_click_target(&self, target: &Target, timeout: Duration) -> DriverResult<()> {
        let elem = self.wait_until_ready(target, timeout).await?;
        self.force_click(&elem).await.map_err(|e| DriverError::Action {
            target: target.to_string(),
            source: e,
        })
    }

    /// Programmatic dispatch: center the element in the viewport and click it
    /// via script, bypassing simulated pointer input.
    pub async fn force_click(&self, elem: &WebElement) -> Result<(), WebDriverError> {
        self.driver
            .execute(
                "arguments[0].scrollIntoView({block:'center'}); arguments[0].click();",
                vec![elem.to_json()?],
            )
            .await?;
        Ok(())
    }

    /// Wait for `target`, clear any existing value, then type `value`
    /// verbatim. No partial-entry retry.
    pub async fn set_text(
        &self,
        target: &Target,
        value: &str,
        timeout: Duration,
    ) -> DriverResult<()> {
        let elem = self.wait_until_ready(target, timeout).await?;
        let on_target = |e: WebDriverError| DriverError::Action {
            target: target.to_string(),
            source: e,
        };
        elem.clear().await.map_err(on_target)?;
        elem.send_keys(value).await.map_err(on_target)?;
        Ok(())
    }

    /// Bounded probe that reports absence as a value instead of an error.
    pub async fn probe(&self, target: &Target, timeout: Duration) -> Probe {
        match self.wait_until_ready(target, timeout).await {
            Ok(elem) => Probe::Found(elem),
            Err(e) => {
                debug!(target = %target.desc, cause = %e, "probe found nothing");
                Probe::Absent
            }
        }
    }
}

/// Interaction-class rejections that the forced path can usually get past.
/// Anything else (session loss, bad locator, protocol errors) is fatal as-is.
///
/// Standard protocol rejections surface as `CmdError::Standard`; the W3C
/// error code string is the only stable classifier they expose.
pub fn retriable_by_force(err: &WebDriverError) -> bool {
    match err {
        WebDriverError::CmdError(CmdError::Standard(w)) => retriable_error_code(w.error()),
        _ => false,
    }
}

fn retriable_error_code(code: &str) -> bool {
    matches!(
        code,
        "element click intercepted" | "element not interactable" | "move target out of bounds"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_rejection_codes_are_retriable() {
        assert!(retriable_error_code("element click intercepted"));
        assert!(retriable_error_code("element not interactable"));
        assert!(retriable_error_code("move target out of bounds"));
    }

    #[test]
    fn other_error_codes_are_not_retriable() {
        assert!(!retriable_error_code("stale element reference"));
        assert!(!retriable_error_code("invalid selector"));
        assert!(!retriable_error_code("no such element"));
        assert!(!retriable_error_code("unknown error"));
    }

    #[test]
    fn non_protocol_failures_are_not_retriable() {
        assert!(!retriable_by_force(&WebDriverError::Timeout(
            "request timed out".to_string()
        )));
        assert!(!retriable_by_force(&WebDriverError::NoSuchElement(
            "no such element: Login button".to_string()
        )));
        assert!(!retriable_by_force(&WebDriverError::CustomError(
            "session lost".to_string()
        )));
    }

    #[test]
    fn target_display_names_the_attempt() {
        let target = Target::xpath("//button[text()='Login']", "Login button");
        let shown = target.to_string();
        assert!(shown.contains("Login button"));
        assert!(shown.contains("Login"));
    }

    #[test]
    fn timeout_error_carries_target_and_budget() {
        let err = DriverError::Timeout {
            target: "Login button".to_string(),
            waited: Duration::from_secs(5),
        };
        let shown = err.to_string();
        assert!(shown.contains("Login button"));
        assert!(shown.contains("5s"));
    }
}
