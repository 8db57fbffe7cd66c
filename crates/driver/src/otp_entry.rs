//! Segmented one-time-code entry
//!
//! The login widget renders one input box per digit and re-renders on every
//! keystroke. Entering faster than the re-render drops input, so each digit
//! is followed by a settle pause. Entry is strictly sequential left-to-right;
//! the widget is stateful across boxes.

use async_trait::async_trait;
use std::time::{Duration, Instant};
use thirtyfour::error::WebDriverError;
use thirtyfour::WebElement;
use tokio::time::sleep;
use tracing::debug;

use digielv_common::Otp;

use crate::actuator::{Actuator, Target};
use crate::error::{DriverError, DriverResult};

/// Default inter-field settle delay. Matches the widget's observed re-render
/// latency; configurable per run.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(100);

const DISCOVERY_POLL: Duration = Duration::from_millis(250);

/// One segment of the segmented code widget.
///
/// The indirection keeps entry logic exercisable without a live session.
#[async_trait]
pub trait OtpField {
    /// Bring the field into view and give it focus.
    async fn focus(&self) -> DriverResult<()>;

    /// Remove any existing value.
    async fn clear_value(&self) -> DriverResult<()>;

    /// Type a single digit into the focused field.
    async fn type_digit(&self, digit: char) -> DriverResult<()>;
}

#[async_trait]
impl OtpField for WebElement {
    async fn focus(&self) -> DriverResult<()> {
        self.scroll_into_view().await?;
        self.click().await?;
        Ok(())
    }

    async fn clear_value(&self) -> DriverResult<()> {
        self.clear().await?;
        Ok(())
    }

    async fn type_digit(&self, digit: char) -> DriverResult<()> {
        self.send_keys(digit.to_string()).await?;
        Ok(())
    }
}

/// Locate the `expected` code boxes, polling until all of them are visible
/// or the discovery budget expires. Matching more boxes than expected fails
/// immediately.
pub async fn find_otp_fields(
    actuator: &Actuator,
    target: &Target,
    expected: usize,
    timeout: Duration,
) -> DriverResult<Vec<WebElement>> {
    let start = Instant::now();
    loop {
        let elems = match actuator.driver().find_all(target.by.clone()).await {
            Ok(elems) => elems,
            Err(WebDriverError::NoSuchElement(_)) => Vec::new(),
            Err(e) => {
                return Err(DriverError::Action {
                    target: target.to_string(),
                    source: e,
                })
            }
        };
        let found = elems.len();

        // A selector matching more boxes than the widget has will not
        // converge by waiting.
        if found > expected {
            return Err(DriverError::IncompleteEntry { expected, found });
        }

        if found == expected {
            let mut all_visible = true;
            for elem in &elems {
                if !elem.is_displayed().await.unwrap_or(false) {
                    all_visible = false;
                    break;
                }
            }
            if all_visible {
                debug!(target = %target.desc, found, "code entry fields discovered");
                return Ok(elems);
            }
        }

        if start.elapsed() >= timeout {
            return Err(DriverError::IncompleteEntry { expected, found });
        }
        sleep(DISCOVERY_POLL).await;
    }
}

/// Enter `otp` across the segmented boxes, one digit per field in order.
///
/// Each box is cleared before its digit, so re-entry over a previous attempt
/// leaves exactly the code in place. Fails with `ShapeMismatch` when the
/// field count does not match the code length.
pub async fn enter_otp<F: OtpField + Sync>(
    fields: &[F],
    otp: &Otp,
    settle: Duration,
) -> DriverResult<()> {
    if fields.len() != otp.len() {
        return Err(DriverError::ShapeMismatch {
            fields: fields.len(),
            digits: otp.len(),
        });
    }

    for (position, (field, digit)) in fields.iter().zip(otp.digits()).enumerate() {
        field.focus().await?;
        field.clear_value().await?;
        field.type_digit(digit).await?;
        debug!(position, "entered code digit");
        sleep(settle).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeField {
        value: Mutex<String>,
        ops: Mutex<Vec<String>>,
    }

    impl FakeField {
        fn value(&self) -> String {
            self.value.lock().unwrap().clone()
        }

        fn ops(&self) -> Vec<String> {
            self.ops.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OtpField for FakeField {
        async fn focus(&self) -> DriverResult<()> {
            self.ops.lock().unwrap().push("focus".to_string());
            Ok(())
        }

        async fn clear_value(&self) -> DriverResult<()> {
            self.value.lock().unwrap().clear();
            self.ops.lock().unwrap().push("clear".to_string());
            Ok(())
        }

        async fn type_digit(&self, digit: char) -> DriverResult<()> {
            self.value.lock().unwrap().push(digit);
            self.ops.lock().unwrap().push(format!("type:{digit}"));
            Ok(())
        }
    }

    fn fields(n: usize) -> Vec<FakeField> {
        (0..n).map(|_| FakeField::default()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn enters_digits_in_order() {
        let boxes = fields(6);
        let otp = Otp::new("482913").unwrap();

        enter_otp(&boxes, &otp, DEFAULT_SETTLE).await.unwrap();

        assert_eq!(boxes[0].value(), "4");
        assert_eq!(boxes[1].value(), "8");
        assert_eq!(boxes[2].value(), "2");
        assert_eq!(boxes[3].value(), "9");
        assert_eq!(boxes[4].value(), "1");
        assert_eq!(boxes[5].value(), "3");
    }

    #[tokio::test(start_paused = true)]
    async fn each_field_sees_focus_clear_type() {
        let boxes = fields(6);
        let otp = Otp::new("482913").unwrap();

        enter_otp(&boxes, &otp, DEFAULT_SETTLE).await.unwrap();

        assert_eq!(boxes[0].ops(), vec!["focus", "clear", "type:4"]);
        assert_eq!(boxes[5].ops(), vec!["focus", "clear", "type:3"]);
    }

    #[tokio::test(start_paused = true)]
    async fn reentry_is_idempotent_in_effect() {
        let boxes = fields(6);
        let otp = Otp::new("482913").unwrap();

        enter_otp(&boxes, &otp, DEFAULT_SETTLE).await.unwrap();
        enter_otp(&boxes, &otp, DEFAULT_SETTLE).await.unwrap();

        // Clearing before each digit means a second pass leaves exactly the
        // code, with no duplicated characters.
        let entered: String = boxes.iter().map(|b| b.value()).collect();
        assert_eq!(entered, "482913");
    }

    #[test]
    fn discovery_mismatch_message_reads_right_in_both_directions() {
        let under = DriverError::IncompleteEntry {
            expected: 6,
            found: 4,
        };
        assert_eq!(
            under.to_string(),
            "code entry field discovery: expected 6 fields, found 4"
        );

        let over = DriverError::IncompleteEntry {
            expected: 6,
            found: 7,
        };
        assert_eq!(
            over.to_string(),
            "code entry field discovery: expected 6 fields, found 7"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn shape_mismatch_when_field_count_differs() {
        let boxes = fields(5);
        let otp = Otp::new("482913").unwrap();

        let err = enter_otp(&boxes, &otp, DEFAULT_SETTLE).await.unwrap_err();
        assert!(matches!(
            err,
            DriverError::ShapeMismatch {
                fields: 5,
                digits: 6
            }
        ));
        // Nothing is typed when the shapes disagree.
        assert!(boxes.iter().all(|b| b.value().is_empty()));
    }
}
