//! DigiELV browser-interaction substrate
//!
//! The reusable layer every scenario drives: bounded element waits with a
//! forced-click fallback, segmented OTP entry with a settle delay, and the
//! best-effort probe for optional interstitials. All failures carry the
//! attempted target so step reports stay readable.

pub mod actuator;
pub mod error;
pub mod interstitial;
pub mod otp_entry;

pub use actuator::{Actuator, Probe, Target};
pub use error::{DriverError, DriverResult};
pub use interstitial::{dismiss_if_present, Dismissal};
pub use otp_entry::{enter_otp, find_otp_fields, OtpField, DEFAULT_SETTLE};
