//! Validated identifier and one-time-code types
//!
//! Both are checked at construction so the rest of the suite never has to
//! re-validate shape. They are immutable once built.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// 10-digit mobile number acting as the login/session key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MobileNumber(String);

impl MobileNumber {
    pub const LEN: usize = 10;

    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.len() == Self::LEN && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidMobile(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for MobileNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for MobileNumber {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<MobileNumber> for String {
    fn from(m: MobileNumber) -> Self {
        m.0
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 6-digit one-time code used for second-factor login.
///
/// Fetched once per run from the session store and consumed immediately by
/// the segmented code entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Otp(String);

impl Otp {
    pub const LEN: usize = 6;

    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.len() == Self::LEN && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidOtp(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Digits in entry order, one per segmented input field.
    pub fn digits(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }
}

impl FromStr for Otp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Otp {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Otp> for String {
    fn from(o: Otp) -> Self {
        o.0
    }
}

impl fmt::Display for Otp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_accepts_exactly_ten_digits() {
        let m = MobileNumber::new("9911991191").unwrap();
        assert_eq!(m.as_str(), "9911991191");
    }

    #[test]
    fn mobile_rejects_wrong_shapes() {
        assert!(MobileNumber::new("99119911").is_err()); // too short
        assert!(MobileNumber::new("991199119a").is_err()); // non-digit
        assert!(MobileNumber::new("99119911911").is_err()); // too long
        assert!(MobileNumber::new("").is_err());
        assert!(MobileNumber::new("991199119 ").is_err());
    }

    #[test]
    fn otp_accepts_exactly_six_digits() {
        let otp = Otp::new("482913").unwrap();
        assert_eq!(otp.len(), 6);
        assert_eq!(otp.digits().collect::<String>(), "482913");
    }

    #[test]
    fn otp_rejects_wrong_shapes() {
        assert!(Otp::new("48291").is_err());
        assert!(Otp::new("4829131").is_err());
        assert!(Otp::new("48291a").is_err());
        assert!(Otp::new("").is_err());
    }

    #[test]
    fn mobile_parses_from_str() {
        let m: MobileNumber = "8969804960".parse().unwrap();
        assert_eq!(m.to_string(), "8969804960");
        assert!("badnumber1".parse::<MobileNumber>().is_err());
    }

    #[test]
    fn serde_round_trip_validates() {
        let m: MobileNumber = serde_json::from_str("\"9911991191\"").unwrap();
        assert_eq!(m.as_str(), "9911991191");
        assert!(serde_json::from_str::<Otp>("\"12345\"").is_err());
    }
}
