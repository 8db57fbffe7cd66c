//! Run configuration
//!
//! Values resolve in three layers: compiled defaults, then an optional TOML
//! file, then `DIGIELV_*` environment overrides. Store locations and
//! identifiers are configuration, never source literals.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::MobileNumber;

/// Configuration for a suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Target application base URL.
    pub base_url: String,

    /// WebDriver endpoint (chromedriver or a Selenium hub).
    pub webdriver_url: String,

    /// Path to the session store database.
    pub session_db: PathBuf,

    /// Login identifier under test.
    pub mobile: String,

    /// Run the browser headless.
    pub headless: bool,

    /// Wait budget for mandatory element waits, seconds.
    pub default_timeout_secs: u64,

    /// Discovery budget for the segmented OTP input boxes, seconds.
    pub otp_discovery_timeout_secs: u64,

    /// Probe budget for optional interstitials, seconds. Kept well below the
    /// flow-level timeouts so the no-popup case does not stall the run.
    pub interstitial_timeout_secs: u64,

    /// Inter-field settle delay during OTP entry, milliseconds.
    pub otp_settle_ms: u64,

    /// Directory for step/suite result records.
    pub output_dir: PathBuf,

    /// Flow-specific form values.
    pub flows: FlowValues,
}

/// Values typed into the business flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowValues {
    pub withdrawal_amount: String,
    pub withdrawal_remarks: String,
    pub bid_price: String,
    pub offer_price: String,
    pub account_number: String,
    pub ifsc_code: String,
    /// Local path of the bank-proof document sent to the upload input.
    pub kyc_document: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_url: "https://digielv.mmcm.in/".to_string(),
            webdriver_url: "http://localhost:9515".to_string(),
            session_db: PathBuf::from("digielv-uat.db"),
            mobile: "9911991191".to_string(),
            headless: true,
            default_timeout_secs: 30,
            otp_discovery_timeout_secs: 20,
            interstitial_timeout_secs: 5,
            otp_settle_ms: 100,
            output_dir: PathBuf::from("test-results"),
            flows: FlowValues::default(),
        }
    }
}

impl Default for FlowValues {
    fn default() -> Self {
        Self {
            withdrawal_amount: "5000".to_string(),
            withdrawal_remarks: "Fund Withdrawal".to_string(),
            bid_price: "10310".to_string(),
            offer_price: "12000".to_string(),
            account_number: "234590234590234590".to_string(),
            ifsc_code: "HDFC0009226".to_string(),
            kyc_document: PathBuf::from("fixtures/pan-card-dummy.png"),
        }
    }
}

impl RunConfig {
    /// Load configuration: defaults, optional TOML file, then environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)?;
                toml::from_str(&raw).map_err(|e| Error::InvalidConfig(e.to_string()))?
            }
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply `DIGIELV_*` environment overrides in place.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply per-field overrides from `get`. Factored out of `apply_env` so
    /// the override logic is testable without touching process environment.
    fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(v) = get("DIGIELV_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = get("DIGIELV_WEBDRIVER_URL") {
            self.webdriver_url = v;
        }
        if let Some(v) = get("DIGIELV_SESSION_DB") {
            self.session_db = PathBuf::from(v);
        }
        if let Some(v) = get("DIGIELV_MOBILE") {
            self.mobile = v;
        }
        if let Some(v) = get("DIGIELV_HEADLESS") {
            self.headless = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Some(v) = get("DIGIELV_TIMEOUT_SECS") {
            if let Ok(secs) = v.parse() {
                self.default_timeout_secs = secs;
            }
        }
        if let Some(v) = get("DIGIELV_OTP_DISCOVERY_TIMEOUT_SECS") {
            if let Ok(secs) = v.parse() {
                self.otp_discovery_timeout_secs = secs;
            }
        }
        if let Some(v) = get("DIGIELV_INTERSTITIAL_TIMEOUT_SECS") {
            if let Ok(secs) = v.parse() {
                self.interstitial_timeout_secs = secs;
            }
        }
        if let Some(v) = get("DIGIELV_OTP_SETTLE_MS") {
            if let Ok(ms) = v.parse() {
                self.otp_settle_ms = ms;
            }
        }
        if let Some(v) = get("DIGIELV_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = get("DIGIELV_WITHDRAWAL_AMOUNT") {
            self.flows.withdrawal_amount = v;
        }
        if let Some(v) = get("DIGIELV_WITHDRAWAL_REMARKS") {
            self.flows.withdrawal_remarks = v;
        }
        if let Some(v) = get("DIGIELV_BID_PRICE") {
            self.flows.bid_price = v;
        }
        if let Some(v) = get("DIGIELV_OFFER_PRICE") {
            self.flows.offer_price = v;
        }
        if let Some(v) = get("DIGIELV_ACCOUNT_NUMBER") {
            self.flows.account_number = v;
        }
        if let Some(v) = get("DIGIELV_IFSC_CODE") {
            self.flows.ifsc_code = v;
        }
        if let Some(v) = get("DIGIELV_KYC_DOCUMENT") {
            self.flows.kyc_document = PathBuf::from(v);
        }
    }

    /// Validated login identifier.
    pub fn mobile_number(&self) -> Result<MobileNumber> {
        MobileNumber::new(self.mobile.clone())
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }

    pub fn otp_discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.otp_discovery_timeout_secs)
    }

    pub fn interstitial_timeout(&self) -> Duration {
        Duration::from_secs(self.interstitial_timeout_secs)
    }

    pub fn otp_settle(&self) -> Duration {
        Duration::from_millis(self.otp_settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_carry_a_valid_identifier() {
        let config = RunConfig::default();
        assert!(config.mobile_number().is_ok());
        assert_eq!(config.default_timeout(), Duration::from_secs(30));
        assert!(config.interstitial_timeout() < config.default_timeout());
        assert_eq!(config.otp_settle(), Duration::from_millis(100));
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url = \"http://uat.local/\"\nmobile = \"8969804960\"\n\n[flows]\nwithdrawal_amount = \"750\""
        )
        .unwrap();

        let config = RunConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.base_url, "http://uat.local/");
        assert_eq!(config.mobile, "8969804960");
        assert_eq!(config.flows.withdrawal_amount, "750");
        // Unset fields keep their defaults.
        assert_eq!(config.flows.ifsc_code, "HDFC0009226");
    }

    #[test]
    fn overrides_beat_file_values() {
        // Process environment is shared across parallel tests; overrides
        // come from an injected lookup instead.
        let vars: std::collections::HashMap<&str, &str> = [
            ("DIGIELV_BASE_URL", "http://override.local/"),
            ("DIGIELV_HEADLESS", "false"),
            ("DIGIELV_TIMEOUT_SECS", "45"),
        ]
        .into_iter()
        .collect();

        let mut config = RunConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_url, "http://override.local/");
        assert!(!config.headless);
        assert_eq!(config.default_timeout_secs, 45);
        // Unset fields keep their values.
        assert_eq!(config.mobile, "9911991191");
    }

    #[test]
    fn every_field_has_an_override_path() {
        let vars: std::collections::HashMap<&str, &str> = [
            ("DIGIELV_WEBDRIVER_URL", "http://hub.local:4444"),
            ("DIGIELV_SESSION_DB", "/var/lib/uat.db"),
            ("DIGIELV_MOBILE", "8969804960"),
            ("DIGIELV_OTP_DISCOVERY_TIMEOUT_SECS", "25"),
            ("DIGIELV_INTERSTITIAL_TIMEOUT_SECS", "8"),
            ("DIGIELV_OTP_SETTLE_MS", "150"),
            ("DIGIELV_OUTPUT_DIR", "run-results"),
            ("DIGIELV_WITHDRAWAL_AMOUNT", "750"),
            ("DIGIELV_WITHDRAWAL_REMARKS", "weekly sweep"),
            ("DIGIELV_BID_PRICE", "9990"),
            ("DIGIELV_OFFER_PRICE", "11500"),
            ("DIGIELV_ACCOUNT_NUMBER", "111122223333"),
            ("DIGIELV_IFSC_CODE", "SBIN0001234"),
            ("DIGIELV_KYC_DOCUMENT", "/tmp/doc.png"),
        ]
        .into_iter()
        .collect();

        let mut config = RunConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.webdriver_url, "http://hub.local:4444");
        assert_eq!(config.session_db, PathBuf::from("/var/lib/uat.db"));
        assert_eq!(config.mobile, "8969804960");
        assert_eq!(config.otp_discovery_timeout(), Duration::from_secs(25));
        assert_eq!(config.interstitial_timeout(), Duration::from_secs(8));
        assert_eq!(config.otp_settle(), Duration::from_millis(150));
        assert_eq!(config.output_dir, PathBuf::from("run-results"));
        assert_eq!(config.flows.withdrawal_amount, "750");
        assert_eq!(config.flows.withdrawal_remarks, "weekly sweep");
        assert_eq!(config.flows.bid_price, "9990");
        assert_eq!(config.flows.offer_price, "11500");
        assert_eq!(config.flows.account_number, "111122223333");
        assert_eq!(config.flows.ifsc_code, "SBIN0001234");
        assert_eq!(config.flows.kyc_document, PathBuf::from("/tmp/doc.png"));
    }

    #[test]
    fn unparseable_numeric_override_is_ignored() {
        let mut config = RunConfig::default();
        config.apply_overrides(|key| {
            (key == "DIGIELV_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config.default_timeout_secs, 30);
    }

    #[test]
    fn malformed_mobile_is_a_boundary_failure() {
        let config = RunConfig {
            mobile: "12345".to_string(),
            ..Default::default()
        };
        assert!(config.mobile_number().is_err());
    }
}
