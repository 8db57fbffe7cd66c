//! Scenario runner: ordered steps, cascade skip, unconditional teardown

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thirtyfour::prelude::*;
use tracing::{error, info, warn};

use digielv_common::{MobileNumber, RunConfig, SessionStore};
use digielv_driver::Actuator;

use crate::context::RunContext;

/// A named step over context `C`.
///
/// `depends_on` names an earlier step in the same scenario; if that step
/// failed or was itself skipped, this one is skipped too. Chained
/// dependencies give the usual "first failure skips the rest of the flow"
/// shape without the runner owning any scheduling beyond declared order.
pub struct Step<C> {
    pub name: &'static str,
    pub depends_on: Option<&'static str>,
    pub run: for<'a> fn(&'a mut C) -> BoxFuture<'a, anyhow::Result<()>>,
}

/// Outcome of a single step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    Passed,
    Failed { reason: String },
    Skipped { blocked_on: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub name: String,
    #[serde(flatten)]
    pub status: StepStatus,
    pub duration_ms: u64,
}

impl StepRecord {
    pub fn passed(&self) -> bool {
        self.status == StepStatus::Passed
    }
}

/// Result of running a single scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub steps: Vec<StepRecord>,
    pub error: Option<String>,
}

/// Result of running the whole suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub results: Vec<ScenarioResult>,
}

/// An ordered business flow: the login preamble plus flow-specific steps.
pub struct Scenario {
    pub name: &'static str,
    pub steps: Vec<Step<RunContext>>,
}

/// Execute steps strictly in declared order.
///
/// A failed step fails its record and leaves itself out of the completed
/// set, so direct and transitive dependents skip. Execution continues past
/// failures: independent trailing steps still run.
pub async fn execute_steps<C>(ctx: &mut C, steps: &[Step<C>]) -> Vec<StepRecord> {
    let mut records = Vec::with_capacity(steps.len());
    let mut completed: HashSet<&str> = HashSet::new();

    for step in steps {
        if let Some(dep) = step.depends_on {
            if !completed.contains(dep) {
                info!("- {} (skipped: blocked on {})", step.name, dep);
                records.push(StepRecord {
                    name: step.name.to_string(),
                    status: StepStatus::Skipped {
                        blocked_on: dep.to_string(),
                    },
                    duration_ms: 0,
                });
                continue;
            }
        }

        let start = Instant::now();
        match (step.run)(ctx).await {
            Ok(()) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                info!("✓ {} ({} ms)", step.name, duration_ms);
                completed.insert(step.name);
                records.push(StepRecord {
                    name: step.name.to_string(),
                    status: StepStatus::Passed,
                    duration_ms,
                });
            }
            Err(e) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                let reason = format!("{e:#}");
                error!("✗ {} - {}", step.name, reason);
                records.push(StepRecord {
                    name: step.name.to_string(),
                    status: StepStatus::Failed { reason },
                    duration_ms,
                });
            }
        }
    }

    records
}

/// Owns setup and teardown around the step loop.
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Run a list of scenarios sequentially, each with a fresh browser
    /// session and context.
    pub async fn run_all(&self, scenarios: &[Scenario]) -> SuiteResult {
        let started_at = chrono::Utc::now();
        let start = Instant::now();
        let mut results = Vec::new();
        let mut passed = 0;
        let mut failed = 0;

        info!("Running {} scenario(s)...", scenarios.len());

        for scenario in scenarios {
            let result = self.run_scenario(scenario).await;
            if result.success {
                passed += 1;
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                failed += 1;
                error!(
                    "✗ {} - {}",
                    result.name,
                    result.error.as_deref().unwrap_or("step failure")
                );
            }
            results.push(result);
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Suite: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        SuiteResult {
            total: scenarios.len(),
            passed,
            failed,
            duration_ms,
            started_at,
            results,
        }
    }

    /// Run one scenario: validate the identifier, open store and browser,
    /// execute the steps, then tear down unconditionally.
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioResult {
        let start = Instant::now();
        info!("=== Scenario: {} ===", scenario.name);

        let (mobile, store, driver) = match self.setup().await {
            Ok(parts) => parts,
            Err(e) => {
                return ScenarioResult {
                    name: scenario.name.to_string(),
                    success: false,
                    duration_ms: start.elapsed().as_millis() as u64,
                    steps: Vec::new(),
                    error: Some(format!("setup failed: {e:#}")),
                };
            }
        };

        let actuator = Actuator::new(driver.clone(), self.config.default_timeout());
        let mut ctx = RunContext::new(actuator, store, self.config.clone(), mobile);

        let steps = execute_steps(&mut ctx, &scenario.steps).await;

        // Teardown is unconditional and best-effort: the scenario outcome is
        // decided by the step records alone.
        teardown(&ctx.store, &ctx.mobile, driver).await;

        let success = steps.iter().all(StepRecord::passed);
        ScenarioResult {
            name: scenario.name.to_string(),
            success,
            duration_ms: start.elapsed().as_millis() as u64,
            steps,
            error: None,
        }
    }

    async fn setup(&self) -> anyhow::Result<(MobileNumber, SessionStore, WebDriver)> {
        // Malformed identifiers fail here, before any UI work.
        let mobile = self.config.mobile_number()?;
        let store = SessionStore::open(&self.config.session_db)?;

        let mut caps = DesiredCapabilities::chrome();
        if self.config.headless {
            caps.set_headless()?;
        }
        caps.add_chrome_arg("--no-first-run")?;
        caps.add_chrome_arg("--no-default-browser-check")?;
        caps.add_chrome_arg("--disable-notifications")?;
        caps.add_chrome_arg("--disable-popup-blocking")?;
        caps.add_chrome_arg("--start-maximized")?;

        let driver = WebDriver::new(&self.config.webdriver_url, caps).await?;
        Ok((mobile, store, driver))
    }

    /// Write suite results to a JSON file in the configured output directory.
    pub fn write_results(&self, results: &SuiteResult) -> anyhow::Result<PathBuf> {
        write_results_to(&self.config.output_dir, results)
    }
}

fn write_results_to(dir: &Path, results: &SuiteResult) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join("suite-results.json");
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(&path, json)?;
    info!("Results written to: {}", path.display());
    Ok(path)
}

/// Reset the login flag and close the browser session. Both are best-effort;
/// failures here are logged and never escalated.
async fn teardown(store: &SessionStore, mobile: &MobileNumber, driver: WebDriver) {
    match store.reset_login_flag(mobile) {
        Ok(rows) => info!(rows, "teardown: login flag reset"),
        Err(e) => warn!("teardown: failed to reset login flag: {e}"),
    }
    if let Err(e) = driver.quit().await {
        warn!("teardown: failed to close browser session: {e}");
    }
}
