//! UAT suite entry point
//!
//! This file is the test binary that drives the DigiELV business flows
//! through a live browser. Run with:
//! cargo test --package digielv-e2e --test e2e -- --scenario funds-withdrawal

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use digielv_common::RunConfig;
use digielv_e2e::scenarios;
use digielv_e2e::{Runner, Scenario};

#[derive(Parser, Debug)]
#[command(name = "digielv-e2e")]
#[command(about = "UAT scenario runner for DigiELV")]
struct Args {
    /// Run only this scenario (default: all)
    #[arg(short, long)]
    scenario: Option<String>,

    /// Application base URL
    #[arg(long, env = "DIGIELV_BASE_URL")]
    base_url: Option<String>,

    /// WebDriver endpoint (chromedriver or a Selenium hub)
    #[arg(long, env = "DIGIELV_WEBDRIVER_URL")]
    webdriver_url: Option<String>,

    /// Path to the session store database
    #[arg(long, env = "DIGIELV_SESSION_DB")]
    session_db: Option<PathBuf>,

    /// Login mobile number
    #[arg(long, env = "DIGIELV_MOBILE")]
    mobile: Option<String>,

    /// Run the browser headless
    #[arg(long)]
    headless: Option<bool>,

    /// Wait budget for element waits, seconds
    #[arg(long)]
    default_timeout_secs: Option<u64>,

    /// Output directory for results
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = rt.block_on(async_main(args));

    match result {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    }
}

async fn async_main(args: Args) -> anyhow::Result<bool> {
    let mut config = RunConfig::load(args.config.as_deref())?;
    if let Some(v) = args.base_url {
        config.base_url = v;
    }
    if let Some(v) = args.webdriver_url {
        config.webdriver_url = v;
    }
    if let Some(v) = args.session_db {
        config.session_db = v;
    }
    if let Some(v) = args.mobile {
        config.mobile = v;
    }
    if let Some(v) = args.headless {
        config.headless = v;
    }
    if let Some(v) = args.default_timeout_secs {
        config.default_timeout_secs = v;
    }
    if let Some(v) = args.output {
        config.output_dir = v;
    }

    let selected: Vec<Scenario> = match args.scenario.as_deref() {
        Some(name) => {
            let scenario = scenarios::by_name(name).ok_or_else(|| {
                anyhow::anyhow!(
                    "unknown scenario '{name}'; available: {}",
                    scenarios::names().join(", ")
                )
            })?;
            vec![scenario]
        }
        None => scenarios::all(),
    };

    let runner = Runner::new(config);
    let results = runner.run_all(&selected).await;
    runner.write_results(&results)?;

    Ok(results.failed == 0)
}
