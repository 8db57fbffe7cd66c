//! Shared login preamble: every business flow starts authenticated.

use anyhow::{anyhow, Context};
use futures::future::BoxFuture;
use tracing::info;

use digielv_driver::{dismiss_if_present, enter_otp, find_otp_fields, Target};

use crate::context::RunContext;
use crate::runner::Step;

pub const OTP_FIELD_COUNT: usize = 6;

const LOGIN_REGISTER_BUTTON: &str = "//*[@id=\"navbarNav\"]/ul/li[5]/a/button";
const MOBILE_INPUT: &str = "//input[@placeholder='Enter Your Mobile Number']";
const LOGIN_SUBMIT: &str = "//button[normalize-space(text())='Login']";
const OTP_INPUTS: &str = "//p-inputotp//input[contains(@class,'p-inputotp-input')]";
const KYC_SKIP: &str = "//*[normalize-space()='Skip For Now']";

/// Ordered login steps, each depending on the previous so a failure skips
/// the rest of the chain. Scenario steps hang off the final step name.
pub fn preamble() -> Vec<Step<RunContext>> {
    vec![
        Step {
            name: "open-login-page",
            depends_on: None,
            run: open_login_page,
        },
        Step {
            name: "click-login-register",
            depends_on: Some("open-login-page"),
            run: click_login_register,
        },
        Step {
            name: "submit-mobile",
            depends_on: Some("click-login-register"),
            run: submit_mobile,
        },
        Step {
            name: "fetch-otp",
            depends_on: Some("submit-mobile"),
            run: fetch_otp,
        },
        Step {
            name: "enter-otp",
            depends_on: Some("fetch-otp"),
            run: enter_otp_step,
        },
        Step {
            name: "dismiss-kyc-popup",
            depends_on: Some("enter-otp"),
            run: dismiss_kyc_popup,
        },
    ]
}

/// Name of the last preamble step, for scenario steps to depend on.
pub const PREAMBLE_DONE: &str = "dismiss-kyc-popup";

fn open_login_page(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        ctx.actuator.goto(&ctx.config.base_url).await?;
        let title = ctx.actuator.title().await?;
        if title.trim().is_empty() {
            return Err(anyhow!("landing page has an empty title"));
        }
        info!(%title, "landing page loaded");
        Ok(())
    })
}

fn click_login_register(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let button = Target::xpath(LOGIN_REGISTER_BUTTON, "Login/Register button");
        ctx.actuator
            .force_click_target(&button, ctx.timeout())
            .await
            .context("opening the login form")?;
        Ok(())
    })
}

fn submit_mobile(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let input = Target::xpath(MOBILE_INPUT, "mobile number input");
        ctx.actuator
            .set_text(&input, ctx.mobile.as_str(), ctx.timeout())
            .await?;

        let login = Target::xpath(LOGIN_SUBMIT, "Login button");
        ctx.actuator.click(&login, ctx.timeout()).await?;
        info!(mobile = %ctx.mobile, "mobile number submitted");
        Ok(())
    })
}

fn fetch_otp(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        // A transport or query error surfaces as-is; a clean miss gets its
        // own message naming the identifier.
        let otp = ctx
            .store
            .fetch_otp(&ctx.mobile)
            .context("querying the session store for the login code")?
            .ok_or_else(|| anyhow!("no pending login code for mobile {}", ctx.mobile))?;
        ctx.otp = Some(otp);
        Ok(())
    })
}

fn enter_otp_step(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let otp = ctx
            .otp
            .clone()
            .ok_or_else(|| anyhow!("login code was never fetched"))?;

        let boxes = Target::xpath(OTP_INPUTS, "segmented code inputs");
        let fields = find_otp_fields(
            &ctx.actuator,
            &boxes,
            OTP_FIELD_COUNT,
            ctx.config.otp_discovery_timeout(),
        )
        .await?;
        enter_otp(&fields, &otp, ctx.config.otp_settle()).await?;
        info!("login code entered");
        Ok(())
    })
}

fn dismiss_kyc_popup(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let skip = Target::xpath(KYC_SKIP, "KYC 'Skip For Now' popup");
        // Absent and dismissed both count as success.
        dismiss_if_present(&ctx.actuator, &skip, ctx.config.interstitial_timeout()).await;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_is_a_single_dependency_chain() {
        let steps = preamble();
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[0].depends_on, None);
        for pair in steps.windows(2) {
            assert_eq!(pair[1].depends_on, Some(pair[0].name));
        }
        assert_eq!(steps.last().unwrap().name, PREAMBLE_DONE);
    }
}
