//! My Account: register bank details and upload a KYC document.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use futures::future::BoxFuture;
use tokio::time::sleep;
use tracing::info;

use digielv_driver::Target;

use crate::context::RunContext;
use crate::login::{self, PREAMBLE_DONE};
use crate::runner::{Scenario, Step};

const ACCOUNT_TYPE_TRIGGER: &str =
    "//p-dropdown[@formcontrolname='account_type']//div[@class='p-dropdown-trigger']";
const SAVINGS_OPTION: &str = "//li[@role='option' and normalize-space()='Savings']";
const ACCOUNT_NO_INPUT: &str = "//*[@placeholder='Enter Your Account No']";
const REENTER_ACCOUNT_NO_INPUT: &str = "//*[@placeholder='Re-enter Account No']";
const IFSC_INPUT: &str = "//*[@placeholder=\"Enter Your ifsc\"]";
const DOCUMENT_FILE_INPUT: &str =
    "//*[@id=\"content\"]/main/app-user-profile/div/div/div[2]/div/div/form/div[3]/div/div[8]/div/input";

// The account-number field appears only after a server round trip for the
// dropdown selection, so it gets its own generous budget.
const ACCOUNT_FIELD_WAIT: Duration = Duration::from_secs(90);
const FOLLOWUP_FIELD_WAIT: Duration = Duration::from_secs(10);
const FILE_INPUT_WAIT: Duration = Duration::from_secs(20);
const DROPDOWN_SETTLE: Duration = Duration::from_millis(500);

const UNHIDE_FILE_INPUT_JS: &str = "arguments[0].classList.remove('d-none'); \
     arguments[0].style.display='block'; \
     arguments[0].style.visibility='visible';";

pub fn scenario() -> Scenario {
    let mut steps = login::preamble();
    steps.extend([
        Step {
            name: "select-account-type",
            depends_on: Some(PREAMBLE_DONE),
            run: select_account_type,
        },
        Step {
            name: "enter-account-numbers",
            depends_on: Some("select-account-type"),
            run: enter_account_numbers,
        },
        Step {
            name: "enter-ifsc-code",
            depends_on: Some("enter-account-numbers"),
            run: enter_ifsc_code,
        },
        Step {
            name: "upload-kyc-document",
            depends_on: Some("enter-ifsc-code"),
            run: upload_kyc_document,
        },
    ]);
    Scenario {
        name: "bank-account",
        steps,
    }
}

fn select_account_type(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let trigger = Target::xpath(ACCOUNT_TYPE_TRIGGER, "account type dropdown");
        let elem = ctx.actuator.wait_until_ready(&trigger, ctx.timeout()).await?;
        elem.scroll_into_view().await?;
        // The dropdown animates into place after the scroll.
        sleep(DROPDOWN_SETTLE).await;
        elem.click().await.context("opening the account type dropdown")?;

        let option = Target::xpath(SAVINGS_OPTION, "'Savings' option");
        ctx.actuator.click(&option, ctx.timeout()).await?;
        info!("account type set to Savings");
        Ok(())
    })
}

fn enter_account_numbers(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let account = ctx.config.flows.account_number.clone();

        let first = Target::xpath(ACCOUNT_NO_INPUT, "account number input");
        ctx.actuator
            .set_text(&first, &account, ACCOUNT_FIELD_WAIT)
            .await?;

        let reentry = Target::xpath(REENTER_ACCOUNT_NO_INPUT, "account number re-entry input");
        ctx.actuator
            .set_text(&reentry, &account, FOLLOWUP_FIELD_WAIT)
            .await?;
        Ok(())
    })
}

fn enter_ifsc_code(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let ifsc = Target::xpath(IFSC_INPUT, "IFSC code input");
        ctx.actuator
            .set_text(&ifsc, &ctx.config.flows.ifsc_code, FOLLOWUP_FIELD_WAIT)
            .await?;
        Ok(())
    })
}

/// Send the document path straight to the hidden `<input type="file">`.
/// The input is unhidden first so the driver accepts keys to it; no OS file
/// dialog is involved.
fn upload_kyc_document(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let document = Path::new(&ctx.config.flows.kyc_document);
        let absolute = document
            .canonicalize()
            .with_context(|| format!("document not found: {}", document.display()))?;

        let input = Target::xpath(DOCUMENT_FILE_INPUT, "document file input");
        let elem = ctx.actuator.wait_present(&input, FILE_INPUT_WAIT).await?;
        ctx.actuator
            .driver()
            .execute(UNHIDE_FILE_INPUT_JS, vec![elem.to_json()?])
            .await?;
        elem.send_keys(absolute.to_string_lossy().as_ref()).await?;
        info!(path = %absolute.display(), "document uploaded");
        Ok(())
    })
}
