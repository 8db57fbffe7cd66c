//! Funds Management: withdraw funds from the wallet.

use futures::future::BoxFuture;

use digielv_driver::Target;

use crate::context::RunContext;
use crate::login::{self, PREAMBLE_DONE};
use crate::runner::{Scenario, Step};

const SIDEBAR_LINK: &str = "//ul[@class='side-menu']//a[contains(text(), 'Funds Withdrawal')]";
const WITHDRAW_FUNDS_BUTTON: &str =
    "//*[@id=\"content\"]/main/app-fund-withdraw/section/div/div[1]/button";
const AMOUNT_INPUT: &str = "integeronly";
const REMARKS_TEXTAREA: &str = "//*[@id=\"content\"]/main/app-fund-withdraw/section/div/div[2]/div[2]/div/div/div[2]/div/div[2]/textarea";
const WITHDRAW_SUBMIT: &str =
    "//*[@id=\"content\"]/main/app-fund-withdraw/section/div/div[2]/div[2]/div/div/div[3]/div[2]/button";
const CONTINUE_BUTTON: &str = "//*[@id=\"content\"]/main/app-fund-withdraw/section/app-registration-modal[1]/section/div/div/div/div[3]/button";

pub fn scenario() -> Scenario {
    let mut steps = login::preamble();
    steps.extend([
        Step {
            name: "open-funds-withdrawal",
            depends_on: Some(PREAMBLE_DONE),
            run: open_funds_withdrawal,
        },
        Step {
            name: "click-withdraw-funds",
            depends_on: Some("open-funds-withdrawal"),
            run: click_withdraw_funds,
        },
        Step {
            name: "enter-amount-and-remarks",
            depends_on: Some("click-withdraw-funds"),
            run: enter_amount_and_remarks,
        },
        Step {
            name: "submit-withdrawal",
            depends_on: Some("enter-amount-and-remarks"),
            run: submit_withdrawal,
        },
        Step {
            name: "confirm-withdrawal",
            depends_on: Some("submit-withdrawal"),
            run: confirm_withdrawal,
        },
    ]);
    Scenario {
        name: "funds-withdrawal",
        steps,
    }
}

fn open_funds_withdrawal(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        // The sidebar link sits under a collapsible menu; a scripted click
        // lands even when an overlay intercepts the pointer.
        let link = Target::xpath(SIDEBAR_LINK, "sidebar 'Funds Withdrawal' link");
        ctx.actuator.force_click_target(&link, ctx.timeout()).await?;
        Ok(())
    })
}

fn click_withdraw_funds(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let button = Target::xpath(WITHDRAW_FUNDS_BUTTON, "'Withdraw Funds' button");
        ctx.actuator.click(&button, ctx.timeout()).await?;
        Ok(())
    })
}

fn enter_amount_and_remarks(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let amount = Target::id(AMOUNT_INPUT, "withdrawal amount input");
        ctx.actuator
            .set_text(&amount, &ctx.config.flows.withdrawal_amount, ctx.timeout())
            .await?;

        let remarks = Target::xpath(REMARKS_TEXTAREA, "withdrawal remarks textarea");
        ctx.actuator
            .set_text(&remarks, &ctx.config.flows.withdrawal_remarks, ctx.timeout())
            .await?;
        Ok(())
    })
}

fn submit_withdrawal(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let button = Target::xpath(WITHDRAW_SUBMIT, "'Withdraw' button");
        ctx.actuator.click(&button, ctx.timeout()).await?;
        Ok(())
    })
}

fn confirm_withdrawal(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let button = Target::xpath(CONTINUE_BUTTON, "confirmation 'Continue' button");
        ctx.actuator.click(&button, ctx.timeout()).await?;
        Ok(())
    })
}
