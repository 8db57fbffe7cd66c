//! My Bids: cancel a previously placed bid.

use futures::future::BoxFuture;

use digielv_driver::Target;

use crate::context::RunContext;
use crate::login::{self, PREAMBLE_DONE};
use crate::runner::{Scenario, Step};

const MY_BIDS_LINK: &str = "//a[normalize-space()='My Bids']";
const CANCEL_BID_BUTTON: &str =
    "//*[@class=\"btn btn-danger w-100 rounded-pill ng-star-inserted\" and contains(text(),'Cancel Bid')]";
const CONFIRM_BUTTON: &str =
    "(//*[@class=\"btn btn-success rounded-pill\" and contains(text(), \"Confirm\")])[2]";
const CONTINUE_BUTTON: &str =
    "(//*[@class=\"btn btn-primary w-100 rounded-pill\" and contains(text(), ' Continue ')])[1]";

pub fn scenario() -> Scenario {
    let mut steps = login::preamble();
    steps.extend([
        Step {
            name: "open-my-bids",
            depends_on: Some(PREAMBLE_DONE),
            run: open_my_bids,
        },
        Step {
            name: "click-cancel-bid",
            depends_on: Some("open-my-bids"),
            run: click_cancel_bid,
        },
        Step {
            name: "confirm-cancellation",
            depends_on: Some("click-cancel-bid"),
            run: confirm_cancellation,
        },
        Step {
            name: "acknowledge-result",
            depends_on: Some("confirm-cancellation"),
            run: acknowledge_result,
        },
    ]);
    Scenario {
        name: "bid-cancel",
        steps,
    }
}

fn open_my_bids(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let link = Target::xpath(MY_BIDS_LINK, "'My Bids' link");
        ctx.actuator.click(&link, ctx.timeout()).await?;
        Ok(())
    })
}

fn click_cancel_bid(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let button = Target::xpath(CANCEL_BID_BUTTON, "'Cancel Bid' button");
        ctx.actuator.click(&button, ctx.timeout()).await?;
        Ok(())
    })
}

fn confirm_cancellation(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let button = Target::xpath(CONFIRM_BUTTON, "cancellation 'Confirm' button");
        ctx.actuator.click(&button, ctx.timeout()).await?;
        Ok(())
    })
}

fn acknowledge_result(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let button = Target::xpath(CONTINUE_BUTTON, "'Continue' button");
        ctx.actuator.click(&button, ctx.timeout()).await?;
        Ok(())
    })
}
