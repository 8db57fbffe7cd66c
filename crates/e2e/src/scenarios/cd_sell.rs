//! List of CDs: put one of the holder's own CDs up for sale.

use futures::future::BoxFuture;

use digielv_driver::Target;

use crate::context::RunContext;
use crate::login::{self, PREAMBLE_DONE};
use crate::runner::{Scenario, Step};

const LIST_OF_CDS_LINK: &str = "//a[contains(normalize-space(.), 'List of CDs')]";
// Index picks the second card's Sell button.
const SELL_BUTTON: &str =
    "//*[@class='btn w-md-50 w-100 rounded-pill btn-primary ng-star-inserted'][2]";
const OFFER_PRICE_INPUT: &str = "//*[@placeholder=\"Enter offer price here\"]";
const CREATE_OFFER_BUTTON: &str = "//button[@type='button' and contains(.,'Create Offer')]";
const CONTINUE_BUTTON: &str =
    "(//*[@class=\"btn btn-primary w-100 rounded-pill\" and contains(text(), 'Continue')])[1]";

pub fn scenario() -> Scenario {
    let mut steps = login::preamble();
    steps.extend([
        Step {
            name: "open-list-of-cds",
            depends_on: Some(PREAMBLE_DONE),
            run: open_list_of_cds,
        },
        Step {
            name: "click-sell",
            depends_on: Some("open-list-of-cds"),
            run: click_sell,
        },
        Step {
            name: "enter-offer-price",
            depends_on: Some("click-sell"),
            run: enter_offer_price,
        },
        Step {
            name: "create-offer",
            depends_on: Some("enter-offer-price"),
            run: create_offer,
        },
        Step {
            name: "acknowledge-result",
            depends_on: Some("create-offer"),
            run: acknowledge_result,
        },
    ]);
    Scenario {
        name: "cd-sell",
        steps,
    }
}

fn open_list_of_cds(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let link = Target::xpath(LIST_OF_CDS_LINK, "sidebar 'List of CDs' link");
        ctx.actuator.click(&link, ctx.timeout()).await?;
        Ok(())
    })
}

fn click_sell(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let button = Target::xpath(SELL_BUTTON, "'Sell' button");
        ctx.actuator.click(&button, ctx.timeout()).await?;
        Ok(())
    })
}

fn enter_offer_price(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let input = Target::xpath(OFFER_PRICE_INPUT, "offer price input");
        ctx.actuator
            .set_text(&input, &ctx.config.flows.offer_price, ctx.timeout())
            .await?;
        Ok(())
    })
}

fn create_offer(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let button = Target::xpath(CREATE_OFFER_BUTTON, "'Create Offer' button");
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
