//! Market offers: browse all offers and place a buy bid on one.

use futures::future::BoxFuture;

use digielv_driver::Target;

use crate::context::RunContext;
use crate::login::{self, PREAMBLE_DONE};
use crate::runner::{Scenario, Step};

const MARKET_OFFER_TAB: &str = "//*[@id=\"sidebar\"]/ul/li[3]/a";
const VIEW_ALL_OFFER_BUTTON: &str =
    "//*[@class=\"btn btn-primary w-100 rounded-pill\" and contains(text(), 'View All Offer')]";
const PLACE_OFFER_BUTTON: &str =
    "//*[@class=\"btn btn-primary w-100 rounded-pill\" and contains(text(), 'Place Offer to Buy')]";
const BID_PRICE_INPUT: &str = "//*[@id=\"integeronly\"]";
const CREATE_BID_BUTTON: &str =
    "//*[@class=\"btn btn-primary rounded-pill\" and contains(text(), 'Create Bid')]";
// The page stacks one Continue per modal; the fourth belongs to the bid
// confirmation.
const CONTINUE_BUTTON: &str =
    "(//*[@class=\"btn btn-primary w-100 rounded-pill\" and contains(text(), ' Continue ')])[4]";

pub fn scenario() -> Scenario {
    let mut steps = login::preamble();
    steps.extend([
        Step {
            name: "open-market-offers",
            depends_on: Some(PREAMBLE_DONE),
            run: open_market_offers,
        },
        Step {
            name: "view-all-offers",
            depends_on: Some("open-market-offers"),
            run: view_all_offers,
        },
        Step {
            name: "place-offer-to-buy",
            depends_on: Some("view-all-offers"),
            run: place_offer_to_buy,
        },
        Step {
            name: "enter-bid-price",
            depends_on: Some("place-offer-to-buy"),
            run: enter_bid_price,
        },
        Step {
            name: "create-bid",
            depends_on: Some("enter-bid-price"),
            run: create_bid,
        },
        Step {
            name: "acknowledge-result",
            depends_on: Some("create-bid"),
            run: acknowledge_result,
        },
    ]);
    Scenario {
        name: "market-offer",
        steps,
    }
}

fn open_market_offers(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let tab = Target::xpath(MARKET_OFFER_TAB, "market offers sidebar tab");
        ctx.actuator.force_click_target(&tab, ctx.timeout()).await?;
        Ok(())
    })
}

fn view_all_offers(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let button = Target::xpath(VIEW_ALL_OFFER_BUTTON, "'View All Offer' button");
        ctx.actuator.force_click_target(&button, ctx.timeout()).await?;
        Ok(())
    })
}

fn place_offer_to_buy(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let button = Target::xpath(PLACE_OFFER_BUTTON, "'Place Offer to Buy' button");
        ctx.actuator.force_click_target(&button, ctx.timeout()).await?;
        Ok(())
    })
}

fn enter_bid_price(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let input = Target::xpath(BID_PRICE_INPUT, "bid price input");
        ctx.actuator
            .set_text(&input, &ctx.config.flows.bid_price, ctx.timeout())
            .await?;
        Ok(())
    })
}

fn create_bid(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let button = Target::xpath(CREATE_BID_BUTTON, "'Create Bid' button");
        ctx.actuator.force_click_target(&button, ctx.timeout()).await?;
        Ok(())
    })
}

fn acknowledge_result(ctx: &mut RunContext) -> BoxFuture<'_, anyhow::Result<()>> {
    Box::pin(async move {
        let button = Target::xpath(CONTINUE_BUTTON, "bid confirmation 'Continue' button");
        ctx.actuator.force_click_target(&button, ctx.timeout()).await?;
        Ok(())
    })
}
