//! Cart commands: list, add, inc, dec, clear.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use market_cart::{CartHandle, CartStore, NewLineItem};

use super::{AddArgs, ClearArgs, ProductArgs};
use crate::context::Context;

/// Show the cart.
pub async fn list(ctx: &Context) -> Result<()> {
    let store = ctx.open_cart().await?;
    ctx.output.header("Cart");
    ctx.output.cart(&store.handle().products());
    store.shutdown().await;
    Ok(())
}

/// Add a product, or bump its quantity if already present.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let item = NewLineItem::new(args.id, args.title, args.image_url, args.price);
    let message = format!("Added {}", item.id);

    with_cart(ctx, &message, |cart| async move {
        cart.add_to_cart(item).await
    })
    .await
}

/// Increase a product's quantity.
pub async fn increment(args: ProductArgs, ctx: &Context) -> Result<()> {
    let message = format!("Incremented {}", args.id);
    with_cart(ctx, &message, |cart| async move { cart.increment(args.id).await }).await
}

/// Decrease a product's quantity.
pub async fn decrement(args: ProductArgs, ctx: &Context) -> Result<()> {
    let message = format!("Decremented {}", args.id);
    with_cart(ctx, &message, |cart| async move { cart.decrement(args.id).await }).await
}

/// Empty the cart.
pub async fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("Remove every item from the cart?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    with_cart(ctx, "Cart cleared", |cart| async move { cart.clear().await }).await
}

/// Open the cart, run one mutation, print the result and shut down.
async fn with_cart<F, Fut>(ctx: &Context, message: &str, op: F) -> Result<()>
where
    F: FnOnce(CartHandle) -> Fut,
    Fut: std::future::Future<Output = Result<(), market_cart::CartError>>,
{
    let store: CartStore = ctx.open_cart().await?;
    let cart = store.handle();

    let result = op(cart.clone()).await.context("Cart update failed");
    let products = cart.products();
    store.shutdown().await;
    result?;

    ctx.output.success(message);
    ctx.output.cart(&products);
    Ok(())
}
