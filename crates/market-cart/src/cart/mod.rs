//! Shopping cart module.
//!
//! Contains the cart, its line items and the persisted form.

mod cart;
mod codec;

pub use cart::{Cart, LineItem, NewLineItem, MAX_QUANTITY_PER_ITEM};
pub use codec::{encode, HydrateOutcome};
