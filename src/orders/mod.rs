//! Confirmed orders: spotting a confirmation in the bot's reply,
//! reconstructing the order from the conversation and keeping the
//! ledger staff work from.

pub mod db;
pub mod extract;
mod ledger;
mod models;

pub use extract::{extract_order, is_order_confirmed};
pub use ledger::OrderLedger;
pub use models::{
    ConfirmedOrder, DeliveryType, ExtractedOrder, NewOrder, OrderStatus, PaymentMethod,
};
