//! Outbound side of the messaging bridge.

mod bridge;
pub use bridge::BridgeClient;
