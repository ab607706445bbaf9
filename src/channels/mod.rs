//! Output channels and the table that holds them

pub mod channel;
pub mod registry;

pub use channel::{Channel, ChannelKind, ConsoleTarget, SharedStream};
pub use registry::{shared_stream, ChannelRegistry, Delivery};
