//! Feed Module
//!
//! Everything that pulls order data from the upstream service:
//!
//! - the one-shot REST fetch of the full collection (`OrderSource`)
//! - the push channel that streams live updates and reconnects on loss
//!
//! Both producers report into the dashboard through `FeedEvent`s sent over an
//! unbounded channel, so all mutation of the order list happens in one place.

mod channel;
mod endpoints;
mod message;
mod source;

pub use channel::PushChannel;
pub use endpoints::Endpoints;
pub use message::PushMessage;
pub use source::{OrderSource, RestOrderSource};

#[cfg(test)]
pub(crate) use source::mock;

use crate::order::Order;

/// Event delivered to the dashboard's event loop
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// Result of the initial fetch (empty on failure)
    Snapshot(Vec<Order>),
    /// Push channel opened
    Connected,
    /// Push channel closed or failed to open
    Disconnected,
    /// Upstream asked to reset the list
    Cleared,
    /// Created or updated order
    Order(Order),
}

impl From<PushMessage> for FeedEvent {
    fn from(message: PushMessage) -> Self {
        match message {
            PushMessage::Clear => FeedEvent::Cleared,
            PushMessage::Order(order) => FeedEvent::Order(order),
        }
    }
}
