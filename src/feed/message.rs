//! Push channel message parsing

use serde_json::Value;

use crate::errors::Result;
use crate::order::Order;

/// Message received on the push channel
#[derive(Debug, Clone, PartialEq)]
pub enum PushMessage {
    /// `{"type": "clear"}`: drop every order
    Clear,
    /// Any other object is an order to update or insert
    Order(Order),
}

impl PushMessage {
    /// Parse a text frame
    ///
    /// Returns `Ok(None)` for empty frames, which carry nothing to apply.
    pub fn parse(text: &str) -> Result<Option<Self>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(text)?;
        if value.get("type").and_then(Value::as_str) == Some("clear") {
            return Ok(Some(PushMessage::Clear));
        }

        let order: Order = serde_json::from_value(value)?;
        Ok(Some(PushMessage::Order(order)))
    }
}
