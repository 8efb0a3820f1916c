//! Upstream endpoint derivation

use crate::errors::{Error, Result};

/// Resolved URLs of the order service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// `GET` target returning the full order array
    pub orders_url: String,
    /// Push channel URL (`ws://` or `wss://`)
    pub push_url: String,
}

impl Endpoints {
    /// Derive both endpoints from an `http(s)://host[:port]` origin
    ///
    /// The push channel uses the matching WebSocket scheme: `http` maps to
    /// `ws`, `https` to `wss`.
    pub fn from_origin(origin: &str) -> Result<Self> {
        let origin = origin.trim().trim_end_matches('/');

        let push_origin = if let Some(rest) = origin.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = origin.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            return Err(Error::InvalidOrigin(origin.to_string()));
        };

        if push_origin.ends_with("://") {
            return Err(Error::InvalidOrigin(origin.to_string()));
        }

        Ok(Self {
            orders_url: format!("{}/api/orders", origin),
            push_url: format!("{}/ws", push_origin),
        })
    }
}
