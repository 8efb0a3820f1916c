//! Initial order fetch - abstracted so the dashboard can be tested without a server

use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;

use crate::errors::{Error, Result};
use crate::order::Order;

/// Source of the full order collection
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Fetch every order the upstream service currently knows about
    async fn fetch_orders(&self) -> Result<Vec<Order>>;
}

// ============================================================================
// REST Implementation
// ============================================================================

/// Fetches orders with `GET {origin}/api/orders`
#[derive(Debug, Clone)]
pub struct RestOrderSource {
    client: reqwest::Client,
    url: String,
}

impl RestOrderSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl OrderSource for RestOrderSource {
    async fn fetch_orders(&self) -> Result<Vec<Order>> {
        debug!("Fetching orders from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let records: Vec<Value> = serde_json::from_str(&body)?;

        // One bad record must not cost the rest of the snapshot
        let mut orders = Vec::with_capacity(records.len());
        for record in records {
            match serde_json::from_value::<Order>(record) {
                Ok(order) => orders.push(order),
                Err(e) => warn!("Skipping malformed order record: {}", e),
            }
        }

        debug!("Fetched {} orders", orders.len());
        Ok(orders)
    }
}

// ============================================================================
// Mock Implementation for Testing
// ============================================================================

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use tokio::sync::Mutex;

    use super::*;

    /// Mock order source for testing
    #[derive(Clone, Default)]
    pub(crate) struct MockOrderSource {
        pub(crate) orders: Arc<Mutex<Vec<Order>>>,
        pub(crate) should_fail: Arc<Mutex<bool>>,
        /// Never resolve, like a request the server never answers
        pub(crate) hang: bool,
        pub(crate) calls: Arc<AtomicU32>,
    }

    impl MockOrderSource {
        pub(crate) fn with_orders(orders: Vec<Order>) -> Self {
            Self {
                orders: Arc::new(Mutex::new(orders)),
                ..Default::default()
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                should_fail: Arc::new(Mutex::new(true)),
                ..Default::default()
            }
        }

        pub(crate) fn hanging() -> Self {
            Self {
                hang: true,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl OrderSource for MockOrderSource {
        async fn fetch_orders(&self) -> Result<Vec<Order>> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if self.hang {
                std::future::pending::<()>().await;
            }

            if *self.should_fail.lock().await {
                return Err(Error::HttpStatus(500));
            }

            Ok(self.orders.lock().await.clone())
        }
    }
}
