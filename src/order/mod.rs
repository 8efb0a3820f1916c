//! Order Module
//!
//! The order record as the upstream service sends it, and the in-memory
//! list the dashboard keeps as its local replica.
//!
//! # Example
//!
//! ```rust
//! use em_dashboard::order::{Order, OrderId, OrderList, OrderStatus};
//!
//! let mut orders = OrderList::new();
//! orders.upsert(Order::new(1, "John Marwin", "Robot", OrderStatus::Pending, 250.0));
//! orders.upsert(Order::new(1, "John Marwin", "Robot", OrderStatus::Delivered, 250.0));
//!
//! assert_eq!(orders.len(), 1);
//! assert_eq!(orders.get(&OrderId::Number(1)).unwrap().status, OrderStatus::Delivered);
//! ```

mod list;
mod types;

pub use list::OrderList;
pub use types::{Order, OrderId, OrderStatus};
