//! Dashboard state owned by the controller

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use tokio::sync::RwLock;

use super::summary::{format_amount, EmployeeSummary};
use crate::feed::FeedEvent;
use crate::order::{Order, OrderList};

/// State shared between the event loop and the HTTP handlers
pub type SharedState = Arc<RwLock<DashboardState>>;

/// Everything the dashboard knows, plus the view derived from it
#[derive(Debug, Clone)]
pub struct DashboardState {
    orders: OrderList,
    employee: String,
    connected: bool,
    last_updated: Option<DateTime<Utc>>,
    summary: EmployeeSummary,
}

impl DashboardState {
    pub fn new(employee: impl Into<String>) -> Self {
        let employee = employee.into();
        let orders = OrderList::new();
        let summary = EmployeeSummary::compute(&orders, &employee);
        Self {
            orders,
            employee,
            connected: false,
            last_updated: None,
            summary,
        }
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    /// Apply one feed event and recompute the view
    pub fn apply(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Snapshot(orders) => {
                info!("Loaded {} orders", orders.len());
                self.orders.replace_all(orders);
            }
            FeedEvent::Connected => {
                self.connected = true;
            }
            FeedEvent::Disconnected => {
                self.connected = false;
            }
            FeedEvent::Cleared => {
                info!("Order list cleared by server");
                self.orders.clear();
            }
            FeedEvent::Order(order) => {
                debug!("Order {} -> {}", order.id, order.status);
                self.orders.upsert(order);
            }
        }

        self.refresh();
    }

    /// Switch the employee the view is computed for
    pub fn select_employee(&mut self, employee: impl Into<String>) {
        self.employee = employee.into();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.summary = EmployeeSummary::compute(&self.orders, &self.employee);
        self.last_updated = Some(Utc::now());
        debug!(
            "View for {}: pending={}, processed={}, revenue={:.2}",
            self.employee,
            self.summary.pending_count(),
            self.summary.processed_count(),
            self.summary.revenue
        );
    }

    pub fn employee(&self) -> &str {
        &self.employee
    }

    pub fn orders(&self) -> &OrderList {
        &self.orders
    }

    pub fn summary(&self) -> &EmployeeSummary {
        &self.summary
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// JSON-friendly copy of the current view
    pub fn snapshot(&self, currency_symbol: &str) -> DashboardSnapshot {
        DashboardSnapshot {
            employee: self.employee.clone(),
            connected: self.connected,
            total_revenue: self.summary.revenue,
            total_revenue_display: format_amount(currency_symbol, self.summary.revenue),
            pending_count: self.summary.pending_count(),
            processed_count: self.summary.processed_count(),
            returned_count: self.summary.returned_count,
            pending: self.summary.pending.clone(),
            processed: self.summary.processed.clone(),
            total_orders: self.orders.len(),
            last_updated: self.last_updated.map(|t| t.to_rfc3339()),
        }
    }
}

/// Serialized form of the view served at `/api/summary`
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub employee: String,
    pub connected: bool,
    pub total_revenue: f64,
    pub total_revenue_display: String,
    pub pending_count: usize,
    pub processed_count: usize,
    pub returned_count: usize,
    pub pending: Vec<Order>,
    pub processed: Vec<Order>,
    /// Orders held for all employees
    pub total_orders: usize,
    pub last_updated: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderStatus;

    fn order(id: u64, status: OrderStatus, amount: f64) -> Order {
        Order::new(id, "John Marwin", "Robot", status, amount)
    }

    #[test]
    fn test_new_state_renders_zeros() {
        let state = DashboardState::new("John Marwin");
        let snapshot = state.snapshot("₱");

        assert_eq!(snapshot.pending_count, 0);
        assert_eq!(snapshot.processed_count, 0);
        assert_eq!(snapshot.total_revenue_display, "₱0.00");
        assert!(!snapshot.connected);
    }

    #[test]
    fn test_apply_events() {
        let mut state = DashboardState::new("John Marwin");

        state.apply(FeedEvent::Snapshot(vec![order(1, OrderStatus::Pending, 100.0)]));
        assert_eq!(state.summary().pending_count(), 1);

        state.apply(FeedEvent::Order(order(1, OrderStatus::Delivered, 100.0)));
        assert_eq!(state.orders().len(), 1);
        assert_eq!(state.summary().pending_count(), 0);
        assert_eq!(state.summary().revenue, 100.0);

        state.apply(FeedEvent::Order(order(2, OrderStatus::Returned, 30.0)));
        assert_eq!(state.orders().len(), 2);
        assert_eq!(state.summary().revenue, 70.0);

        state.apply(FeedEvent::Cleared);
        assert!(state.orders().is_empty());
        assert_eq!(state.summary().revenue, 0.0);
        assert!(state.last_updated().is_some());
    }

    #[test]
    fn test_connection_status() {
        let mut state = DashboardState::new("John Marwin");

        state.apply(FeedEvent::Connected);
        assert!(state.is_connected());

        state.apply(FeedEvent::Disconnected);
        assert!(!state.is_connected());
    }

    #[test]
    fn test_select_employee_recomputes() {
        let mut state = DashboardState::new("John Marwin");
        state.apply(FeedEvent::Snapshot(vec![
            order(1, OrderStatus::Delivered, 100.0),
            Order::new(2, "Ana Cruz", "Kite", OrderStatus::Delivered, 20.0),
        ]));
        assert_eq!(state.summary().revenue, 100.0);

        state.select_employee("Ana Cruz");
        assert_eq!(state.employee(), "Ana Cruz");
        assert_eq!(state.summary().revenue, 20.0);
    }
}
