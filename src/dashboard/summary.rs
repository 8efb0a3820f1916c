//! Per-employee aggregates

use serde::Serialize;

use crate::order::{Order, OrderList, OrderStatus};

/// What the dashboard shows for one employee
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmployeeSummary {
    pub employee: String,
    /// `PENDING` and `CANCEL` orders, in list order
    pub pending: Vec<Order>,
    /// `DELIVERED`, `RETURNED` and `ON_THE_WAY` orders, in list order
    pub processed: Vec<Order>,
    pub returned_count: usize,
    /// Delivered and completed amounts minus returned amounts
    pub revenue: f64,
}

impl EmployeeSummary {
    pub fn compute(orders: &OrderList, employee: &str) -> Self {
        let mut summary = Self {
            employee: employee.to_string(),
            ..Default::default()
        };

        for order in orders.for_employee(employee) {
            if order.status.is_pending() {
                summary.pending.push(order.clone());
            } else if order.status.is_processed() {
                summary.processed.push(order.clone());
            }

            if order.status == OrderStatus::Returned {
                summary.returned_count += 1;
            }

            summary.revenue += order.signed_amount();
        }

        summary
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }
}

/// Format an amount with two decimals behind the currency symbol
pub fn format_amount(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}
