//! Core data types for orders

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Order identifier
///
/// The upstream service may send ids as JSON numbers or strings; both are
/// accepted and compared by exact value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Number(u64),
    Text(String),
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        OrderId::Number(id)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        OrderId::Text(id.to_string())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderId::Number(id) => write!(f, "{}", id),
            OrderId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// Lifecycle status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Cancel,
    OnTheWay,
    Delivered,
    Returned,
    Completed,
    /// Any status this dashboard does not know about
    #[serde(other)]
    Other,
}

impl OrderStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Cancel => "CANCEL",
            OrderStatus::OnTheWay => "ON_THE_WAY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Returned => "RETURNED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Other => "OTHER",
        }
    }

    /// Belongs to the "pending" table
    pub fn is_pending(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Cancel)
    }

    /// Belongs to the "processed" table
    pub fn is_processed(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Returned | OrderStatus::OnTheWay
        )
    }

    /// Sign applied to the order amount when summing revenue
    pub fn revenue_sign(&self) -> f64 {
        match self {
            OrderStatus::Delivered | OrderStatus::Completed => 1.0,
            OrderStatus::Returned => -1.0,
            _ => 0.0,
        }
    }

    /// CSS class for the status badge, e.g. `status-on-the-way`
    pub fn badge_class(&self) -> String {
        format!("status-{}", self.as_str().to_lowercase().replace('_', "-"))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Read a string field, treating `null` as empty
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single order as held by the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Employee the order is assigned to; empty when unassigned
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assigned_person: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub toy_name: String,
    pub status: OrderStatus,
    pub total_amount: f64,
}

impl Order {
    pub fn new(
        id: u64,
        assigned_person: impl Into<String>,
        toy_name: impl Into<String>,
        status: OrderStatus,
        total_amount: f64,
    ) -> Self {
        Self {
            id: OrderId::Number(id),
            assigned_person: assigned_person.into(),
            toy_name: toy_name.into(),
            status,
            total_amount,
        }
    }

    pub fn is_assigned_to(&self, employee: &str) -> bool {
        self.assigned_person == employee
    }

    /// Contribution of this order to revenue
    pub fn signed_amount(&self) -> f64 {
        self.status.revenue_sign() * self.total_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order() {
        let json = r#"{
            "id": 7,
            "assigned_person": "John Marwin",
            "toy_name": "Yo-yo",
            "status": "ON_THE_WAY",
            "total_amount": 99.5,
            "created_at": "2024-01-01T00:00:00Z"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId::Number(7));
        assert_eq!(order.status, OrderStatus::OnTheWay);
        assert_eq!(order.total_amount, 99.5);
        assert!(order.is_assigned_to("John Marwin"));
    }

    #[test]
    fn test_parse_string_id_and_unknown_status() {
        let json = r#"{"id":"ord-1","assigned_person":"A","toy_name":"Kite","status":"LOST","total_amount":10}"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId::from("ord-1"));
        assert_eq!(order.status, OrderStatus::Other);
        assert_eq!(order.signed_amount(), 0.0);
    }

    #[test]
    fn test_parse_unassigned_order() {
        let json = r#"{"id":2,"assigned_person":null,"toy_name":null,"status":"PENDING","total_amount":5}"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.assigned_person, "");
        assert_eq!(order.toy_name, "");
        assert!(!order.is_assigned_to("John Marwin"));

        let json = r#"{"id":3,"status":"PENDING","total_amount":5}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.assigned_person, "");
    }

    #[test]
    fn test_status_display_honours_width() {
        assert_eq!(format!("{:<10}|", OrderStatus::Pending), "PENDING   |");
        assert_eq!(format!("{:>12}", OrderStatus::OnTheWay), "  ON_THE_WAY");
    }

    #[test]
    fn test_status_partition_is_disjoint() {
        let all = [
            OrderStatus::Pending,
            OrderStatus::Cancel,
            OrderStatus::OnTheWay,
            OrderStatus::Delivered,
            OrderStatus::Returned,
            OrderStatus::Completed,
            OrderStatus::Other,
        ];

        for status in all {
            assert!(!(status.is_pending() && status.is_processed()), "{status}");
        }
    }

    #[test]
    fn test_revenue_sign() {
        assert_eq!(OrderStatus::Delivered.revenue_sign(), 1.0);
        assert_eq!(OrderStatus::Completed.revenue_sign(), 1.0);
        assert_eq!(OrderStatus::Returned.revenue_sign(), -1.0);
        assert_eq!(OrderStatus::Pending.revenue_sign(), 0.0);
        assert_eq!(OrderStatus::OnTheWay.revenue_sign(), 0.0);
    }

    #[test]
    fn test_badge_class() {
        assert_eq!(OrderStatus::OnTheWay.badge_class(), "status-on-the-way");
        assert_eq!(OrderStatus::Cancel.badge_class(), "status-cancel");
    }
}
