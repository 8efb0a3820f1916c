//! In-memory order list

use super::types::{Order, OrderId};

/// Ordered replica of the upstream order collection
///
/// Ids are unique: an update for a known id replaces the entry where it
/// stands, an unseen id goes to the front.
#[derive(Debug, Clone, Default)]
pub struct OrderList {
    orders: Vec<Order>,
}

impl OrderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from a fetched snapshot, keeping the first entry per id
    pub fn from_snapshot(orders: Vec<Order>) -> Self {
        let mut list = Self::new();
        list.replace_all(orders);
        list
    }

    /// Replace the contents with a fetched snapshot
    pub fn replace_all(&mut self, orders: Vec<Order>) {
        self.orders.clear();
        for order in orders {
            if self.position(&order.id).is_none() {
                self.orders.push(order);
            }
        }
    }

    /// Update an existing order in place, or insert a new one at the front
    ///
    /// Returns `true` when the order was new.
    pub fn upsert(&mut self, order: Order) -> bool {
        match self.position(&order.id) {
            Some(index) => {
                self.orders[index] = order;
                false
            }
            None => {
                self.orders.insert(0, order);
                true
            }
        }
    }

    pub fn clear(&mut self) {
        self.orders.clear();
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Orders assigned to `employee`, in list order
    pub fn for_employee<'a>(&'a self, employee: &'a str) -> impl Iterator<Item = &'a Order> {
        self.orders.iter().filter(move |o| o.is_assigned_to(employee))
    }

    fn position(&self, id: &OrderId) -> Option<usize> {
        self.orders.iter().position(|o| &o.id == id)
    }
}
