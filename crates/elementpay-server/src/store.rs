//! In-memory order store with the mock settlement simulator.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use elementpay::constants::{CREATED_PHASE_SECS, PROCESSING_PHASE_SECS, SETTLE_PROBABILITY};
use elementpay::{CreateOrderRequest, Order, OrderStatus};

/// Concurrent order map backed by DashMap. Fast but lost on restart —
/// persistence is explicitly out of scope for the demo.
pub struct OrderStore {
    orders: DashMap<String, Order>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self {
            orders: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Create a new order in `created` state.
    pub fn create(&self, req: CreateOrderRequest) -> Order {
        let order = Order {
            order_id: format!("ord_{}", Uuid::new_v4().simple()),
            status: OrderStatus::Created,
            amount: req.amount,
            currency: req.currency,
            token: req.token,
            note: req.note,
            created_at: Utc::now(),
        };
        self.orders.insert(order.order_id.clone(), order.clone());
        order
    }

    /// Fetch an order, advancing its simulated status by elapsed time.
    pub fn poll(&self, order_id: &str) -> Option<Order> {
        self.poll_at(order_id, Utc::now())
    }

    /// Fetch with an explicit clock. The simulated lifecycle: `created`
    /// until [`CREATED_PHASE_SECS`], `processing` until
    /// [`PROCESSING_PHASE_SECS`], then a single settle/fail roll. Terminal
    /// statuses are sticky — once rolled, later polls return the same
    /// outcome.
    pub fn poll_at(&self, order_id: &str, now: DateTime<Utc>) -> Option<Order> {
        let mut entry = self.orders.get_mut(order_id)?;

        if !entry.status.is_terminal() {
            let elapsed = (now - entry.created_at).num_seconds();
            entry.status = if elapsed < CREATED_PHASE_SECS {
                OrderStatus::Created
            } else if elapsed < PROCESSING_PHASE_SECS {
                OrderStatus::Processing
            } else if rand::random::<f64>() < SETTLE_PROBABILITY {
                OrderStatus::Settled
            } else {
                OrderStatus::Failed
            };
        }

        Some(entry.clone())
    }

    /// Apply a webhook-delivered status. Returns `false` when the order is
    /// unknown. A webhook may move an order to any state, including
    /// terminal ones the simulator has not reached yet.
    pub fn apply_status(&self, order_id: &str, status: OrderStatus) -> bool {
        match self.orders.get_mut(order_id) {
            Some(mut entry) => {
                entry.status = status;
                true
            }
            None => false,
        }
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_req() -> CreateOrderRequest {
        CreateOrderRequest {
            amount: 25.0,
            currency: "KES".to_string(),
            token: "USDC".to_string(),
            note: None,
        }
    }

    #[test]
    fn test_create_assigns_prefixed_id() {
        let store = OrderStore::new();
        let order = store.create(make_req());
        assert!(order.order_id.starts_with("ord_"));
        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_order_is_none() {
        let store = OrderStore::new();
        assert!(store.poll("ord_missing").is_none());
        assert!(!store.apply_status("ord_missing", OrderStatus::Settled));
    }

    #[test]
    fn test_phase_progression() {
        let store = OrderStore::new();
        let order = store.create(make_req());
        let t0 = order.created_at;

        let early = store.poll_at(&order.order_id, t0 + Duration::seconds(3)).unwrap();
        assert_eq!(early.status, OrderStatus::Created);

        let mid = store.poll_at(&order.order_id, t0 + Duration::seconds(10)).unwrap();
        assert_eq!(mid.status, OrderStatus::Processing);

        let late = store.poll_at(&order.order_id, t0 + Duration::seconds(20)).unwrap();
        assert!(late.status.is_terminal());
    }

    #[test]
    fn test_terminal_status_is_sticky() {
        let store = OrderStore::new();
        let order = store.create(make_req());
        let t0 = order.created_at;

        let first = store.poll_at(&order.order_id, t0 + Duration::seconds(30)).unwrap();
        assert!(first.status.is_terminal());

        // Re-polling never re-rolls the outcome.
        for _ in 0..20 {
            let again = store.poll_at(&order.order_id, t0 + Duration::seconds(60)).unwrap();
            assert_eq!(again.status, first.status);
        }
    }

    #[test]
    fn test_webhook_status_wins_over_simulator() {
        let store = OrderStore::new();
        let order = store.create(make_req());
        let t0 = order.created_at;

        assert!(store.apply_status(&order.order_id, OrderStatus::Settled));

        // Simulator would still say `created` at 3s, but the order is terminal.
        let polled = store.poll_at(&order.order_id, t0 + Duration::seconds(3)).unwrap();
        assert_eq!(polled.status, OrderStatus::Settled);
    }
}
