//! Wire types shared between the order API and the webhook receiver.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Settlement lifecycle of a mock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Created,
    Processing,
    Settled,
    Failed,
}

impl OrderStatus {
    /// Settled and failed orders do not change state again.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Settled | OrderStatus::Failed)
    }
}

/// Request body for `POST /api/mock/orders/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub amount: f64,
    pub currency: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A mock order, as returned by the order endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub status: OrderStatus,
    pub amount: f64,
    pub currency: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Inner `data` object of a webhook payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookData {
    pub order_id: String,
    pub status: OrderStatus,
}

/// Webhook payload, parsed only after the signature is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: WebhookData,
}

/// Error body returned by all endpoints: `{error, message}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn new(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
        }
    }
}
