//! ElementPay demo backend — mock order API and HMAC-verified webhook receiver.
//!
//! The server receives signed `order.updated` callbacks, verifies the
//! `X-Webhook-Signature` header against the shared secret before any
//! processing, and exposes a mock order API whose settlement status advances
//! over time. Verification logic lives in the core [`elementpay`] crate;
//! this crate provides the HTTP server, state, and metrics.
//!
//! # Modules
//!
//! - [`routes`] — HTTP endpoints (webhook receiver, order create/get, health, metrics)
//! - [`state`] — Shared [`AppState`](state::AppState)
//! - [`store`] — In-memory order store with the settlement simulator
//! - [`metrics`] — Prometheus metrics for webhook and order operations

pub mod metrics;
pub mod routes;
pub mod state;
pub mod store;
