//! HTTP/REST API layer for Parley.
//!
//! Axum-based REST API with JSON error responses and CORS locked to a
//! single allow-listed origin.

pub mod error;
pub mod handlers;
pub mod router;
