//! HTTP middleware stack: session resolution, CORS and per-request tracing.

pub mod auth;
pub mod cors;
pub mod trace;
