//! # Utility Modules
//!
//! Supporting utilities for logging, timing, and observability.
//!
//! ## Components
//! - **Logging**: structured logging configuration (tracing)
//! - **Timeout**: async timeout wrappers mapping elapsed time to the typed
//!   timeout error
//! - **Metrics**: thread-safe observability counters

pub mod logging;
pub mod metrics;
pub mod timeout;

pub use metrics::{Metrics, MetricsSnapshot};
