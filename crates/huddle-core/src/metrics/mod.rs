//! In-process request metrics
//!
//! A [`MetricsRegistry`] counts requests per endpoint and per status code and
//! keeps latency as `(sum, count)` pairs; averages are only divided out when
//! a [`MetricsSnapshot`] is taken.

mod exposition;
mod registry;

pub use registry::{MetricsRegistry, MetricsSnapshot, RequestTimer};
