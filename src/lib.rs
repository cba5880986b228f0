//! Serves the complete Nintendo eShop US game listing as one JSON array, stitched
//! together from the paginated upstream feed on every request.

pub mod aggregate;
pub mod config;
pub mod eshop;
pub mod server;

mod metrics;
pub use metrics::Metrics;

pub use aggregate::{AggregateError, Aggregator};
pub use config::Config;
