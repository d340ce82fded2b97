//! Food truck map: the `/trucks` service and the map controller that
//! consumes it.

pub mod client;
pub mod config;
pub mod dataset;
pub mod dataset_cache;
pub mod filter;
pub mod geo;
pub mod models;
pub mod query;
pub mod server;
pub mod template_engine;
