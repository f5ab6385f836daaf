//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod config_source;
mod http_client;
mod reporter;

pub use clock::Clock;
pub use config_source::{ConfigError, ConfigSource};
pub use http_client::{HttpClient, HttpClientError, HttpFuture};
pub use reporter::Reporter;
