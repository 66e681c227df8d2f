//! Calculator and multiply microservices for a service-mesh demo.

pub mod calculator;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod multiply;
pub mod observability;
pub mod upstream;

pub use config::schema::ServiceConfig;
pub use error::ServiceError;
pub use http::{HttpServer, ServiceKind};
pub use lifecycle::Shutdown;
