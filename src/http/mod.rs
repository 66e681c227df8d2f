//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, span, path segments)
//!     → calculator / multiply (compute or proxy)
//!     → response.rs (single trimmed line + "\n")
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{path_segments, UuidRequestId, X_REQUEST_ID};
pub use server::{HttpServer, ServiceKind};
