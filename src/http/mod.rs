//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, timeout, catch-panic)
//!     → request.rs (request ID, uid validation)
//!     → handlers.rs (/check → Aggregator, /info → UpstreamClient, /health, /)
//!     → response.rs (pretty JSON, error envelopes)
//!     → Send to client
//! ```

pub mod dashboard;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{validate_uid, MakeRequestUuid, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
