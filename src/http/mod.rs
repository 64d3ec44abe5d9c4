//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, explicit route table)
//!     → middleware/lifecycle.rs (root span, request id, entry/exit logs)
//!     → api handlers (nested work-phase spans)
//!     → response.rs (typed result → HTTP status + JSON body)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, X_REQUEST_ID};
pub use response::{ApiError, SimulatedError};
pub use server::{AppState, HttpServer};
