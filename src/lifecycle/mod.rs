//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Init telemetry → Start listener
//!
//! Shutdown:
//!     Signal received → Stop accepting → Drain in-flight requests
//!     → Flush telemetry providers → Exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
