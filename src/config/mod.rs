//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (+ CLI overrides)
//!     → loader.rs (read & default)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and frozen; no hot reload
//! - All fields have defaults so the binary runs with zero setup
//! - Validation separates syntactic (parse) from semantic checks
//!   and reports every failure, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ServiceConfig;
