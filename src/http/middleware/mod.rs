//! HTTP middleware.

pub mod lifecycle;

pub use lifecycle::request_lifecycle;
