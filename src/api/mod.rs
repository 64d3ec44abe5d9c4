//! Demo API handlers.
//!
//! Each endpoint opens one or more nested spans representing invented work
//! phases, sleeps a little to simulate that phase's cost, attaches
//! illustrative attributes, and logs once per phase. The numbers are demo
//! dressing; the span shape and log/trace correlation are the point.

pub mod handlers;
pub mod types;

pub use handlers::{get_orders, get_users, health, home, simulated_error, slow};
