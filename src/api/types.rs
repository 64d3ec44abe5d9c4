//! Response payload types for the demo endpoints.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u64,
    pub name: &'static str,
    pub email: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: u64,
    pub user_id: u64,
    pub total: f64,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize)]
pub struct SlowResponse {
    pub message: &'static str,
    pub delay_seconds: f64,
}
