//! Authenticated admin surface: sign-in, record aggregation, and the
//! expand/collapse review flow.

pub mod aggregation;
pub mod auth;
pub mod handlers;
