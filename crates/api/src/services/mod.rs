//! Application services.

pub mod auth;
pub mod bootstrap;
pub mod cookies;
