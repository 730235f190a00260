//! HTTP route handlers.

pub mod assets;
pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod health;
pub mod people;
pub mod users;
