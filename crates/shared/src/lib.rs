//! Shared utilities and common types for the Family Asset Registry backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Session token signing and validation (JWT)
//! - Password hashing with Argon2id
//! - Common validation logic
//! - Page-based pagination helpers

pub mod jwt;
pub mod pagination;
pub mod password;
pub mod validation;
