//! Persistence layer for the Family Asset Registry backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - The offline owner-backfill repair routine

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
