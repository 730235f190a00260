//! Domain models and services for the Family Asset Registry.
//!
//! This crate holds the record/ownership data model and its consistency
//! rules, independent of HTTP and storage concerns:
//! - The tagged-union asset record and its embedded sub-records
//! - The ownership ledger and its share-sum invariant
//! - Document attachments and file-type inference
//! - Dashboard summary shapes

pub mod models;
pub mod services;
