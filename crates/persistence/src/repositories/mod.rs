//! Repository implementations.

pub mod asset;
pub mod dashboard;
pub mod document;
pub mod person;
pub mod repair;
pub mod user;

pub use asset::{AssetFilter, AssetPatch, AssetRepository, AssetWrite};
pub use dashboard::DashboardRepository;
pub use document::{DocumentRepository, NewDocument};
pub use person::{PersonPatch, PersonRepository};
pub use repair::{backfill_missing_owners, RepairSummary};
pub use user::{UserPatch, UserRepository};
