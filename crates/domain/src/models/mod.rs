//! Domain model definitions.

pub mod asset;
pub mod dashboard;
pub mod document;
pub mod history;
pub mod ownership;
pub mod person;
pub mod user;

pub use asset::{
    Acquisition, Asset, AssetDetails, AssetFlags, AssetStatus, AssetSummary, AssetType,
    Compliance, ContactRef, Dimensions, Dispute, Location, MutationTitle, Structure, Valuation,
    VehicleRegistration, VehicleSpecs,
};
pub use dashboard::{CountBucket, DashboardSummary, MonthlyCount, OwnerAssetCount};
pub use document::{infer_file_type, AssetDocument, Document};
pub use history::HistoryEntry;
pub use ownership::{OwnershipEntry, OwnershipType};
pub use person::{LifeStatus, Person, UNKNOWN_OWNER_NAME};
pub use user::{User, UserRole};
