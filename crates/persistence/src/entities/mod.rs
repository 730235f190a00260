//! Entity definitions (database row mappings).

pub mod asset;
pub mod document;
pub mod person;
pub mod user;

pub use asset::{AssetEntity, AssetSummaryEntity};
pub use document::DocumentEntity;
pub use person::PersonEntity;
pub use user::UserEntity;
