//! Domain services for the Family Asset Registry.
//!
//! Services contain business logic that operates on domain models.

pub mod ownership;

pub use ownership::{validate_owner_shares, OwnershipError, SHARE_SUM_TOLERANCE};
