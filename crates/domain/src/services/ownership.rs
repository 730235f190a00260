//! Ownership-share validation.
//!
//! The owners array of an asset must describe a complete partition of the
//! asset: every share in (0, 100], no person listed twice, shares summing to
//! exactly 100. Historically this was never enforced and registries drifted
//! (hence the owner-backfill repair); it is now a hard write-time invariant,
//! checked before any owners array reaches storage.

use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

use crate::models::OwnershipEntry;

/// Tolerance when comparing the share sum to 100, covering fractional shares
/// such as three equal heirs at 33.33/33.33/33.34.
pub const SHARE_SUM_TOLERANCE: f64 = 0.01;

/// Why an owners array was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum OwnershipError {
    #[error("Ownership percentage {0} is out of range (must be > 0 and <= 100)")]
    ShareOutOfRange(f64),

    #[error("Person {0} is listed more than once")]
    DuplicatePerson(Uuid),

    #[error("Ownership percentages sum to {0}, expected 100")]
    SumNotComplete(f64),
}

/// Validates a replacement owners array.
///
/// An empty array is accepted: assets may be recorded before their ownership
/// is known, and the repair routine backfills those later. A non-empty array
/// must partition the asset completely.
pub fn validate_owner_shares(owners: &[OwnershipEntry]) -> Result<(), OwnershipError> {
    if owners.is_empty() {
        return Ok(());
    }

    let mut seen: HashSet<Uuid> = HashSet::with_capacity(owners.len());
    let mut sum = 0.0f64;

    for entry in owners {
        if !(entry.percentage > 0.0 && entry.percentage <= 100.0) {
            return Err(OwnershipError::ShareOutOfRange(entry.percentage));
        }
        if !seen.insert(entry.person_id) {
            return Err(OwnershipError::DuplicatePerson(entry.person_id));
        }
        sum += entry.percentage;
    }

    if (sum - 100.0).abs() > SHARE_SUM_TOLERANCE {
        return Err(OwnershipError::SumNotComplete(sum));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OwnershipType;

    fn entry(percentage: f64) -> OwnershipEntry {
        OwnershipEntry {
            person_id: Uuid::new_v4(),
            percentage,
            ownership_type: OwnershipType::LegalOwner,
        }
    }

    #[test]
    fn test_empty_owners_accepted() {
        assert!(validate_owner_shares(&[]).is_ok());
    }

    #[test]
    fn test_sole_owner_accepted() {
        assert!(validate_owner_shares(&[entry(100.0)]).is_ok());
    }

    #[test]
    fn test_even_split_accepted() {
        assert!(validate_owner_shares(&[entry(50.0), entry(50.0)]).is_ok());
    }

    #[test]
    fn test_three_heirs_within_tolerance() {
        assert!(validate_owner_shares(&[entry(33.33), entry(33.33), entry(33.34)]).is_ok());
    }

    #[test]
    fn test_incomplete_sum_rejected() {
        let result = validate_owner_shares(&[entry(50.0), entry(25.0)]);
        assert_eq!(result, Err(OwnershipError::SumNotComplete(75.0)));
    }

    #[test]
    fn test_oversubscribed_sum_rejected() {
        let result = validate_owner_shares(&[entry(80.0), entry(40.0)]);
        assert!(matches!(result, Err(OwnershipError::SumNotComplete(_))));
    }

    #[test]
    fn test_zero_share_rejected() {
        let result = validate_owner_shares(&[entry(0.0), entry(100.0)]);
        assert_eq!(result, Err(OwnershipError::ShareOutOfRange(0.0)));
    }

    #[test]
    fn test_negative_share_rejected() {
        let result = validate_owner_shares(&[entry(-10.0), entry(110.0)]);
        assert_eq!(result, Err(OwnershipError::ShareOutOfRange(-10.0)));
    }

    #[test]
    fn test_share_above_hundred_rejected() {
        let result = validate_owner_shares(&[entry(120.0)]);
        assert_eq!(result, Err(OwnershipError::ShareOutOfRange(120.0)));
    }

    #[test]
    fn test_duplicate_person_rejected() {
        let person = Uuid::new_v4();
        let owners = vec![
            OwnershipEntry {
                person_id: person,
                percentage: 50.0,
                ownership_type: OwnershipType::LegalOwner,
            },
            OwnershipEntry {
                person_id: person,
                percentage: 50.0,
                ownership_type: OwnershipType::Inherited,
            },
        ];
        assert_eq!(
            validate_owner_shares(&owners),
            Err(OwnershipError::DuplicatePerson(person))
        );
    }
}
