//! Common validation utilities for registry records.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    // Pakistani CNIC, dashed (12345-1234567-1) or 13 bare digits.
    static ref NATIONAL_ID_RE: Regex = Regex::new(r"^(\d{5}-\d{7}-\d|\d{13})$").unwrap();
}

/// Validates that an ownership percentage is within (0, 100].
///
/// A zero share is rejected: an owner with no share is a data-entry mistake,
/// not a claim.
pub fn validate_percentage(percentage: f64) -> Result<(), ValidationError> {
    if percentage > 0.0 && percentage <= 100.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("percentage_range");
        err.message = Some("Ownership percentage must be greater than 0 and at most 100".into());
        Err(err)
    }
}

/// Validates a national ID (CNIC) string.
pub fn validate_national_id(national_id: &str) -> Result<(), ValidationError> {
    if NATIONAL_ID_RE.is_match(national_id) {
        Ok(())
    } else {
        let mut err = ValidationError::new("national_id_format");
        err.message = Some("National ID must be 13 digits, with or without dashes".into());
        Err(err)
    }
}

/// Validates that a latitude value is within valid range (-90 to 90).
pub fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        let mut err = ValidationError::new("latitude_range");
        err.message = Some("Latitude must be between -90 and 90".into());
        Err(err)
    }
}

/// Validates that a longitude value is within valid range (-180 to 180).
pub fn validate_longitude(lon: f64) -> Result<(), ValidationError> {
    if (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        let mut err = ValidationError::new("longitude_range");
        err.message = Some("Longitude must be between -180 and 180".into());
        Err(err)
    }
}

/// Validates that a document link looks like an absolute http(s) URL.
///
/// Deliberately shallow: the registry stores externally hosted links and does
/// not check reachability.
pub fn validate_file_url(url: &str) -> Result<(), ValidationError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        let mut err = ValidationError::new("file_url_format");
        err.message = Some("File URL must start with http:// or https://".into());
        Err(err)
    }
}
