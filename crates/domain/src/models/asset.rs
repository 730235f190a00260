//! Asset record domain model.
//!
//! The asset is the central record of the registry. Type-specific fields live
//! in the `AssetDetails` tagged union, one variant per asset type, so a
//! vehicle record cannot carry land dimensions and readers never probe for
//! optional sub-objects.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::models::document::AssetDocument;
use crate::models::history::HistoryEntry;
use crate::models::ownership::OwnershipEntry;

/// Closed set of asset types; the discriminator of `AssetDetails`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    LandPlot,
    House,
    Apartment,
    Vehicle,
    BusinessShare,
    Other,
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "land_plot" => Ok(AssetType::LandPlot),
            "house" => Ok(AssetType::House),
            "apartment" => Ok(AssetType::Apartment),
            "vehicle" => Ok(AssetType::Vehicle),
            "business_share" => Ok(AssetType::BusinessShare),
            "other" => Ok(AssetType::Other),
            _ => Err(format!("Unknown asset type: {}", s)),
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetType::LandPlot => write!(f, "land_plot"),
            AssetType::House => write!(f, "house"),
            AssetType::Apartment => write!(f, "apartment"),
            AssetType::Vehicle => write!(f, "vehicle"),
            AssetType::BusinessShare => write!(f, "business_share"),
            AssetType::Other => write!(f, "other"),
        }
    }
}

/// Current legal standing of an asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Clean,
    InDispute,
    UnderTransfer,
    SoldButNotCleared,
    #[default]
    Unknown,
}

impl FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clean" => Ok(AssetStatus::Clean),
            "in_dispute" => Ok(AssetStatus::InDispute),
            "under_transfer" => Ok(AssetStatus::UnderTransfer),
            "sold_but_not_cleared" => Ok(AssetStatus::SoldButNotCleared),
            "unknown" => Ok(AssetStatus::Unknown),
            _ => Err(format!("Unknown asset status: {}", s)),
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetStatus::Clean => write!(f, "clean"),
            AssetStatus::InDispute => write!(f, "in_dispute"),
            AssetStatus::UnderTransfer => write!(f, "under_transfer"),
            AssetStatus::SoldButNotCleared => write!(f, "sold_but_not_cleared"),
            AssetStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Physical dimensions of a land parcel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Dimensions {
    pub area_value: Option<f64>,
    /// marla, kanal, acre, square_feet, square_yards
    pub area_unit: Option<String>,
    pub front_feet: Option<f64>,
    pub depth_feet: Option<f64>,
}

/// Built-structure details for a house or apartment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Structure {
    pub covered_area_sqft: Option<f64>,
    pub floors: Option<i32>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub year_built: Option<i32>,
    pub condition: Option<String>,
}

/// Mechanical specs for a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VehicleSpecs {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub engine_capacity_cc: Option<i32>,
    pub chassis_number: Option<String>,
    pub engine_number: Option<String>,
    pub color: Option<String>,
}

/// Registration-book details for a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VehicleRegistration {
    pub registration_number: Option<String>,
    pub registered_city: Option<String>,
    pub registered_owner_name: Option<String>,
    pub token_tax_paid_until: Option<NaiveDate>,
}

/// Type-specific portion of an asset record, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetDetails {
    LandPlot {
        /// residential, commercial, agricultural
        land_use: Option<String>,
        #[serde(default)]
        dimensions: Dimensions,
    },
    House {
        /// self_occupied, rented, vacant
        usage: Option<String>,
        #[serde(default)]
        structure: Structure,
    },
    Apartment {
        usage: Option<String>,
        #[serde(default)]
        structure: Structure,
    },
    Vehicle {
        /// car, motorcycle, truck, tractor
        vehicle_type: Option<String>,
        #[serde(default)]
        specs: VehicleSpecs,
        #[serde(default)]
        registration: VehicleRegistration,
    },
    BusinessShare {
        business_name: Option<String>,
        share_percentage: Option<f64>,
    },
    Other {
        note: Option<String>,
    },
}

impl AssetDetails {
    /// The discriminator for this variant, mirrored into the `asset_type`
    /// column and dashboard groupings.
    pub fn asset_type(&self) -> AssetType {
        match self {
            AssetDetails::LandPlot { .. } => AssetType::LandPlot,
            AssetDetails::House { .. } => AssetType::House,
            AssetDetails::Apartment { .. } => AssetType::Apartment,
            AssetDetails::Vehicle { .. } => AssetType::Vehicle,
            AssetDetails::BusinessShare { .. } => AssetType::BusinessShare,
            AssetDetails::Other { .. } => AssetType::Other,
        }
    }
}

impl Default for AssetDetails {
    fn default() -> Self {
        AssetDetails::Other { note: None }
    }
}

/// Where an asset sits, from country down to plot number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct Location {
    pub country: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub tehsil: Option<String>,
    pub area: Option<String>,
    pub society: Option<String>,
    pub block: Option<String>,
    pub street_number: Option<String>,
    pub plot_number: Option<String>,
    pub house_number: Option<String>,
    pub apartment_number: Option<String>,
    pub address: Option<String>,
    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: Option<f64>,
    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: Option<f64>,
}

/// How and when the asset was acquired.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Acquisition {
    /// purchase, inheritance, gift, exchange
    pub method: Option<String>,
    pub acquired_on: Option<NaiveDate>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub acquired_from: Option<String>,
    pub notes: Option<String>,
}

/// Current and historical valuation figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Valuation {
    pub estimated_value: Option<f64>,
    pub currency: Option<String>,
    pub valued_on: Option<NaiveDate>,
    pub valued_by: Option<String>,
    pub notes: Option<String>,
}

/// Mutation-and-title registry fields (Pakistani land-record terminology for
/// the legal transfer documentation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MutationTitle {
    pub mutation_number: Option<String>,
    pub mutation_date: Option<NaiveDate>,
    pub registry_number: Option<String>,
    pub title_in_name_of: Option<String>,
    pub fard_available: Option<bool>,
    pub notes: Option<String>,
}

/// Tax and society-dues compliance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Compliance {
    pub property_tax_paid_until: Option<NaiveDate>,
    pub society_dues_clear: Option<bool>,
    pub utility_bills_clear: Option<bool>,
    pub notes: Option<String>,
}

/// Open litigation or claim details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Dispute {
    pub in_dispute: bool,
    pub case_number: Option<String>,
    pub court: Option<String>,
    pub opposing_party: Option<String>,
    pub filed_on: Option<NaiveDate>,
    pub summary: Option<String>,
}

/// A person related to the asset in a non-owner capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ContactRef {
    pub person_id: Uuid,
    /// caretaker, tenant, dealer, lawyer
    pub role: Option<String>,
    pub notes: Option<String>,
}

/// Attention flags surfaced on dashboards and list views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AssetFlags {
    pub needs_attention: bool,
    pub high_value: bool,
    pub has_legal_issues: bool,
}

/// The full asset record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub title: String,
    pub nickname: Option<String>,
    pub description: Option<String>,
    pub status: AssetStatus,
    pub location: Location,
    pub details: AssetDetails,
    pub acquisition: Option<Acquisition>,
    pub valuation: Option<Valuation>,
    pub mutation_title: Option<MutationTitle>,
    pub compliance: Option<Compliance>,
    pub dispute: Option<Dispute>,
    pub owners: Vec<OwnershipEntry>,
    pub contacts: Vec<ContactRef>,
    pub documents: Vec<AssetDocument>,
    pub history: Vec<HistoryEntry>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub flags: AssetFlags,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    /// The discriminator of this asset's details variant.
    pub fn asset_type(&self) -> AssetType {
        self.details.asset_type()
    }

    /// History entries sorted by date ascending for display.
    ///
    /// Entries are stored in insertion order, which is not necessarily
    /// chronological for backdated actions.
    pub fn history_by_date(&self) -> Vec<&HistoryEntry> {
        let mut entries: Vec<&HistoryEntry> = self.history.iter().collect();
        entries.sort_by_key(|e| e.date);
        entries
    }
}

/// Summary projection for list views: title, type, status, location, owners.
#[derive(Debug, Clone, Serialize)]
pub struct AssetSummary {
    pub id: Uuid,
    pub title: String,
    pub nickname: Option<String>,
    pub asset_type: AssetType,
    pub status: AssetStatus,
    pub city: Option<String>,
    pub owners: Vec<OwnershipEntry>,
    pub flags: AssetFlags,
    pub updated_at: DateTime<Utc>,
}
