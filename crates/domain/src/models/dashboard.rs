//! Dashboard summary domain models.
//!
//! Grouped counts computed fresh on every dashboard load; at a single
//! family's scale there is nothing to cache or materialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One grouped count, keyed by type, status, or city.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CountBucket {
    pub key: String,
    pub count: i64,
}

/// A person ranked by how many assets they hold a share in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OwnerAssetCount {
    pub person_id: Uuid,
    pub full_name: String,
    pub asset_count: i64,
}

/// Acquisitions in one calendar month ("YYYY-MM").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthlyCount {
    pub month: String,
    pub count: i64,
}

/// Complete dashboard summary response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DashboardSummary {
    pub total_assets: i64,
    pub by_type: Vec<CountBucket>,
    pub by_status: Vec<CountBucket>,
    pub by_city: Vec<CountBucket>,
    #[serde(default)]
    pub top_owners: Vec<OwnerAssetCount>,
    /// Trailing six-month acquisition trend, oldest month first.
    pub acquisition_trend: Vec<MonthlyCount>,
    pub flagged_for_attention: i64,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_serialization_shape() {
        let summary = DashboardSummary {
            total_assets: 12,
            by_type: vec![CountBucket {
                key: "house".into(),
                count: 4,
            }],
            generated_at: Utc::now(),
            ..Default::default()
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_assets"], 12);
        assert_eq!(json["by_type"][0]["key"], "house");
        assert!(json["generated_at"].is_string());
    }
}
