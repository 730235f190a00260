//! Dashboard summary repository.
//!
//! Grouped counts are computed fresh on every call with plain GROUP BY
//! queries; at one family's scale there is nothing worth materializing.

use chrono::Utc;
use domain::models::{CountBucket, DashboardSummary, MonthlyCount, OwnerAssetCount};
use sqlx::{PgPool, Row};

use crate::metrics::QueryTimer;

/// How many owners the dashboard ranks.
const TOP_OWNERS_LIMIT: i64 = 5;

/// How many cities the dashboard lists.
const TOP_CITIES_LIMIT: i64 = 10;

/// Repository for dashboard aggregation queries.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Compute the complete dashboard summary.
    pub async fn get_summary(&self) -> Result<DashboardSummary, sqlx::Error> {
        let timer = QueryTimer::new("dashboard_summary");

        // Run the grouped counts in parallel.
        let (totals, by_type, by_status, by_city, top_owners, acquisition_trend) = tokio::try_join!(
            self.get_totals(),
            self.count_by("asset_type"),
            self.count_by("status"),
            self.count_by_city(),
            self.get_top_owners(),
            self.get_acquisition_trend(),
        )?;

        timer.record();
        Ok(DashboardSummary {
            total_assets: totals.0,
            by_type,
            by_status,
            by_city,
            top_owners,
            acquisition_trend,
            flagged_for_attention: totals.1,
            generated_at: Utc::now(),
        })
    }

    async fn get_totals(&self) -> Result<(i64, i64), sqlx::Error> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE needs_attention) AS flagged
             FROM assets",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok((row.get::<i64, _>("total"), row.get::<i64, _>("flagged")))
    }

    /// Grouped count over one of the scalar discriminator columns.
    async fn count_by(&self, column: &str) -> Result<Vec<CountBucket>, sqlx::Error> {
        // `column` is one of two compile-time constants, never user input.
        let rows = sqlx::query(&format!(
            "SELECT {column} AS key, COUNT(*) AS count
             FROM assets
             GROUP BY {column}
             ORDER BY count DESC, key ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CountBucket {
                key: row.get("key"),
                count: row.get("count"),
            })
            .collect())
    }

    async fn count_by_city(&self) -> Result<Vec<CountBucket>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT COALESCE(location->>'city', 'unknown') AS key, COUNT(*) AS count
             FROM assets
             GROUP BY 1
             ORDER BY count DESC, key ASC
             LIMIT $1",
        )
        .bind(TOP_CITIES_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CountBucket {
                key: row.get("key"),
                count: row.get("count"),
            })
            .collect())
    }

    /// People ranked by how many assets they hold a share in, resolved to
    /// names via the people table.
    async fn get_top_owners(&self) -> Result<Vec<OwnerAssetCount>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT p.id AS person_id, p.full_name, COUNT(DISTINCT a.id) AS asset_count
             FROM assets a
             CROSS JOIN LATERAL jsonb_array_elements(a.owners) AS o
             JOIN people p ON p.id = (o->>'person_id')::uuid
             GROUP BY p.id, p.full_name
             ORDER BY asset_count DESC, p.full_name ASC
             LIMIT $1",
        )
        .bind(TOP_OWNERS_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| OwnerAssetCount {
                person_id: row.get("person_id"),
                full_name: row.get("full_name"),
                asset_count: row.get("asset_count"),
            })
            .collect())
    }

    /// Acquisitions per calendar month over the trailing six months,
    /// oldest month first. Months with no acquisitions are omitted.
    async fn get_acquisition_trend(&self) -> Result<Vec<MonthlyCount>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT to_char(date_trunc('month', (acquisition->>'acquired_on')::date), 'YYYY-MM') AS month,
                    COUNT(*) AS count
             FROM assets
             WHERE acquisition->>'acquired_on' IS NOT NULL
               AND (acquisition->>'acquired_on')::date
                   >= date_trunc('month', NOW()) - INTERVAL '5 months'
             GROUP BY 1
             ORDER BY 1 ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| MonthlyCount {
                month: row.get("month"),
                count: row.get("count"),
            })
            .collect())
    }
}
