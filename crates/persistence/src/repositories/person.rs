//! Person repository for database operations.

use shared::pagination::PageParams;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::PersonEntity;
use crate::metrics::QueryTimer;

const PERSON_COLUMNS: &str = "id, full_name, father_name, national_id, relation_to_family, \
                              life_status, notes, created_at, updated_at";

/// Patch for a person record; only provided fields are written.
#[derive(Debug, Default, Clone)]
pub struct PersonPatch {
    pub full_name: Option<String>,
    pub father_name: Option<String>,
    pub national_id: Option<String>,
    pub relation_to_family: Option<String>,
    pub life_status: Option<String>,
    pub notes: Option<String>,
}

/// Repository for person-related database operations.
#[derive(Clone)]
pub struct PersonRepository {
    pool: PgPool,
}

impl PersonRepository {
    /// Creates a new PersonRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a person by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PersonEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_person_by_id");
        let result = sqlx::query_as::<_, PersonEntity>(&format!(
            "SELECT {PERSON_COLUMNS} FROM people WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List people, optionally filtered by a case-insensitive name search.
    pub async fn list(
        &self,
        search: Option<&str>,
        page: PageParams,
    ) -> Result<(Vec<PersonEntity>, i64), sqlx::Error> {
        let timer = QueryTimer::new("list_people");
        let pattern = search.map(|s| format!("%{}%", s));

        let rows = sqlx::query_as::<_, PersonEntity>(&format!(
            "SELECT {PERSON_COLUMNS} FROM people
             WHERE ($1::text IS NULL OR full_name ILIKE $1)
             ORDER BY full_name ASC
             LIMIT $2 OFFSET $3"
        ))
        .bind(pattern.as_deref())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM people WHERE ($1::text IS NULL OR full_name ILIKE $1)",
        )
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok((rows, total))
    }

    /// Resolve person names for a set of ids. Used to attach names to
    /// ownership entries in asset detail responses.
    pub async fn find_names(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, String)>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let timer = QueryTimer::new("find_person_names");
        let result = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT id, full_name FROM people WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a new person record.
    pub async fn create(
        &self,
        full_name: &str,
        father_name: Option<&str>,
        national_id: Option<&str>,
        relation_to_family: Option<&str>,
        life_status: &str,
        notes: Option<&str>,
    ) -> Result<PersonEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_person");
        let result = sqlx::query_as::<_, PersonEntity>(&format!(
            "INSERT INTO people (full_name, father_name, national_id, relation_to_family, \
                                 life_status, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {PERSON_COLUMNS}"
        ))
        .bind(full_name)
        .bind(father_name)
        .bind(national_id)
        .bind(relation_to_family)
        .bind(life_status)
        .bind(notes)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a person record with the provided fields.
    pub async fn update(
        &self,
        id: Uuid,
        patch: &PersonPatch,
    ) -> Result<Option<PersonEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_person");
        let result = sqlx::query_as::<_, PersonEntity>(&format!(
            "UPDATE people
             SET full_name = COALESCE($2, full_name),
                 father_name = COALESCE($3, father_name),
                 national_id = COALESCE($4, national_id),
                 relation_to_family = COALESCE($5, relation_to_family),
                 life_status = COALESCE($6, life_status),
                 notes = COALESCE($7, notes),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {PERSON_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.full_name.as_deref())
        .bind(patch.father_name.as_deref())
        .bind(patch.national_id.as_deref())
        .bind(patch.relation_to_family.as_deref())
        .bind(patch.life_status.as_deref())
        .bind(patch.notes.as_deref())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
