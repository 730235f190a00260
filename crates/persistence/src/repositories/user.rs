//! User repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::UserEntity;
use crate::metrics::QueryTimer;

const USER_COLUMNS: &str = "id, email, full_name, password_hash, role, relation_to_family, \
                            national_id, life_status, is_active, created_at, updated_at";

/// Patch for a user account; only provided fields are written.
#[derive(Debug, Default, Clone)]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub relation_to_family: Option<String>,
    pub national_id: Option<String>,
    pub life_status: Option<String>,
    pub is_active: Option<bool>,
}

/// Repository for user-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a user by email address. The lookup is against the stored
    /// lowercase form.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_email");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all users, newest first.
    pub async fn list(&self) -> Result<Vec<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_users");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count all users. Used by the admin bootstrap to detect a fresh install.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_users");
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Create a new user account. Email is lowercased before storage; the
    /// unique index on email surfaces duplicates as a database error.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        email: &str,
        full_name: &str,
        password_hash: &str,
        role: &str,
        relation_to_family: Option<&str>,
        national_id: Option<&str>,
        life_status: &str,
    ) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "INSERT INTO users (email, full_name, password_hash, role, relation_to_family, \
                                national_id, life_status, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, true)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email.to_lowercase())
        .bind(full_name)
        .bind(password_hash)
        .bind(role)
        .bind(relation_to_family)
        .bind(national_id)
        .bind(life_status)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a user account with the provided fields.
    pub async fn update(
        &self,
        id: Uuid,
        patch: &UserPatch,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_user");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "UPDATE users
             SET full_name = COALESCE($2, full_name),
                 role = COALESCE($3, role),
                 relation_to_family = COALESCE($4, relation_to_family),
                 national_id = COALESCE($5, national_id),
                 life_status = COALESCE($6, life_status),
                 is_active = COALESCE($7, is_active),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.full_name.as_deref())
        .bind(patch.role.as_deref())
        .bind(patch.relation_to_family.as_deref())
        .bind(patch.national_id.as_deref())
        .bind(patch.life_status.as_deref())
        .bind(patch.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Hard-delete a user account. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_user");
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
