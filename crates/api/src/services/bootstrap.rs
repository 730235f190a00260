//! Admin bootstrap.
//!
//! On a fresh install the users table is empty and nobody can log in.
//! This creates an initial super admin from configured credentials. When
//! no password is configured, a random one is generated and logged once.

use anyhow::{Context, Result};
use persistence::repositories::UserRepository;
use rand::distributions::Alphanumeric;
use rand::Rng;
use shared::password::hash_password;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::AuthConfig;

const GENERATED_PASSWORD_LEN: usize = 20;

/// Create the initial super admin account when no users exist.
pub async fn ensure_initial_admin(pool: &PgPool, auth: &AuthConfig) -> Result<()> {
    let repo = UserRepository::new(pool.clone());

    let count = repo.count().await.context("counting users")?;
    if count > 0 {
        return Ok(());
    }

    let (password, generated) = if auth.bootstrap_password.is_empty() {
        (generate_password(), true)
    } else {
        (auth.bootstrap_password.clone(), false)
    };

    let hash = hash_password(&password).context("hashing bootstrap password")?;

    let user = repo
        .create(
            &auth.bootstrap_email,
            "Administrator",
            &hash,
            "super_admin",
            None,
            None,
            "alive",
        )
        .await
        .context("creating bootstrap admin")?;

    if generated {
        // Logged exactly once; change it after first login.
        warn!(
            email = %user.email,
            password = %password,
            "created initial super admin with a generated password"
        );
    } else {
        info!(email = %user.email, "created initial super admin");
    }

    Ok(())
}

fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LEN)
        .map(char::from)
        .collect()
}
