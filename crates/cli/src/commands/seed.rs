//! Database seeding command.
//!
//! Creates a demo user and a public demo card so a fresh install has
//! something to look at. Re-running against an already-seeded database
//! is a no-op for rows that exist.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use tapryt_core::{Email, EmailError, Slug, SlugError};

const DEMO_SLUG: &str = "demo-card";

/// Seed the database with a demo user and card.
///
/// # Errors
///
/// Returns `SeedError` if the connection string is missing, the email
/// is invalid, hashing fails, or a query fails.
pub async fn run(email: &str, password: &str) -> Result<(), SeedError> {
    let database_url = super::database_url()?;
    let email = Email::parse(email)?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| SeedError::PasswordHash)?
        .to_string();

    let user_id: i32 = sqlx::query_scalar(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2) \
         ON CONFLICT (email) DO UPDATE SET updated_at = now() \
         RETURNING id",
    )
    .bind(email.as_str())
    .bind(&password_hash)
    .fetch_one(&pool)
    .await?;

    tracing::info!(%email, user_id, "Seeded demo user");

    let slug = Slug::parse(DEMO_SLUG)?;
    let inserted = sqlx::query(
        "INSERT INTO cards (slug, owner_id, is_public, full_name, job_title, company, bio) \
         VALUES ($1, $2, TRUE, 'Demo User', 'Product Designer', 'TapRyt', \
                 'This is a seeded demo card.') \
         ON CONFLICT (slug) DO NOTHING",
    )
    .bind(slug.as_str())
    .bind(user_id)
    .execute(&pool)
    .await?;

    if inserted.rows_affected() > 0 {
        sqlx::query(
            "INSERT INTO card_social_links (card_id, platform, url, position) \
             SELECT id, 'github', 'https://github.com/tapryt', 0 FROM cards WHERE slug = $1",
        )
        .bind(slug.as_str())
        .execute(&pool)
        .await?;
        tracing::info!(slug = DEMO_SLUG, "Seeded demo card");
    } else {
        tracing::info!(slug = DEMO_SLUG, "Demo card already exists, skipping");
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    MissingEnvVar(#[from] super::MissingDatabaseUrl),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid slug: {0}")]
    InvalidSlug(#[from] SlugError),

    #[error("Failed to hash password")]
    PasswordHash,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
