//! CLI command implementations.

pub mod migrate;
pub mod seed;

/// Resolve the database connection string from the environment.
///
/// Prefers `TAPRYT_DATABASE_URL`, falling back to `DATABASE_URL`, and
/// loads `.env` first if one is present.
pub fn database_url() -> Result<String, MissingDatabaseUrl> {
    dotenvy::dotenv().ok();

    std::env::var("TAPRYT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| MissingDatabaseUrl)
}

#[derive(Debug, thiserror::Error)]
#[error("Missing environment variable: TAPRYT_DATABASE_URL (or DATABASE_URL)")]
pub struct MissingDatabaseUrl;
