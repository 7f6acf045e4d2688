//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions, with the
//! session cookie signed by a key derived from the configured secret.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tower_sessions::cookie::Key;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::TaprytConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "tapryt_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// The store manages its own table; `migrate` creates it if missing.
///
/// # Errors
///
/// Returns `sqlx::Error` if the session table cannot be created.
pub async fn create_session_layer(
    pool: &PgPool,
    config: &TaprytConfig,
) -> Result<
    SessionManagerLayer<PostgresStore, tower_sessions::service::SignedCookie>,
    sqlx::Error,
> {
    let store = PostgresStore::new(pool.clone());
    store.migrate().await?;

    // Config validation guarantees the 32-byte minimum derive_from needs.
    let signing_key = Key::derive_from(config.session_secret.expose_secret().as_bytes());

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(signing_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_SESSION_SECRET_LENGTH;

    #[test]
    fn test_key_derivation_accepts_minimum_length_secret() {
        // derive_from panics below 32 bytes; the config minimum must stay
        // at or above that.
        let secret = "a".repeat(MIN_SESSION_SECRET_LENGTH);
        let _ = Key::derive_from(secret.as_bytes());
    }
}
