//! User domain types.

use chrono::{DateTime, Utc};

use tapryt_core::{Email, UserId};

/// A TapRyt user (domain type).
///
/// The argon2 password hash lives only in the database and in the auth
/// service; it is never part of the domain type.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
