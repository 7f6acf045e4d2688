//! Domain models for TapRyt.
//!
//! Domain types are kept separate from database row types; the repositories
//! in [`crate::db`] own the mapping between the two.

pub mod card;
pub mod session;
pub mod user;

pub use card::{Card, CardChanges, CardDesign, CardProfile, NewCard, NewSocialLink, SocialLink};
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
