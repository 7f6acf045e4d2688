//! Card domain types.

use chrono::{DateTime, Utc};

use tapryt_core::{CardId, Slug, SocialLinkId, UserId};

/// A digital business card (domain type).
///
/// Every optional field stores exactly what the owner entered; defaults for
/// absent design values are applied at form-load time only, never at
/// storage time.
#[derive(Debug, Clone)]
pub struct Card {
    /// Unique card ID.
    pub id: CardId,
    /// Unique human-readable lookup key, used in public URLs.
    pub slug: Slug,
    /// The identity that created the card. Exactly one owner.
    pub owner_id: UserId,
    /// Whether anonymous and non-owner visitors may view the card.
    pub is_public: bool,
    /// Free-text profile fields.
    pub profile: CardProfile,
    /// Visual design attributes.
    pub design: CardDesign,
    /// Number of tracked public views.
    pub view_count: i64,
    /// When the card was created.
    pub created_at: DateTime<Utc>,
    /// When the card was last updated.
    pub updated_at: DateTime<Utc>,
    /// Ordered social links owned by this card.
    pub social_links: Vec<SocialLink>,
}

/// Free-text profile fields of a card. All optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardProfile {
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub title: Option<String>,
    pub profile_image: Option<String>,
}

/// Visual design attributes of a card. All optional; see
/// [`crate::forms::defaults`] for the literals substituted at form load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDesign {
    pub theme: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub border_color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<i32>,
    pub border_radius: Option<i32>,
    pub border_width: Option<i32>,
    pub shadow_intensity: Option<String>,
    pub background_pattern: Option<String>,
    pub gradient_direction: Option<String>,
    pub card_shape: Option<String>,
    pub layout: Option<String>,
}

/// An ordered social link owned by a card.
#[derive(Debug, Clone)]
pub struct SocialLink {
    /// Database ID of this link.
    pub id: SocialLinkId,
    /// Card that owns this link.
    pub card_id: CardId,
    /// Platform name (e.g. "linkedin").
    pub platform: String,
    /// Link target.
    pub url: String,
    /// Zero-based ordering position within the card.
    pub position: i32,
}

/// Data for creating a new card.
#[derive(Debug, Clone)]
pub struct NewCard {
    pub slug: Slug,
    pub is_public: bool,
    pub profile: CardProfile,
    pub design: CardDesign,
    pub social_links: Vec<NewSocialLink>,
}

/// Changes to apply to an existing card. The slug is immutable after
/// creation; only the owner may apply changes.
#[derive(Debug, Clone)]
pub struct CardChanges {
    pub is_public: bool,
    pub profile: CardProfile,
    pub design: CardDesign,
    pub social_links: Vec<NewSocialLink>,
}

/// A social link not yet persisted (no ID, position implied by order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSocialLink {
    pub platform: String,
    pub url: String,
}
