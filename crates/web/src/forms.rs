//! Form defaulting for the card edit and create pages.
//!
//! [`CardForm`] is both the template model for the card form and the POST
//! body it submits. Mapping a stored card into a form is total: every absent
//! optional field is substituted with a fixed literal from [`defaults`]
//! (profile fields default to the empty string). Defaults are applied at
//! form-load time only; they are never written back unless the user saves
//! the form.

use serde::Deserialize;

use crate::models::{Card, CardChanges, CardDesign, CardProfile, NewCard, NewSocialLink};
use tapryt_core::Slug;

/// Fixed literal defaults for absent design attributes.
pub mod defaults {
    pub const THEME: &str = "modern";
    pub const PRIMARY_COLOR: &str = "#3B82F6";
    pub const SECONDARY_COLOR: &str = "#8B5CF6";
    pub const BACKGROUND_COLOR: &str = "#FFFFFF";
    pub const TEXT_COLOR: &str = "#1F2937";
    pub const BORDER_COLOR: &str = "#E5E7EB";
    pub const FONT_FAMILY: &str = "Inter";
    pub const FONT_SIZE: i32 = 16;
    pub const BORDER_RADIUS: i32 = 12;
    pub const BORDER_WIDTH: i32 = 1;
    pub const SHADOW_INTENSITY: &str = "medium";
    pub const BACKGROUND_PATTERN: &str = "none";
    pub const GRADIENT_DIRECTION: &str = "to-right";
    pub const CARD_SHAPE: &str = "rounded";
    pub const LAYOUT: &str = "standard";
}

/// Social platforms exposed as named inputs on the card form, in display
/// and storage order.
pub const FORM_PLATFORMS: [&str; 4] = ["linkedin", "twitter", "github", "instagram"];

/// A fully-populated card form.
///
/// Numeric design fields travel as strings (HTML form values); they are
/// re-parsed on save and unparsable values are treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CardForm {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub is_public: bool,

    // Profile
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub profile_image: String,

    // Design
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub primary_color: String,
    #[serde(default)]
    pub secondary_color: String,
    #[serde(default)]
    pub background_color: String,
    #[serde(default)]
    pub text_color: String,
    #[serde(default)]
    pub border_color: String,
    #[serde(default)]
    pub font_family: String,
    #[serde(default)]
    pub font_size: String,
    #[serde(default)]
    pub border_radius: String,
    #[serde(default)]
    pub border_width: String,
    #[serde(default)]
    pub shadow_intensity: String,
    #[serde(default)]
    pub background_pattern: String,
    #[serde(default)]
    pub gradient_direction: String,
    #[serde(default)]
    pub card_shape: String,
    #[serde(default)]
    pub layout: String,

    // Social links
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub instagram: String,
}

impl CardForm {
    /// An empty creation form: no profile data, default design values.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            slug: String::new(),
            is_public: true,
            full_name: String::new(),
            job_title: String::new(),
            company: String::new(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
            address: String::new(),
            bio: String::new(),
            title: String::new(),
            profile_image: String::new(),
            theme: defaults::THEME.to_owned(),
            primary_color: defaults::PRIMARY_COLOR.to_owned(),
            secondary_color: defaults::SECONDARY_COLOR.to_owned(),
            background_color: defaults::BACKGROUND_COLOR.to_owned(),
            text_color: defaults::TEXT_COLOR.to_owned(),
            border_color: defaults::BORDER_COLOR.to_owned(),
            font_family: defaults::FONT_FAMILY.to_owned(),
            font_size: defaults::FONT_SIZE.to_string(),
            border_radius: defaults::BORDER_RADIUS.to_string(),
            border_width: defaults::BORDER_WIDTH.to_string(),
            shadow_intensity: defaults::SHADOW_INTENSITY.to_owned(),
            background_pattern: defaults::BACKGROUND_PATTERN.to_owned(),
            gradient_direction: defaults::GRADIENT_DIRECTION.to_owned(),
            card_shape: defaults::CARD_SHAPE.to_owned(),
            layout: defaults::LAYOUT.to_owned(),
            linkedin: String::new(),
            twitter: String::new(),
            github: String::new(),
            instagram: String::new(),
        }
    }

    /// Map a stored card into a fully-populated form.
    ///
    /// Total and side-effect free: absent design fields become their
    /// [`defaults`] literal, absent profile fields become empty strings.
    /// Applying this twice (save then reload) yields the same form.
    #[must_use]
    pub fn from_card(card: &Card) -> Self {
        let p = &card.profile;
        let d = &card.design;
        Self {
            slug: card.slug.as_str().to_owned(),
            is_public: card.is_public,
            full_name: text(&p.full_name),
            job_title: text(&p.job_title),
            company: text(&p.company),
            email: text(&p.email),
            phone: text(&p.phone),
            website: text(&p.website),
            address: text(&p.address),
            bio: text(&p.bio),
            title: text(&p.title),
            profile_image: text(&p.profile_image),
            theme: text_or(&d.theme, defaults::THEME),
            primary_color: text_or(&d.primary_color, defaults::PRIMARY_COLOR),
            secondary_color: text_or(&d.secondary_color, defaults::SECONDARY_COLOR),
            background_color: text_or(&d.background_color, defaults::BACKGROUND_COLOR),
            text_color: text_or(&d.text_color, defaults::TEXT_COLOR),
            border_color: text_or(&d.border_color, defaults::BORDER_COLOR),
            font_family: text_or(&d.font_family, defaults::FONT_FAMILY),
            font_size: number_or(d.font_size, defaults::FONT_SIZE),
            border_radius: number_or(d.border_radius, defaults::BORDER_RADIUS),
            border_width: number_or(d.border_width, defaults::BORDER_WIDTH),
            shadow_intensity: text_or(&d.shadow_intensity, defaults::SHADOW_INTENSITY),
            background_pattern: text_or(&d.background_pattern, defaults::BACKGROUND_PATTERN),
            gradient_direction: text_or(&d.gradient_direction, defaults::GRADIENT_DIRECTION),
            card_shape: text_or(&d.card_shape, defaults::CARD_SHAPE),
            layout: text_or(&d.layout, defaults::LAYOUT),
            linkedin: platform_url(card, "linkedin"),
            twitter: platform_url(card, "twitter"),
            github: platform_url(card, "github"),
            instagram: platform_url(card, "instagram"),
        }
    }

    /// Convert a submitted form into creation data.
    ///
    /// # Errors
    ///
    /// Returns `SlugError` if the submitted slug is invalid.
    pub fn to_new_card(&self) -> Result<NewCard, tapryt_core::SlugError> {
        let slug = Slug::parse(self.slug.trim())?;
        Ok(NewCard {
            slug,
            is_public: self.is_public,
            profile: self.profile(),
            design: self.design(),
            social_links: self.social_links(),
        })
    }

    /// Convert a submitted form into changes for an existing card.
    #[must_use]
    pub fn to_changes(&self) -> CardChanges {
        CardChanges {
            is_public: self.is_public,
            profile: self.profile(),
            design: self.design(),
            social_links: self.social_links(),
        }
    }

    fn profile(&self) -> CardProfile {
        CardProfile {
            full_name: opt(&self.full_name),
            job_title: opt(&self.job_title),
            company: opt(&self.company),
            email: opt(&self.email),
            phone: opt(&self.phone),
            website: opt(&self.website),
            address: opt(&self.address),
            bio: opt(&self.bio),
            title: opt(&self.title),
            profile_image: opt(&self.profile_image),
        }
    }

    fn design(&self) -> CardDesign {
        CardDesign {
            theme: opt(&self.theme),
            primary_color: opt(&self.primary_color),
            secondary_color: opt(&self.secondary_color),
            background_color: opt(&self.background_color),
            text_color: opt(&self.text_color),
            border_color: opt(&self.border_color),
            font_family: opt(&self.font_family),
            font_size: opt_number(&self.font_size),
            border_radius: opt_number(&self.border_radius),
            border_width: opt_number(&self.border_width),
            shadow_intensity: opt(&self.shadow_intensity),
            background_pattern: opt(&self.background_pattern),
            gradient_direction: opt(&self.gradient_direction),
            card_shape: opt(&self.card_shape),
            layout: opt(&self.layout),
        }
    }

    fn social_links(&self) -> Vec<NewSocialLink> {
        let values = [&self.linkedin, &self.twitter, &self.github, &self.instagram];
        FORM_PLATFORMS
            .iter()
            .zip(values)
            .filter_map(|(platform, value)| {
                let url = value.trim();
                (!url.is_empty()).then(|| NewSocialLink {
                    platform: (*platform).to_owned(),
                    url: url.to_owned(),
                })
            })
            .collect()
    }
}

/// The URL the card stores for a named platform, or empty.
fn platform_url(card: &Card, platform: &str) -> String {
    card.social_links
        .iter()
        .find(|link| link.platform == platform)
        .map(|link| link.url.clone())
        .unwrap_or_default()
}

/// Absent option to empty string.
fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Absent option to a default literal.
fn text_or(value: &Option<String>, default: &str) -> String {
    value
        .clone()
        .unwrap_or_else(|| default.to_owned())
}

/// Absent number to a default literal, rendered as a form value.
fn number_or(value: Option<i32>, default: i32) -> String {
    value.unwrap_or(default).to_string()
}

/// Empty or whitespace-only form value to absent.
fn opt(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Numeric form value to absent when empty or unparsable.
fn opt_number(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use tapryt_core::{CardId, UserId};

    use super::*;

    fn bare_card() -> Card {
        Card {
            id: CardId::new(1),
            slug: Slug::parse("alice-smith").unwrap(),
            owner_id: UserId::new(1),
            is_public: true,
            profile: CardProfile::default(),
            design: CardDesign::default(),
            view_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            social_links: Vec::new(),
        }
    }

    #[test]
    fn test_bare_card_gets_exact_default_literals() {
        let form = CardForm::from_card(&bare_card());

        assert_eq!(form.theme, "modern");
        assert_eq!(form.primary_color, "#3B82F6");
        assert_eq!(form.secondary_color, "#8B5CF6");
        assert_eq!(form.background_color, "#FFFFFF");
        assert_eq!(form.text_color, "#1F2937");
        assert_eq!(form.border_color, "#E5E7EB");
        assert_eq!(form.font_family, "Inter");
        assert_eq!(form.font_size, "16");
        assert_eq!(form.border_radius, "12");
        assert_eq!(form.border_width, "1");
        assert_eq!(form.shadow_intensity, "medium");
        assert_eq!(form.background_pattern, "none");
        assert_eq!(form.gradient_direction, "to-right");
        assert_eq!(form.card_shape, "rounded");
        assert_eq!(form.layout, "standard");
    }

    #[test]
    fn test_bare_card_profile_fields_empty() {
        let form = CardForm::from_card(&bare_card());
        assert_eq!(form.full_name, "");
        assert_eq!(form.bio, "");
        assert_eq!(form.profile_image, "");
        assert_eq!(form.slug, "alice-smith");
        assert!(form.is_public);
    }

    #[test]
    fn test_stored_values_win_over_defaults() {
        let mut card = bare_card();
        card.design.theme = Some("minimal".to_owned());
        card.design.font_size = Some(20);
        card.profile.full_name = Some("Alice Smith".to_owned());

        let form = CardForm::from_card(&card);
        assert_eq!(form.theme, "minimal");
        assert_eq!(form.font_size, "20");
        assert_eq!(form.full_name, "Alice Smith");
    }

    #[test]
    fn test_defaulting_is_idempotent_across_save_and_reload() {
        let mut card = bare_card();
        card.profile.job_title = Some("Engineer".to_owned());

        // Load the form, save it unchanged, reload the form.
        let first = CardForm::from_card(&card);
        let changes = first.to_changes();
        card.is_public = changes.is_public;
        card.profile = changes.profile;
        card.design = changes.design;
        let second = CardForm::from_card(&card);

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_form_matches_defaults() {
        let form = CardForm::empty();
        assert_eq!(form.theme, defaults::THEME);
        assert_eq!(form.font_size, defaults::FONT_SIZE.to_string());
        assert_eq!(form.full_name, "");
        assert_eq!(form.slug, "");
    }

    #[test]
    fn test_to_new_card_validates_slug() {
        let mut form = CardForm::empty();
        form.slug = "Not A Slug".to_owned();
        assert!(form.to_new_card().is_err());

        form.slug = "alice-smith".to_owned();
        let new_card = form.to_new_card().unwrap();
        assert_eq!(new_card.slug.as_str(), "alice-smith");
    }

    #[test]
    fn test_empty_fields_stored_as_absent() {
        let mut form = CardForm::empty();
        form.full_name = "   ".to_owned();
        form.font_size = "not-a-number".to_owned();
        form.theme = String::new();

        let changes = form.to_changes();
        assert_eq!(changes.profile.full_name, None);
        assert_eq!(changes.design.font_size, None);
        assert_eq!(changes.design.theme, None);
    }

    #[test]
    fn test_social_links_collected_in_platform_order() {
        let mut form = CardForm::empty();
        form.github = "https://github.com/alice".to_owned();
        form.linkedin = "https://linkedin.com/in/alice".to_owned();

        let links = form.to_changes().social_links;
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].platform, "linkedin");
        assert_eq!(links[1].platform, "github");
    }

    #[test]
    fn test_social_links_roundtrip_into_form() {
        use crate::models::SocialLink;
        use tapryt_core::SocialLinkId;

        let mut card = bare_card();
        card.social_links = vec![SocialLink {
            id: SocialLinkId::new(1),
            card_id: card.id,
            platform: "twitter".to_owned(),
            url: "https://twitter.com/alice".to_owned(),
            position: 0,
        }];

        let form = CardForm::from_card(&card);
        assert_eq!(form.twitter, "https://twitter.com/alice");
        assert_eq!(form.linkedin, "");
    }
}
