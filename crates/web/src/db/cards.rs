//! Card repository for database operations.
//!
//! Slug-based lookup, per-user listing, and create/update mutations.
//! Row types map by column name via `FromRow`; the repository owns the
//! row-to-domain conversion and validates stored slugs on the way out.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use tapryt_core::{CardId, Slug, SocialLinkId, UserId};

use super::RepositoryError;
use crate::models::{Card, CardChanges, CardDesign, CardProfile, NewCard, NewSocialLink, SocialLink};

/// Column list shared by every card query. Order matches [`CardRow`].
const CARD_COLUMNS: &str = "id, slug, owner_id, is_public, \
     full_name, job_title, company, email, phone, website, address, bio, title, profile_image, \
     theme, primary_color, secondary_color, background_color, text_color, border_color, \
     font_family, font_size, border_radius, border_width, \
     shadow_intensity, background_pattern, gradient_direction, card_shape, layout, \
     view_count, created_at, updated_at";

/// Database row for a card.
#[derive(Debug, sqlx::FromRow)]
struct CardRow {
    id: i32,
    slug: String,
    owner_id: i32,
    is_public: bool,
    full_name: Option<String>,
    job_title: Option<String>,
    company: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    address: Option<String>,
    bio: Option<String>,
    title: Option<String>,
    profile_image: Option<String>,
    theme: Option<String>,
    primary_color: Option<String>,
    secondary_color: Option<String>,
    background_color: Option<String>,
    text_color: Option<String>,
    border_color: Option<String>,
    font_family: Option<String>,
    font_size: Option<i32>,
    border_radius: Option<i32>,
    border_width: Option<i32>,
    shadow_intensity: Option<String>,
    background_pattern: Option<String>,
    gradient_direction: Option<String>,
    card_shape: Option<String>,
    layout: Option<String>,
    view_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CardRow {
    /// Convert a row into the domain type, attaching its social links.
    fn into_card(self, social_links: Vec<SocialLink>) -> Result<Card, RepositoryError> {
        let slug = Slug::parse(&self.slug).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid slug in database: {e}"))
        })?;

        Ok(Card {
            id: CardId::new(self.id),
            slug,
            owner_id: UserId::new(self.owner_id),
            is_public: self.is_public,
            profile: CardProfile {
                full_name: self.full_name,
                job_title: self.job_title,
                company: self.company,
                email: self.email,
                phone: self.phone,
                website: self.website,
                address: self.address,
                bio: self.bio,
                title: self.title,
                profile_image: self.profile_image,
            },
            design: CardDesign {
                theme: self.theme,
                primary_color: self.primary_color,
                secondary_color: self.secondary_color,
                background_color: self.background_color,
                text_color: self.text_color,
                border_color: self.border_color,
                font_family: self.font_family,
                font_size: self.font_size,
                border_radius: self.border_radius,
                border_width: self.border_width,
                shadow_intensity: self.shadow_intensity,
                background_pattern: self.background_pattern,
                gradient_direction: self.gradient_direction,
                card_shape: self.card_shape,
                layout: self.layout,
            },
            view_count: self.view_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
            social_links,
        })
    }
}

/// Database row for a social link.
#[derive(Debug, sqlx::FromRow)]
struct SocialLinkRow {
    id: i32,
    card_id: i32,
    platform: String,
    url: String,
    position: i32,
}

impl From<SocialLinkRow> for SocialLink {
    fn from(row: SocialLinkRow) -> Self {
        Self {
            id: SocialLinkId::new(row.id),
            card_id: CardId::new(row.card_id),
            platform: row.platform,
            url: row.url,
            position: row.position,
        }
    }
}

/// Repository for card database operations.
pub struct CardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CardRepository<'a> {
    /// Create a new card repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a card by its slug, including its social links.
    ///
    /// When `track_view` is set, the card's view counter is incremented as a
    /// best-effort side effect: a counter failure is logged and never fails
    /// the lookup.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no card has this slug.
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_by_slug(
        &self,
        slug: &Slug,
        track_view: bool,
    ) -> Result<Card, RepositoryError> {
        let sql = format!("SELECT {CARD_COLUMNS} FROM cards WHERE slug = $1");
        let row = sqlx::query_as::<_, CardRow>(&sql)
            .bind(slug.as_str())
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        if track_view {
            let result = sqlx::query("UPDATE cards SET view_count = view_count + 1 WHERE id = $1")
                .bind(row.id)
                .execute(self.pool)
                .await;
            if let Err(e) = result {
                tracing::warn!(card_id = row.id, error = %e, "failed to track card view");
            }
        }

        let links = self.get_links(row.id).await?;
        row.into_card(links)
    }

    /// Get all cards owned by a user, newest first, including social links.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_user_cards(&self, owner_id: UserId) -> Result<Vec<Card>, RepositoryError> {
        let sql = format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE owner_id = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, CardRow>(&sql)
            .bind(owner_id.as_i32())
            .fetch_all(self.pool)
            .await?;

        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let link_rows = sqlx::query_as::<_, SocialLinkRow>(
            "SELECT id, card_id, platform, url, position \
             FROM card_social_links WHERE card_id = ANY($1) ORDER BY position ASC",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let mut links_by_card: HashMap<i32, Vec<SocialLink>> = HashMap::new();
        for link in link_rows {
            links_by_card
                .entry(link.card_id)
                .or_default()
                .push(link.into());
        }

        let mut cards = Vec::with_capacity(rows.len());
        for row in rows {
            let links = links_by_card.remove(&row.id).unwrap_or_default();
            cards.push(row.into_card(links)?);
        }

        Ok(cards)
    }

    /// Create a new card owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, owner_id: UserId, card: &NewCard) -> Result<Card, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO cards (slug, owner_id, is_public, \
                full_name, job_title, company, email, phone, website, address, bio, title, profile_image, \
                theme, primary_color, secondary_color, background_color, text_color, border_color, \
                font_family, font_size, border_radius, border_width, \
                shadow_intensity, background_pattern, gradient_direction, card_shape, layout) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, \
                $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28) \
             RETURNING {CARD_COLUMNS}"
        );

        let row = bind_card_fields(
            sqlx::query_as::<_, CardRow>(&sql)
                .bind(card.slug.as_str())
                .bind(owner_id.as_i32())
                .bind(card.is_public),
            &card.profile,
            &card.design,
        )
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("slug already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        let links = insert_links(&mut tx, row.id, &card.social_links).await?;

        tx.commit().await?;

        row.into_card(links)
    }

    /// Apply changes to an existing card, replacing its social links.
    ///
    /// The slug is immutable; callers are expected to have verified
    /// ownership before mutating.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the card doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        card_id: CardId,
        changes: &CardChanges,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "UPDATE cards SET is_public = $2, \
                full_name = $3, job_title = $4, company = $5, email = $6, phone = $7, \
                website = $8, address = $9, bio = $10, title = $11, profile_image = $12, \
                theme = $13, primary_color = $14, secondary_color = $15, \
                background_color = $16, text_color = $17, border_color = $18, \
                font_family = $19, font_size = $20, border_radius = $21, border_width = $22, \
                shadow_intensity = $23, background_pattern = $24, gradient_direction = $25, \
                card_shape = $26, layout = $27, updated_at = now() \
             WHERE id = $1 \
             RETURNING {CARD_COLUMNS}"
        );

        bind_card_fields(
            sqlx::query_as::<_, CardRow>(&sql)
                .bind(card_id.as_i32())
                .bind(changes.is_public),
            &changes.profile,
            &changes.design,
        )
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        sqlx::query("DELETE FROM card_social_links WHERE card_id = $1")
            .bind(card_id.as_i32())
            .execute(&mut *tx)
            .await?;
        insert_links(&mut tx, card_id.as_i32(), &changes.social_links).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Fetch the ordered social links for one card.
    async fn get_links(&self, card_id: i32) -> Result<Vec<SocialLink>, RepositoryError> {
        let rows = sqlx::query_as::<_, SocialLinkRow>(
            "SELECT id, card_id, platform, url, position \
             FROM card_social_links WHERE card_id = $1 ORDER BY position ASC",
        )
        .bind(card_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(SocialLink::from).collect())
    }
}

/// Bind profile and design fields in the shared column order.
fn bind_card_fields<'q, O>(
    query: sqlx::query::QueryAs<'q, Postgres, O, sqlx::postgres::PgArguments>,
    profile: &'q CardProfile,
    design: &'q CardDesign,
) -> sqlx::query::QueryAs<'q, Postgres, O, sqlx::postgres::PgArguments> {
    query
        .bind(profile.full_name.as_deref())
        .bind(profile.job_title.as_deref())
        .bind(profile.company.as_deref())
        .bind(profile.email.as_deref())
        .bind(profile.phone.as_deref())
        .bind(profile.website.as_deref())
        .bind(profile.address.as_deref())
        .bind(profile.bio.as_deref())
        .bind(profile.title.as_deref())
        .bind(profile.profile_image.as_deref())
        .bind(design.theme.as_deref())
        .bind(design.primary_color.as_deref())
        .bind(design.secondary_color.as_deref())
        .bind(design.background_color.as_deref())
        .bind(design.text_color.as_deref())
        .bind(design.border_color.as_deref())
        .bind(design.font_family.as_deref())
        .bind(design.font_size)
        .bind(design.border_radius)
        .bind(design.border_width)
        .bind(design.shadow_intensity.as_deref())
        .bind(design.background_pattern.as_deref())
        .bind(design.gradient_direction.as_deref())
        .bind(design.card_shape.as_deref())
        .bind(design.layout.as_deref())
}

/// Insert social links for a card, positions assigned from iteration order.
async fn insert_links(
    tx: &mut Transaction<'_, Postgres>,
    card_id: i32,
    links: &[NewSocialLink],
) -> Result<Vec<SocialLink>, RepositoryError> {
    let mut inserted = Vec::with_capacity(links.len());
    for (position, link) in links.iter().enumerate() {
        let position = i32::try_from(position)
            .map_err(|_| RepositoryError::Conflict("too many social links".to_owned()))?;
        let row = sqlx::query_as::<_, SocialLinkRow>(
            "INSERT INTO card_social_links (card_id, platform, url, position) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, card_id, platform, url, position",
        )
        .bind(card_id)
        .bind(&link.platform)
        .bind(&link.url)
        .bind(position)
        .fetch_one(&mut **tx)
        .await?;
        inserted.push(row.into());
    }
    Ok(inserted)
}
