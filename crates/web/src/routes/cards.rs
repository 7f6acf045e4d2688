//! Card page controllers.
//!
//! Each handler is a short pipeline: identity check, repository fetch,
//! policy check, render. Failures map to the `AppError` taxonomy; the
//! public view path deliberately collapses every failure into not-found so
//! private cards are indistinguishable from missing ones.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tracing::instrument;

use tapryt_core::Slug;

use crate::db::{RepositoryError, cards::CardRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::forms::CardForm;
use crate::middleware::auth::{OptionalAuth, RequireAuth};
use crate::models::Card;
use crate::policy;
use crate::services::qr::{self, QrOptions};
use crate::state::AppState;

// =============================================================================
// View Models
// =============================================================================

/// Card summary for the list page.
#[derive(Clone)]
pub struct CardSummary {
    pub slug: String,
    pub display_name: String,
    pub job_title: String,
    pub is_public: bool,
    pub view_count: i64,
}

impl From<&Card> for CardSummary {
    fn from(card: &Card) -> Self {
        let display_name = card
            .profile
            .full_name
            .clone()
            .unwrap_or_else(|| card.slug.as_str().to_owned());
        Self {
            slug: card.slug.as_str().to_owned(),
            display_name,
            job_title: card.profile.job_title.clone().unwrap_or_default(),
            is_public: card.is_public,
            view_count: card.view_count,
        }
    }
}

/// Social link display data.
#[derive(Clone)]
pub struct SocialLinkView {
    pub platform: String,
    pub url: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Card list page template.
#[derive(Template, WebTemplate)]
#[template(path = "cards/list.html")]
pub struct CardListTemplate {
    pub cards: Vec<CardSummary>,
    pub user_email: String,
}

/// Public card view template.
///
/// Rendered from the fully-defaulted form model so design fields always
/// carry a concrete value for inline styling.
#[derive(Template, WebTemplate)]
#[template(path = "cards/view.html")]
pub struct CardViewTemplate {
    pub card: CardForm,
    pub social_links: Vec<SocialLinkView>,
    pub qr_data_url: String,
    pub is_owner: bool,
}

/// Card edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "cards/edit.html")]
pub struct CardEditTemplate {
    pub form: CardForm,
    pub error: Option<String>,
}

/// Card creation form template.
#[derive(Template, WebTemplate)]
#[template(path = "cards/new.html")]
pub struct CardNewTemplate {
    pub form: CardForm,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// List the signed-in user's cards.
///
/// A repository failure renders an empty list rather than an error page.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> impl IntoResponse {
    let repo = CardRepository::new(state.pool());

    let cards = match repo.get_user_cards(user.id).await {
        Ok(cards) => cards.iter().map(CardSummary::from).collect(),
        Err(e) => {
            tracing::warn!(user_id = %user.id, error = %e, "failed to list cards");
            Vec::new()
        }
    };

    CardListTemplate {
        cards,
        user_email: user.email.to_string(),
    }
}

/// Display a public card by slug, tracking the view.
///
/// # Errors
///
/// Renders the not-found page if the slug is malformed, the card doesn't
/// exist, the fetch fails, or the policy denies the view.
#[instrument(skip(state, viewer))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(slug): Path<String>,
) -> Result<Response> {
    let slug = Slug::parse(&slug).map_err(|_| AppError::NotFound(slug.clone()))?;
    let repo = CardRepository::new(state.pool());

    let card = repo
        .get_by_slug(&slug, true)
        .await
        .map_err(|_| AppError::NotFound(slug.to_string()))?;

    let viewer_id = viewer.as_ref().map(|u| u.id);
    if !policy::can_view(&card, viewer_id) {
        return Err(AppError::NotFound(slug.to_string()));
    }

    let qr_data_url = qr::to_data_url(
        &state.config().card_url(slug.as_str()),
        &QrOptions::default(),
    )
    .map_err(|e| AppError::Internal(e.to_string()))?;

    let social_links = card
        .social_links
        .iter()
        .map(|link| SocialLinkView {
            platform: link.platform.clone(),
            url: link.url.clone(),
        })
        .collect();

    Ok(CardViewTemplate {
        is_owner: policy::can_edit(&card, viewer_id),
        card: CardForm::from_card(&card),
        social_links,
        qr_data_url,
    }
    .into_response())
}

/// Display the edit form for an owned card.
///
/// # Errors
///
/// Returns not-found for an unknown slug, a fatal error for other fetch
/// failures, and redirects away when the requester is not the owner.
#[instrument(skip(state, user))]
pub async fn edit_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(slug): Path<String>,
) -> Result<Response> {
    let card = fetch_owned_card(&state, &user, &slug).await?;

    Ok(CardEditTemplate {
        form: CardForm::from_card(&card),
        error: None,
    }
    .into_response())
}

/// Save changes to an owned card.
///
/// # Errors
///
/// Same guards as [`edit_page`]; a repository failure during the update is
/// fatal.
#[instrument(skip(state, user, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(slug): Path<String>,
    Form(form): Form<CardForm>,
) -> Result<Response> {
    let card = fetch_owned_card(&state, &user, &slug).await?;

    let repo = CardRepository::new(state.pool());
    repo.update(card.id, &form.to_changes()).await?;

    tracing::info!(card_id = %card.id, slug = %card.slug, "card updated");
    Ok(Redirect::to(&format!("/cards/{}", card.slug)).into_response())
}

/// Display the card creation form.
pub async fn new_page(RequireAuth(_user): RequireAuth) -> impl IntoResponse {
    CardNewTemplate {
        form: CardForm::empty(),
        error: None,
    }
}

/// Create a new card owned by the signed-in user.
///
/// # Errors
///
/// A repository failure is fatal; an invalid or taken slug re-renders the
/// form with an inline error instead.
#[instrument(skip(state, user, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<CardForm>,
) -> Result<Response> {
    let new_card = match form.to_new_card() {
        Ok(new_card) => new_card,
        Err(e) => {
            return Ok(CardNewTemplate {
                form,
                error: Some(format!("Invalid link name: {e}")),
            }
            .into_response());
        }
    };

    let repo = CardRepository::new(state.pool());
    match repo.create(user.id, &new_card).await {
        Ok(card) => {
            tracing::info!(card_id = %card.id, slug = %card.slug, "card created");
            Ok(Redirect::to(&format!("/cards/{}", card.slug)).into_response())
        }
        Err(RepositoryError::Conflict(_)) => Ok(CardNewTemplate {
            form,
            error: Some("That link name is already taken".to_owned()),
        }
        .into_response()),
        Err(e) => Err(AppError::Database(e)),
    }
}

/// Fetch a card by slug and verify the requester owns it.
///
/// Shared guard for the edit flow: NotFound for unknown slugs, fatal for
/// other repository failures, Forbidden (redirect away) for non-owners.
async fn fetch_owned_card(
    state: &AppState,
    user: &crate::models::CurrentUser,
    slug: &str,
) -> Result<Card> {
    let slug = Slug::parse(slug).map_err(|_| AppError::NotFound(slug.to_owned()))?;
    let repo = CardRepository::new(state.pool());

    let card = repo.get_by_slug(&slug, false).await.map_err(|e| match e {
        RepositoryError::NotFound => AppError::NotFound(slug.to_string()),
        other => AppError::Database(other),
    })?;

    if !policy::can_edit(&card, Some(user.id)) {
        return Err(AppError::Forbidden(format!(
            "user {} does not own card {}",
            user.id, card.slug
        )));
    }

    Ok(card)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_with_no_cards_renders_empty_state() {
        let page = CardListTemplate {
            cards: Vec::new(),
            user_email: "alice@example.com".to_owned(),
        }
        .render()
        .unwrap();

        assert!(page.contains("You haven't created a card yet"));
        assert!(page.contains("/create-card"));
    }

    #[test]
    fn test_list_renders_card_rows() {
        let page = CardListTemplate {
            cards: vec![CardSummary {
                slug: "alice-smith".to_owned(),
                display_name: "Alice Smith".to_owned(),
                job_title: "Engineer".to_owned(),
                is_public: true,
                view_count: 7,
            }],
            user_email: "alice@example.com".to_owned(),
        }
        .render()
        .unwrap();

        assert!(page.contains("/cards/alice-smith"));
        assert!(page.contains("Alice Smith"));
        assert!(page.contains("7 views"));
        assert!(!page.contains("You haven't created a card yet"));
    }
}
