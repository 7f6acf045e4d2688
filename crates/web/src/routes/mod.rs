//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Landing page
//! GET  /health                 - Health check
//!
//! # Cards
//! GET  /cards                  - List the signed-in user's cards
//! GET  /cards/{slug}           - Public card view (tracks a view)
//! GET  /cards/{slug}/edit      - Edit form (owner only)
//! POST /cards/{slug}/edit      - Save changes (owner only)
//! GET  /create-card            - Creation form
//! POST /create-card            - Create a card
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//! ```

pub mod auth;
pub mod cards;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the card routes router.
pub fn card_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cards::index))
        .route("/{slug}", get(cards::show))
        .route("/{slug}/edit", get(cards::edit_page).post(cards::update))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing page
        .route("/", get(home::home))
        // Card routes
        .nest("/cards", card_routes())
        // Creation flow
        .route("/create-card", get(cards::new_page).post(cards::create))
        // Auth routes
        .nest("/auth", auth_routes())
}
