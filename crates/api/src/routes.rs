//! Route-Definitionen fuer die REST-API (/api/...)

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Erstellt den vollstaendigen /api/-Router
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Konten
        .route("/api/auth/signup", post(handlers::auth::signup))
        .route("/api/auth/login", post(handlers::auth::login))
        // Saucen
        .route(
            "/api/sauces",
            get(handlers::sauces::list_sauces).post(handlers::sauces::create_sauce),
        )
        .route(
            "/api/sauces/:id",
            get(handlers::sauces::get_sauce)
                .put(handlers::sauces::update_sauce)
                .delete(handlers::sauces::delete_sauce),
        )
        // Abstimmung
        .route("/api/sauces/:id/like", post(handlers::sauces::like_sauce))
}
