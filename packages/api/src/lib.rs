// ABOUTME: HTTP API layer for Letterhead providing REST endpoints and routing
// ABOUTME: Integration layer that depends on the domain packages

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use letterhead_documents::DbState;

pub mod auth;
pub mod categories_handlers;
pub mod documents_handlers;
pub mod letter_types_handlers;
pub mod response;
pub mod users_handlers;
pub mod verification_handlers;

/// Creates the documents API router
pub fn create_documents_router() -> Router<DbState> {
    Router::new()
        .route("/", get(documents_handlers::list_documents))
        .route("/", post(documents_handlers::create_document))
        .route("/{id}", get(documents_handlers::get_document))
        .route("/{id}", put(documents_handlers::update_document))
        .route("/{id}", delete(documents_handlers::delete_document))
        .route("/{id}/status", post(documents_handlers::transition_status))
        .route("/import", post(documents_handlers::import_documents))
}

/// Creates the categories API router
pub fn create_categories_router() -> Router<DbState> {
    Router::new()
        .route("/", get(categories_handlers::list_categories))
        .route("/", post(categories_handlers::create_category))
        .route("/{id}", get(categories_handlers::get_category))
        .route("/{id}", put(categories_handlers::update_category))
        .route("/{id}", delete(categories_handlers::delete_category))
        .route(
            "/{id}/letter-types",
            get(categories_handlers::list_category_letter_types),
        )
}

/// Creates the letter types API router
pub fn create_letter_types_router() -> Router<DbState> {
    Router::new()
        .route("/", get(letter_types_handlers::list_letter_types))
        .route("/", post(letter_types_handlers::create_letter_type))
        .route("/{id}", get(letter_types_handlers::get_letter_type))
        .route("/{id}", put(letter_types_handlers::update_letter_type))
        .route("/{id}", delete(letter_types_handlers::delete_letter_type))
}

/// Creates the public verification router (no authentication)
pub fn create_verification_router() -> Router<DbState> {
    Router::new()
        .route("/", get(verification_handlers::verify_by_letter_number))
        .route("/", post(verification_handlers::verify_details))
}

/// Creates the users API router
pub fn create_users_router() -> Router<DbState> {
    Router::new()
        .route("/", get(users_handlers::list_users))
        .route("/", post(users_handlers::create_user))
        .route("/{id}", get(users_handlers::get_user))
        .route("/{id}", delete(users_handlers::delete_user))
}
