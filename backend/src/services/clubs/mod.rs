//! # Club Lookup Service Module
//!
//! Endpoints under `/clubs` that answer "what club is this" questions.
//! Search and detail go through the `ClubResolver` provider chain; the
//! `search-with-logos` variant queries only the local logo store.

mod get;
mod search;
mod search_with_logos;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/clubs";

/// Configures and returns the Actix `Scope` for all club routes.
///
/// *   **`GET /search?q=`**: resolver-backed club search with provider
///     fallback; `400` on a missing or empty query.
/// *   **`GET /search-with-logos?q=&sport=`**: search over the local
///     logo store, returning rendition links and a has-local-logo flag.
/// *   **`GET /{id}`**: single club detail via the provider chain;
///     `404` when no provider can resolve the identifier.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/search", get().to(search::process))
        .route("/search-with-logos", get().to(search_with_logos::process))
        .route("/{id}", get().to(get::process))
}
