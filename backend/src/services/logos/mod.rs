//! # Logo Asset Service Module
//!
//! Endpoints under `/logos` managing the stored renditions and their
//! metadata records.

mod delete;
mod fetch;
mod list;
mod metadata;
mod upload;

use actix_web::web::{delete as http_delete, get, post, scope};
use actix_web::Scope;
use common::model::logo::LogoMetadata;
use rusqlite::Row;

const API_PATH: &str = "/logos";

/// Configures and returns the Actix `Scope` for all logo routes.
///
/// *   **`GET /`**: list/search stored logos (`q`, `sport`, `sort`,
///     `limit`, `page`), with an in-process diacritics-tolerant
///     fallback pass when the primary match finds nothing.
/// *   **`GET /{id}?format=`**: the binary rendition, raster preferred.
/// *   **`GET /{id}/json`**: the metadata record with rendition links.
/// *   **`POST /{id}`**: multipart upload; runs the rendition pipeline
///     and upserts the metadata record.
/// *   **`DELETE /{id}`**: drop the record and both rendition files.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/{id}/json", get().to(metadata::process))
        .route("/{id}", get().to(fetch::process))
        .route("/{id}", post().to(upload::process))
        .route("/{id}", http_delete().to(delete::process))
}

/// Shared column order for metadata queries.
pub(crate) const METADATA_COLUMNS: &str = "id, club_name, club_city, club_type, club_website, \
     has_svg, has_png, primary_format, file_size_svg, file_size_png, created_at, updated_at";

/// Map one row in `METADATA_COLUMNS` order onto the API model.
pub(crate) fn metadata_from_row(row: &Row<'_>) -> rusqlite::Result<LogoMetadata> {
    Ok(LogoMetadata {
        id: row.get(0)?,
        club_name: row.get(1)?,
        club_city: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        club_type: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        club_website: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        has_svg: row.get::<_, i64>(5)? == 1,
        has_png: row.get::<_, i64>(6)? == 1,
        primary_format: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        file_size_svg: row.get::<_, Option<i64>>(8)?.unwrap_or(0),
        file_size_png: row.get::<_, Option<i64>>(9)?.unwrap_or(0),
        created_at: row.get::<_, Option<String>>(10)?.unwrap_or_default(),
        updated_at: row.get::<_, Option<String>>(11)?.unwrap_or_default(),
        ..Default::default()
    })
}

/// Fill the rendition links from the stored flags.
pub(crate) fn fill_logo_urls(meta: &mut LogoMetadata, base: &str) {
    if meta.has_png {
        meta.logo_url = format!("{}/logos/{}?format=png", base, meta.id);
        meta.logo_url_png = meta.logo_url.clone();
    } else if meta.has_svg {
        meta.logo_url = format!("{}/logos/{}?format=svg", base, meta.id);
    }
    if meta.has_svg {
        meta.logo_url_svg = format!("{}/logos/{}?format=svg", base, meta.id);
    }
}
