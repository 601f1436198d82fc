use crate::config::AppConfig;
use crate::db;
use crate::services::base_url;
use crate::services::logos::{fill_logo_urls, metadata_from_row, METADATA_COLUMNS};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::logo::LogoMetadata;
use rusqlite::params;
use serde_json::json;
use uuid::Uuid;

/// Handler for `GET /logos/{id}/json`: the stored metadata record with
/// rendition links.
pub async fn process(
    config: web::Data<AppConfig>,
    req: HttpRequest,
    id: web::Path<String>,
) -> impl Responder {
    let id = id.into_inner();
    if Uuid::parse_str(&id).is_err() {
        return HttpResponse::BadRequest().json(json!({"error": "invalid UUID format"}));
    }

    match load_metadata(&config, &id) {
        Ok(Some(mut meta)) => {
            fill_logo_urls(&mut meta, &base_url(&req));
            HttpResponse::Ok().json(meta)
        }
        Ok(None) => HttpResponse::NotFound().json(json!({"error": "logo not found"})),
        Err(e) => {
            log::error!("metadata lookup failed: {}", e);
            HttpResponse::InternalServerError().json(json!({"error": "database error"}))
        }
    }
}

fn load_metadata(config: &AppConfig, id: &str) -> Result<Option<LogoMetadata>, String> {
    let conn = db::open(config).map_err(|e| e.to_string())?;
    let sql = format!("SELECT {} FROM logos WHERE id = ?1", METADATA_COLUMNS);
    let mut stmt = conn.prepare(&sql).map_err(|e| e.to_string())?;

    match stmt.query_row(params![id], metadata_from_row) {
        Ok(meta) => Ok(Some(meta)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.to_string()),
    }
}
