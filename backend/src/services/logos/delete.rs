use crate::config::AppConfig;
use crate::db;
use crate::pipeline::RenditionPipeline;
use actix_web::{web, HttpResponse, Responder};
use common::model::logo::DeleteResponse;
use rusqlite::params;
use serde_json::json;
use uuid::Uuid;

/// Handler for `DELETE /logos/{id}`: drop the metadata record and both
/// rendition files. Deleting an unknown id still succeeds.
pub async fn process(
    config: web::Data<AppConfig>,
    pipeline: web::Data<RenditionPipeline>,
    id: web::Path<String>,
) -> impl Responder {
    let id = id.into_inner();
    if Uuid::parse_str(&id).is_err() {
        return HttpResponse::BadRequest().json(json!({"error": "invalid UUID format"}));
    }

    if let Err(e) = delete_record(&config, &id) {
        log::error!("delete of {} failed: {}", id, e);
        return HttpResponse::InternalServerError().json(json!({"error": "database error"}));
    }
    pipeline.remove_renditions(&id);

    HttpResponse::Ok().json(DeleteResponse { success: true, id })
}

fn delete_record(config: &AppConfig, id: &str) -> Result<(), String> {
    let conn = db::open(config).map_err(|e| e.to_string())?;
    conn.execute("DELETE FROM logos WHERE id = ?1", params![id])
        .map_err(|e| e.to_string())?;
    Ok(())
}
