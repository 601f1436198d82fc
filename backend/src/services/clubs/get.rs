use crate::error::ResolveError;
use crate::resolver::ClubResolver;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// Handler for `GET /clubs/{id}`.
///
/// Walks the provider chain; transport failures are absorbed and only
/// full exhaustion becomes a `404`.
pub async fn process(
    resolver: web::Data<ClubResolver>,
    id: web::Path<String>,
) -> impl Responder {
    match resolver.resolve_by_id(&id).await {
        Ok(club) => HttpResponse::Ok().json(club),
        Err(ResolveError::EmptyQuery) => {
            HttpResponse::BadRequest().json(json!({"error": "club ID is required"}))
        }
        Err(ResolveError::NotFound) => {
            HttpResponse::NotFound().json(json!({"error": "club not found"}))
        }
    }
}
