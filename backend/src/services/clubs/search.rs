use crate::error::ResolveError;
use crate::resolver::ClubResolver;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Handler for `GET /clubs/search?q=`.
///
/// Never fails for a non-empty query: provider outages degrade to the
/// static catalog inside the resolver.
pub async fn process(
    resolver: web::Data<ClubResolver>,
    params: web::Query<SearchParams>,
) -> impl Responder {
    match resolver.search(&params.q).await {
        Ok(clubs) => HttpResponse::Ok().json(clubs),
        Err(ResolveError::EmptyQuery) => HttpResponse::BadRequest()
            .json(json!({"error": "query parameter 'q' is required"})),
        Err(ResolveError::NotFound) => {
            HttpResponse::NotFound().json(json!({"error": "club not found"}))
        }
    }
}
