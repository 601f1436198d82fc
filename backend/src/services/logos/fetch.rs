use crate::pipeline::RenditionPipeline;
use actix_web::{web, HttpResponse, Responder};
use common::model::logo::LogoFormat;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct Params {
    /// Explicit rendition preference, `"svg"` or `"png"`.
    #[serde(default)]
    format: String,
}

/// Handler for `GET /logos/{id}?format=`.
///
/// Streams the binary rendition, raster preferred, with a one-year
/// cache directive. The content type follows the rendition served.
pub async fn process(
    pipeline: web::Data<RenditionPipeline>,
    id: web::Path<String>,
    params: web::Query<Params>,
) -> impl Responder {
    let id = id.into_inner();
    if Uuid::parse_str(&id).is_err() {
        return HttpResponse::BadRequest().json(json!({"error": "invalid UUID format"}));
    }

    let want = params.format.to_lowercase();

    if want.is_empty() || want == "png" {
        let path = pipeline.png_path(&id);
        if let Ok(bytes) = std::fs::read(&path) {
            return rendition_response(LogoFormat::Png, bytes);
        }
    }

    if want.is_empty() || want == "svg" {
        let path = pipeline.svg_path(&id);
        if let Ok(bytes) = std::fs::read(&path) {
            return rendition_response(LogoFormat::Svg, bytes);
        }
    }

    HttpResponse::NotFound().json(json!({"error": "logo not found"}))
}

fn rendition_response(format: LogoFormat, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header(("Cache-Control", "public, max-age=31536000"))
        .body(bytes)
}
