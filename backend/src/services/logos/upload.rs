use crate::config::AppConfig;
use crate::db;
use crate::error::IngestError;
use crate::pipeline::{RenditionPipeline, SourceFormat};
use crate::resolver::ClubResolver;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::model::logo::UploadResponse;
use futures_util::StreamExt;
use rusqlite::params;
use serde_json::json;
use std::path::Path;
use uuid::Uuid;

/// Parsed multipart form for one upload.
#[derive(Default)]
struct UploadForm {
    file: Vec<u8>,
    format: Option<SourceFormat>,
    club_name: String,
    club_city: String,
    club_type: String,
    club_website: String,
    width: u32,
}

#[derive(Debug)]
enum FormError {
    TooLarge(usize),
    BadExtension,
    MissingFile,
    Transport(String),
}

/// Handler for `POST /logos/{id}`: multipart upload of a logo source.
///
/// Accepts `.svg`, `.png` and `.pdf` files, runs the rendition pipeline
/// off the async core, and upserts the metadata record. Club details
/// missing from the form are backfilled from the lookup chain.
pub async fn process(
    config: web::Data<AppConfig>,
    pipeline: web::Data<RenditionPipeline>,
    resolver: web::Data<ClubResolver>,
    id: web::Path<String>,
    payload: Multipart,
) -> impl Responder {
    let id = id.into_inner();
    if Uuid::parse_str(&id).is_err() {
        return HttpResponse::BadRequest().json(json!({"error": "invalid UUID format"}));
    }

    let mut form = match read_form(payload, config.max_upload_bytes).await {
        Ok(form) => form,
        Err(FormError::TooLarge(limit)) => {
            return HttpResponse::PayloadTooLarge()
                .json(json!({"error": format!("file exceeds the {} byte limit", limit)}));
        }
        Err(FormError::BadExtension) => {
            return HttpResponse::BadRequest()
                .json(json!({"error": "only .svg, .png and .pdf files are allowed"}));
        }
        Err(FormError::MissingFile) => {
            return HttpResponse::BadRequest().json(json!({"error": "file field is required"}));
        }
        Err(FormError::Transport(e)) => {
            return HttpResponse::BadRequest().json(json!({"error": format!("upload failed: {}", e)}));
        }
    };
    let format = match form.format {
        Some(format) => format,
        None => {
            return HttpResponse::BadRequest()
                .json(json!({"error": "only .svg, .png and .pdf files are allowed"}));
        }
    };

    backfill_club_details(&resolver, &id, &mut form).await;

    let data = std::mem::take(&mut form.file);
    let width = form.width;
    let pipeline = pipeline.clone();
    let ingest_id = id.clone();
    let ingested = tokio::task::spawn_blocking(move || {
        pipeline.ingest(&ingest_id, &data, format, width)
    })
    .await;

    let set = match ingested {
        Ok(Ok(set)) => set,
        Ok(Err(IngestError::ConversionFailed(e))) => {
            log::error!("conversion for {} failed: {}", id, e);
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("conversion failed: {}", e)}));
        }
        Ok(Err(e)) => {
            log::error!("ingest for {} failed: {}", id, e);
            return HttpResponse::InternalServerError()
                .json(json!({"error": "failed to store the uploaded file"}));
        }
        Err(e) => {
            log::error!("ingest task for {} panicked: {}", id, e);
            return HttpResponse::InternalServerError()
                .json(json!({"error": "failed to store the uploaded file"}));
        }
    };

    let primary_format = set
        .primary_format()
        .map(|f| f.as_str().to_string())
        .unwrap_or_default();
    if let Err(e) = upsert_record(&config, &id, &form, &set, &primary_format) {
        log::error!("metadata upsert for {} failed: {}", id, e);
        return HttpResponse::InternalServerError().json(json!({"error": "database error"}));
    }

    HttpResponse::Ok().json(UploadResponse {
        success: true,
        id,
        club_name: form.club_name,
        has_svg: set.has_svg,
        has_png: set.has_png,
        size_svg: set.svg_size,
        size_png: set.png_size,
        message: "logo stored".to_string(),
    })
}

async fn read_form(mut payload: Multipart, max_bytes: usize) -> Result<UploadForm, FormError> {
    let mut form = UploadForm::default();
    let mut file_seen = false;
    // Single budget across all fields; the whole body is size-bounded.
    let mut used = 0usize;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| FormError::Transport(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();
                let ext = Path::new(&filename)
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or_default();
                form.format = Some(
                    SourceFormat::from_extension(ext).ok_or(FormError::BadExtension)?,
                );

                while let Some(chunk) = field.next().await {
                    let chunk = chunk.map_err(|e| FormError::Transport(e.to_string()))?;
                    used += chunk.len();
                    if used > max_bytes {
                        return Err(FormError::TooLarge(max_bytes));
                    }
                    form.file.extend_from_slice(&chunk);
                }
                file_seen = true;
            }
            Some(other) => {
                let value = read_text_field(&mut field, max_bytes, &mut used).await?;
                match other {
                    "club_name" | "name" => form.club_name = value,
                    "club_city" | "city" => form.club_city = value,
                    "club_type" | "type" | "sport" => form.club_type = value.to_lowercase(),
                    "club_website" | "website" => form.club_website = value,
                    "width" => form.width = value.trim().parse().unwrap_or(0),
                    _ => {}
                }
            }
            None => {}
        }
    }

    if !file_seen {
        return Err(FormError::MissingFile);
    }
    Ok(form)
}

async fn read_text_field(
    field: &mut actix_multipart::Field,
    max_bytes: usize,
    used: &mut usize,
) -> Result<String, FormError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| FormError::Transport(e.to_string()))?;
        *used += chunk.len();
        if *used > max_bytes {
            return Err(FormError::TooLarge(max_bytes));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&bytes).trim().to_string())
}

/// Fill club fields the form left empty from the lookup chain; when no
/// source can resolve the id, a placeholder name keeps the record valid.
async fn backfill_club_details(resolver: &ClubResolver, id: &str, form: &mut UploadForm) {
    if !form.club_name.is_empty() {
        return;
    }

    match resolver.resolve_by_id(id).await {
        Ok(club) => {
            form.club_name = club.name;
            if form.club_city.is_empty() {
                form.club_city = club.city;
            }
            if form.club_type.is_empty() {
                if let Some(t) = club.club_type {
                    form.club_type = t.as_str().to_string();
                }
            }
            if form.club_website.is_empty() {
                form.club_website = club.website;
            }
        }
        Err(e) => {
            log::warn!("could not resolve club {}: {}", id, e);
            form.club_name = format!("Club {}", id);
        }
    }
}

fn upsert_record(
    config: &AppConfig,
    id: &str,
    form: &UploadForm,
    set: &crate::pipeline::RenditionSet,
    primary_format: &str,
) -> Result<(), String> {
    let conn = db::open(config).map_err(|e| e.to_string())?;
    conn.execute(
        "INSERT INTO logos (id, club_name, club_city, club_type, club_website, \
             has_svg, has_png, primary_format, file_size_svg, file_size_png) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) \
         ON CONFLICT(id) DO UPDATE SET \
             club_name = excluded.club_name, \
             club_city = excluded.club_city, \
             club_type = excluded.club_type, \
             club_website = excluded.club_website, \
             has_svg = excluded.has_svg, \
             has_png = excluded.has_png, \
             primary_format = excluded.primary_format, \
             file_size_svg = excluded.file_size_svg, \
             file_size_png = excluded.file_size_png, \
             updated_at = CURRENT_TIMESTAMP",
        params![
            id,
            form.club_name,
            form.club_city,
            form.club_type,
            form.club_website,
            set.has_svg as i64,
            set.has_png as i64,
            primary_format,
            set.svg_size,
            set.png_size,
        ],
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}
