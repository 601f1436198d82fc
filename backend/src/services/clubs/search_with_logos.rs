use crate::config::AppConfig;
use crate::db;
use crate::services::base_url;
use crate::text::normalize_query;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::logo::ClubLogoSearchResult;
use rusqlite::params_from_iter;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct Params {
    #[serde(default)]
    q: String,
    #[serde(default)]
    sport: String,
    /// Accepted alias for `sport`.
    #[serde(default, rename = "type")]
    club_type: String,
}

/// Handler for `GET /clubs/search-with-logos?q=&sport=`.
///
/// Searches the local logo store only; no provider is consulted. The
/// name is matched both raw and with the club-type abbreviation of the
/// first token expanded.
pub async fn process(
    config: web::Data<AppConfig>,
    req: HttpRequest,
    params: web::Query<Params>,
) -> impl Responder {
    let q = params.q.trim();
    if q.is_empty() {
        return HttpResponse::BadRequest()
            .json(json!({"error": "query parameter 'q' is required"}));
    }

    let sport = if params.sport.is_empty() {
        params.club_type.trim().to_lowercase()
    } else {
        params.sport.trim().to_lowercase()
    };

    match search_store(&config, q, &sport, &base_url(&req)) {
        Ok(results) => HttpResponse::Ok().json(results),
        Err(e) => {
            log::error!("club logo search failed: {}", e);
            HttpResponse::InternalServerError().json(json!({"error": "database error"}))
        }
    }
}

fn search_store(
    config: &AppConfig,
    q: &str,
    sport: &str,
    base: &str,
) -> Result<Vec<ClubLogoSearchResult>, String> {
    let conn = db::open(config).map_err(|e| e.to_string())?;

    let mut sql = String::from("SELECT id, club_name, has_svg, has_png FROM logos");
    let mut args: Vec<String> = Vec::new();

    let like_raw = format!("%{}%", q.to_lowercase());
    let normalized = normalize_query(q);
    if !normalized.is_empty() && normalized != q {
        sql.push_str(" WHERE ((LOWER(club_name) LIKE ?1 OR LOWER(club_name) LIKE ?2) OR id LIKE ?3)");
        args.push(like_raw);
        args.push(format!("%{}%", normalized.to_lowercase()));
        args.push(format!("%{}%", q));
    } else {
        sql.push_str(" WHERE (LOWER(club_name) LIKE ?1 OR id LIKE ?2)");
        args.push(like_raw);
        args.push(format!("%{}%", q));
    }

    if !sport.is_empty() && sport != "all" {
        sql.push_str(&format!(" AND LOWER(club_type) = ?{}", args.len() + 1));
        args.push(sport.to_string());
    }

    sql.push_str(" ORDER BY club_name");

    let mut stmt = conn.prepare(&sql).map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map(params_from_iter(args.iter()), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })
        .map_err(|e| e.to_string())?;

    let mut results = Vec::new();
    for row in rows {
        let (id, name, has_svg, has_png) = row.map_err(|e| e.to_string())?;
        let logo_url = if has_png == 1 {
            format!("{}/logos/{}?format=png", base, id)
        } else if has_svg == 1 {
            format!("{}/logos/{}?format=svg", base, id)
        } else {
            String::new()
        };
        results.push(ClubLogoSearchResult {
            id,
            name,
            logo_url,
            has_local_logo: has_svg == 1 || has_png == 1,
        });
    }

    Ok(results)
}
