use crate::config::AppConfig;
use crate::db;
use crate::services::base_url;
use crate::services::logos::{fill_logo_urls, metadata_from_row, METADATA_COLUMNS};
use crate::text::strip_diacritics;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::logo::LogoMetadata;
use rusqlite::params_from_iter;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct Params {
    #[serde(default)]
    q: String,
    #[serde(default)]
    sport: String,
    #[serde(default, rename = "type")]
    club_type: String,
    #[serde(default)]
    sort: String,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    page: Option<u32>,
}

/// Handler for `GET /logos`: list or search the stored records.
///
/// When the LIKE pass matches nothing for a query, a second pass
/// filters all records with diacritics stripped, so "Pribram" still
/// finds "Příbram".
pub async fn process(
    config: web::Data<AppConfig>,
    req: HttpRequest,
    params: web::Query<Params>,
) -> impl Responder {
    match list_logos(&config, &params, &base_url(&req)) {
        Ok(logos) => HttpResponse::Ok().json(logos),
        Err(e) => {
            log::error!("logo listing failed: {}", e);
            HttpResponse::InternalServerError().json(json!({"error": "database error"}))
        }
    }
}

fn order_clause(sort: &str) -> &'static str {
    if sort == "recent" {
        " ORDER BY datetime(updated_at) DESC, datetime(created_at) DESC"
    } else {
        " ORDER BY club_name"
    }
}

fn limit_clause(params: &Params) -> String {
    match params.limit {
        Some(limit) if limit > 0 => {
            let page = params.page.unwrap_or(1).max(1);
            let offset = (page - 1) * limit;
            format!(" LIMIT {} OFFSET {}", limit, offset)
        }
        _ => String::new(),
    }
}

fn list_logos(
    config: &AppConfig,
    params: &Params,
    base: &str,
) -> Result<Vec<LogoMetadata>, String> {
    let conn = db::open(config).map_err(|e| e.to_string())?;

    let q = params.q.trim();
    let sport = if params.sport.is_empty() {
        params.club_type.trim().to_lowercase()
    } else {
        params.sport.trim().to_lowercase()
    };

    let mut sql = format!("SELECT {} FROM logos", METADATA_COLUMNS);
    let mut args: Vec<String> = Vec::new();

    if !q.is_empty() {
        sql.push_str(
            " WHERE (LOWER(club_name) LIKE ?1 OR LOWER(club_city) LIKE ?2 OR id LIKE ?3)",
        );
        let like = format!("%{}%", q.to_lowercase());
        args.push(like.clone());
        args.push(like);
        args.push(format!("%{}%", q));
    }
    if !sport.is_empty() && sport != "all" {
        if args.is_empty() {
            sql.push_str(" WHERE LOWER(club_type) = ?1");
        } else {
            sql.push_str(&format!(" AND LOWER(club_type) = ?{}", args.len() + 1));
        }
        args.push(sport.clone());
    }
    sql.push_str(order_clause(&params.sort));
    sql.push_str(&limit_clause(params));

    let mut logos = run_query(&conn, &sql, &args, base)?;

    // Diacritics-tolerant fallback: the LIKE pass found nothing, so
    // rescan with accents stripped on both sides.
    if !q.is_empty() && logos.is_empty() {
        let mut sql = format!("SELECT {} FROM logos", METADATA_COLUMNS);
        let mut args: Vec<String> = Vec::new();
        if !sport.is_empty() && sport != "all" {
            sql.push_str(" WHERE LOWER(club_type) = ?1");
            args.push(sport);
        }
        sql.push_str(order_clause(&params.sort));
        sql.push_str(&limit_clause(params));

        let all = run_query(&conn, &sql, &args, base)?;
        let norm_q = strip_diacritics(&q.to_lowercase());
        logos = all
            .into_iter()
            .filter(|logo| {
                let name = strip_diacritics(&logo.club_name.to_lowercase());
                let city = strip_diacritics(&logo.club_city.to_lowercase());
                name.contains(&norm_q)
                    || city.contains(&norm_q)
                    || logo.id.to_lowercase().contains(&q.to_lowercase())
            })
            .collect();
    }

    Ok(logos)
}

fn run_query(
    conn: &rusqlite::Connection,
    sql: &str,
    args: &[String],
    base: &str,
) -> Result<Vec<LogoMetadata>, String> {
    let mut stmt = conn.prepare(sql).map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map(params_from_iter(args.iter()), metadata_from_row)
        .map_err(|e| e.to_string())?;

    let mut logos = Vec::new();
    for row in rows {
        let mut meta = row.map_err(|e| e.to_string())?;
        fill_logo_urls(&mut meta, base);
        logos.push(meta);
    }
    Ok(logos)
}
