mod address;
mod config;
mod db;
mod error;
mod html;
mod pipeline;
mod resolver;
mod services;
mod text;

use crate::config::AppConfig;
use crate::pipeline::RenditionPipeline;
use crate::resolver::ClubResolver;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use env_logger::Env;
use log::info;
use serde_json::json;

async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let app_config = AppConfig::from_env();
    app_config.ensure_dirs()?;
    db::init(&app_config).map_err(|e| std::io::Error::other(e.to_string()))?;

    let port = app_config.port;
    let resolver = web::Data::new(ClubResolver::new());
    let pipeline = web::Data::new(RenditionPipeline::new(&app_config));
    let config = web::Data::new(app_config);

    info!("Server running at http://0.0.0.0:{}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(config.clone())
            .app_data(resolver.clone())
            .app_data(pipeline.clone())
            .route("/health", web::get().to(health))
            .service(services::clubs::configure_routes())
            .service(services::logos::configure_routes())
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
