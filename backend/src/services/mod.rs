pub mod clubs;
pub mod logos;

use actix_web::HttpRequest;

/// Absolute base URL of this service as seen by the client, used to
/// build rendition links in responses.
pub(crate) fn base_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}
