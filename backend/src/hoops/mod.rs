use salvo::cors::{AllowOrigin, Cors, CorsHandler};
use salvo::http::Method;
use salvo::prelude::*;

use crate::application::errors::AppError;

mod auth;
pub mod jwt;
mod locale;

pub use auth::{auth_hoop, require_roles, session_claims};
pub use locale::locale_hoop;

pub fn cors_hoop() -> CorsHandler {
    Cors::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(vec!["authorization", "content-type", "accept-language"])
        .into_handler()
}

/// Catcher hoop localizing the brief of 404 responses; the default catcher
/// still formats the body.
#[handler]
pub async fn error_404(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    if res.status_code == Some(StatusCode::NOT_FOUND) {
        AppError::not_found(req.uri().path().to_string())
            .write(req, depot, res)
            .await;
    }
}
