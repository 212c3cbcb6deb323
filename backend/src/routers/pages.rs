use salvo::http::header::ACCEPT_LANGUAGE;
use salvo::prelude::*;

use crate::application::errors::AppError;
use crate::application::services::I18nService;
use crate::infrastructure::i18n::i18n;
use crate::interface::http::{json_ok, JsonResult, LocaleDepotExt};
use crate::models::Page;

/// Sections mounted under `/{locale}/`.
pub const SECTIONS: &[&str] = &["account", "pro", "admin"];

/// `/` has no locale segment; send the visitor to their negotiated one.
#[handler]
pub async fn root_redirect(req: &mut Request, res: &mut Response) {
    let locale = i18n()
        .resolver()
        .negotiate(req.header::<String>(ACCEPT_LANGUAGE).as_deref());
    res.render(Redirect::temporary(format!("/{locale}")));
}

fn page(depot: &Depot, section: &str, body_key: &str) -> JsonResult<Page> {
    let locale = depot
        .locale()
        .ok_or_else(|| AppError::internal("page served without the locale hoop"))?;
    json_ok(Page {
        locale,
        title: i18n().translate(&format!("pages.{section}.title"), locale),
        body: i18n().translate(&format!("pages.{section}.{body_key}"), locale),
    })
}

#[endpoint(tags("pages"))]
pub async fn home(depot: &mut Depot) -> JsonResult<Page> {
    page(depot, "home", "greeting")
}

/// Any signed-in role.
#[endpoint(tags("pages"))]
pub async fn account(depot: &mut Depot) -> JsonResult<Page> {
    page(depot, "account", "body")
}

/// Professionals and admins.
#[endpoint(tags("pages"))]
pub async fn pro_dashboard(depot: &mut Depot) -> JsonResult<Page> {
    page(depot, "pro", "body")
}

#[endpoint(tags("pages"))]
pub async fn admin_panel(depot: &mut Depot) -> JsonResult<Page> {
    page(depot, "admin", "body")
}
