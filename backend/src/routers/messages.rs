use salvo::oapi::extract::*;
use salvo::prelude::*;

use crate::application::services::I18nService;
use crate::infrastructure::i18n::i18n;
use crate::interface::http::{json_ok, JsonResult};
use crate::models::MessageCatalog;

/// Message catalog for the UI. Unsupported tags get the default locale's.
#[endpoint(tags("i18n"))]
pub async fn get_messages(locale: PathParam<String>) -> JsonResult<MessageCatalog> {
    let requested = locale.into_inner();
    let i18n = i18n();
    let resolved = i18n.resolver().resolve(&requested);
    json_ok(MessageCatalog {
        requested,
        locale: resolved,
        supported: i18n.supported_locales(),
        messages: i18n.catalog(resolved).into_iter().collect(),
    })
}
