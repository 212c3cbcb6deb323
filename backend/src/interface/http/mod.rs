use salvo::http::header::ACCEPT_LANGUAGE;
use salvo::prelude::*;

use crate::application::domain::Locale;
use crate::application::errors::AppError;
use crate::infrastructure::i18n::i18n;

pub type JsonResult<T> = Result<Json<T>, AppError>;

pub fn json_ok<T>(data: T) -> JsonResult<T> {
    Ok(Json(data))
}

const LOCALE_KEY: &str = "::citas::locale";

/// Resolved request locale, set by the locale hoop.
pub trait LocaleDepotExt {
    fn locale(&self) -> Option<Locale>;
    fn set_locale(&mut self, locale: Locale);
}

impl LocaleDepotExt for Depot {
    fn locale(&self) -> Option<Locale> {
        self.get::<Locale>(LOCALE_KEY).ok().copied()
    }

    fn set_locale(&mut self, locale: Locale) {
        self.insert(LOCALE_KEY, locale);
    }
}

/// Locale from the path when one was resolved, otherwise negotiated from
/// `Accept-Language`.
pub fn request_locale(req: &Request, depot: &Depot) -> Locale {
    depot.locale().unwrap_or_else(|| {
        let accept_language = req.header::<String>(ACCEPT_LANGUAGE);
        i18n().resolver().negotiate(accept_language.as_deref())
    })
}
