use salvo::http::header::ACCEPT_LANGUAGE;
use salvo::prelude::*;

use crate::application::domain::Locale;
use crate::application::errors::AppError;
use crate::infrastructure::i18n::i18n;
use crate::interface::http::LocaleDepotExt;

/// Resolves the `{locale}` path segment of localized routes.
///
/// A supported segment is stored in the depot. Otherwise the request is
/// redirected under the negotiated locale when that lands on a real page,
/// and answered with 404 when it would not.
pub struct LocaleHoop {
    pages: &'static [&'static str],
}

/// `pages` are the sections mounted directly under `{locale}`.
pub fn locale_hoop(pages: &'static [&'static str]) -> LocaleHoop {
    LocaleHoop { pages }
}

#[handler]
impl LocaleHoop {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let resolver = i18n().resolver();
        let raw = req.param::<String>("locale").unwrap_or_default();
        let locale = resolver.resolve(&raw);

        if locale.as_str() == raw {
            depot.set_locale(locale);
            ctrl.call_next(req, depot, res).await;
            return;
        }

        let negotiated = resolver.negotiate(req.header::<String>(ACCEPT_LANGUAGE).as_deref());
        let location = fallback_location(
            &raw,
            req.uri().path(),
            req.uri().query(),
            negotiated,
            self.pages,
        );
        match location {
            Some(location) => {
                tracing::debug!(segment = %raw, %location, "redirecting to localized path");
                res.render(Redirect::temporary(location));
            }
            None => {
                AppError::not_found(req.uri().path().to_string())
                    .write(req, depot, res)
                    .await;
            }
        }
        ctrl.skip_rest();
    }
}

/// Where to send a request whose first segment is not a supported locale.
///
/// - `/account` (a page with its prefix missing) becomes `/{locale}/account`.
/// - `/fr/pro` or `/es-ES` (a language tag we don't serve) has the tag
///   swapped for `locale`.
/// - Anything else (`/api`, `/xyz`) has no localized counterpart: `None`.
pub fn fallback_location(
    segment: &str,
    path: &str,
    query: Option<&str>,
    locale: Locale,
    pages: &[&str],
) -> Option<String> {
    let rest = path
        .trim_start_matches('/')
        .split_once('/')
        .map(|(_, rest)| rest)
        .unwrap_or("");

    let target = if rest.is_empty() && pages.contains(&segment) {
        format!("/{segment}")
    } else if looks_like_language_tag(segment) {
        if rest.is_empty() {
            String::new()
        } else {
            format!("/{rest}")
        }
    } else {
        return None;
    };
    Some(localized_path(locale, &target, query))
}

/// Two-letter primary subtag with optional subtags: `fr`, `EN`, `es-ES`, `pt_BR`.
fn looks_like_language_tag(segment: &str) -> bool {
    let mut parts = segment.split(['-', '_']);
    let primary = parts.next().unwrap_or_default();
    primary.len() == 2
        && primary.bytes().all(|b| b.is_ascii_alphabetic())
        && parts.all(|p| {
            (2..=8).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_alphanumeric())
        })
}

/// `/{locale}` prefixed onto `path`, keeping the query string.
pub fn localized_path(locale: Locale, path: &str, query: Option<&str>) -> String {
    let mut location = format!("/{locale}");
    if path != "/" {
        location.push_str(path);
    }
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        location.push('?');
        location.push_str(query);
    }
    location
}
