use rust_embed::Embed;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::application::domain::{Locale, LocaleResolver};
use crate::application::services::I18nService;

#[derive(Embed)]
#[folder = "locales/"]
struct Asset;

static I18N: OnceLock<TranslationService> = OnceLock::new();

/// Initialize once at app startup. Later calls keep the first instance.
pub fn init_i18n(resolver: LocaleResolver) {
    if I18N.set(TranslationService::new(resolver)).is_err() {
        tracing::debug!("i18n already initialized, skipping");
    }
}

pub fn i18n() -> &'static TranslationService {
    I18N.get().expect("I18N not initialized")
}

#[derive(Debug)]
pub struct TranslationService {
    // locale -> (key -> message)
    data: HashMap<Locale, HashMap<String, String>>,
    resolver: LocaleResolver,
}

impl I18nService for TranslationService {
    /// Keys can be nested like "errors.not_found" or "pages.home.title".
    /// Lookup order: requested locale, default locale, the key itself.
    fn translate(&self, key: &str, locale: Locale) -> String {
        if let Some(msg) = self.data.get(&locale).and_then(|messages| messages.get(key)) {
            return msg.clone();
        }
        if let Some(msg) = self
            .data
            .get(&self.default_locale())
            .and_then(|messages| messages.get(key))
        {
            return msg.clone();
        }
        key.to_string()
    }

    fn supported_locales(&self) -> Vec<Locale> {
        self.resolver.supported().to_vec()
    }
}

impl TranslationService {
    pub fn new(resolver: LocaleResolver) -> Self {
        let mut data = HashMap::new();
        for &locale in resolver.supported() {
            match load_catalog(locale) {
                Ok(catalog) => {
                    tracing::debug!(%locale, entries = catalog.len(), "message catalog loaded");
                    data.insert(locale, catalog);
                }
                Err(e) => tracing::warn!(%locale, error = %e, "message catalog unavailable"),
            }
        }
        Self { data, resolver }
    }

    pub fn resolver(&self) -> &LocaleResolver {
        &self.resolver
    }

    pub fn default_locale(&self) -> Locale {
        self.resolver.default_locale()
    }

    /// Flattened catalog for a locale, empty when none was loaded.
    pub fn catalog(&self, locale: Locale) -> HashMap<String, String> {
        self.data.get(&locale).cloned().unwrap_or_default()
    }
}

fn load_catalog(locale: Locale) -> anyhow::Result<HashMap<String, String>> {
    let filename = format!("{locale}.json");
    let file = Asset::get(&filename)
        .ok_or_else(|| anyhow::anyhow!("{filename} not embedded"))?;
    let json: Value = serde_json::from_slice(file.data.as_ref())?;
    let mut flat_map = HashMap::new();
    flatten_json("", &json, &mut flat_map);
    Ok(flat_map)
}

/// Flatten nested JSON into dot-notation keys
/// Example: {"errors": {"not_found": "..."}} becomes {"errors.not_found": "..."}
fn flatten_json(prefix: &str, value: &Value, output: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_json(&new_prefix, val, output);
            }
        }
        Value::String(s) => {
            output.insert(prefix.to_string(), s.clone());
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flatten_nested_objects() {
        let mut out = HashMap::new();
        flatten_json(
            "",
            &json!({"errors": {"forbidden": "no", "deep": {"key": "v"}}, "count": 3}),
            &mut out,
        );
        assert_eq!(out.get("errors.forbidden").map(String::as_str), Some("no"));
        assert_eq!(out.get("errors.deep.key").map(String::as_str), Some("v"));
        assert!(!out.contains_key("count"));
    }

    #[test]
    fn every_supported_locale_has_a_catalog() {
        let service = TranslationService::new(LocaleResolver::default());
        for locale in Locale::ALL {
            assert!(!service.catalog(locale).is_empty(), "{locale} catalog is empty");
        }
    }

    #[test]
    fn catalogs_share_the_same_keys() {
        let service = TranslationService::new(LocaleResolver::default());
        let mut es: Vec<String> = service.catalog(Locale::Es).into_keys().collect();
        let mut en: Vec<String> = service.catalog(Locale::En).into_keys().collect();
        es.sort();
        en.sort();
        assert_eq!(es, en);
    }

    #[test]
    fn translate_uses_requested_locale() {
        let service = TranslationService::new(LocaleResolver::default());
        assert_eq!(
            service.translate("errors.forbidden", Locale::En),
            "You do not have access to this page."
        );
        assert_eq!(
            service.translate("errors.forbidden", Locale::Es),
            "No tienes acceso a esta página."
        );
    }

    #[test]
    fn translate_falls_back_to_default_then_key() {
        // Only the Spanish catalog is loaded; English lookups land on it.
        let resolver = LocaleResolver::new([Locale::Es], Locale::Es).unwrap();
        let service = TranslationService::new(resolver);
        assert!(service.catalog(Locale::En).is_empty());
        assert_eq!(
            service.translate("errors.forbidden", Locale::En),
            "No tienes acceso a esta página."
        );
        assert_eq!(service.translate("missing.key", Locale::En), "missing.key");
    }

    #[test]
    fn port_reports_configured_locales() {
        let resolver = LocaleResolver::new([Locale::En], Locale::En).unwrap();
        let service: &dyn I18nService = &TranslationService::new(resolver);
        assert_eq!(service.supported_locales(), vec![Locale::En]);
        assert_eq!(service.translate("pages.pro.title", Locale::Es), "Professional dashboard");
    }
}
