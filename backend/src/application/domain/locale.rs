use std::fmt;
use std::str::FromStr;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Languages the booking UI ships catalogs for.
#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Es,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Es, Locale::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|locale| locale.as_str() == s)
            .ok_or_else(|| LocaleError::Unknown(s.to_string()))
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LocaleError {
    #[error("unknown locale: `{0}`")]
    Unknown(String),
    #[error("no supported locales configured")]
    NoSupportedLocales,
    #[error("default locale `{0}` is not in the supported set")]
    UnsupportedDefault(Locale),
}

/// Maps requested locale tags onto the configured supported set.
#[derive(Clone, Debug)]
pub struct LocaleResolver {
    supported: Vec<Locale>,
    default: Locale,
}

impl LocaleResolver {
    pub fn new(
        supported: impl IntoIterator<Item = Locale>,
        default: Locale,
    ) -> Result<Self, LocaleError> {
        let mut deduped: Vec<Locale> = Vec::new();
        for locale in supported {
            if !deduped.contains(&locale) {
                deduped.push(locale);
            }
        }
        if deduped.is_empty() {
            return Err(LocaleError::NoSupportedLocales);
        }
        if !deduped.contains(&default) {
            return Err(LocaleError::UnsupportedDefault(default));
        }
        Ok(Self {
            supported: deduped,
            default,
        })
    }

    pub fn default_locale(&self) -> Locale {
        self.default
    }

    pub fn supported(&self) -> &[Locale] {
        &self.supported
    }

    /// Exact match against the supported tags, default otherwise.
    ///
    /// Matching is byte-for-byte: `"EN"` or `" en"` fall back to the default.
    pub fn resolve(&self, requested: &str) -> Locale {
        self.find(requested).unwrap_or(self.default)
    }

    /// `Some` only when `requested` is exactly a supported tag.
    pub fn find(&self, requested: &str) -> Option<Locale> {
        self.supported
            .iter()
            .copied()
            .find(|locale| locale.as_str() == requested)
    }

    /// Picks the best supported locale from an `Accept-Language` header value.
    ///
    /// Entries are tried in descending q order (ties keep header order); only
    /// the primary subtag of each entry is considered.
    pub fn negotiate(&self, accept_language: Option<&str>) -> Locale {
        let Some(header) = accept_language else {
            return self.default;
        };

        let mut candidates: Vec<(&str, f32)> = header
            .split(',')
            .filter_map(|entry| {
                let mut parts = entry.trim().split(';');
                let tag = parts.next()?.trim();
                if tag.is_empty() {
                    return None;
                }
                // The weight parameter name is case-insensitive (`q=` or `Q=`).
                let q = parts
                    .filter_map(|param| param.split_once('='))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
                    .map(|(_, q)| q.trim().parse::<f32>().unwrap_or(0.0))
                    .unwrap_or(1.0);
                (q > 0.0).then_some((tag, q))
            })
            .collect();
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

        candidates
            .into_iter()
            .filter(|(tag, _)| *tag != "*")
            .find_map(|(tag, _)| {
                let primary = tag.split('-').next().unwrap_or(tag).to_ascii_lowercase();
                self.find(&primary)
            })
            .unwrap_or(self.default)
    }
}

impl Default for LocaleResolver {
    fn default() -> Self {
        Self {
            supported: Locale::ALL.to_vec(),
            default: Locale::Es,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_tags_resolve_to_themselves() {
        let resolver = LocaleResolver::default();
        assert_eq!(resolver.resolve("es"), Locale::Es);
        assert_eq!(resolver.resolve("en"), Locale::En);
    }

    #[test]
    fn anything_else_falls_back_to_default() {
        let resolver = LocaleResolver::default();
        let requests = ["", "fr", "EN", "Es", " en", "en-US", "es_ES", "enx", "\u{0}", "🇪🇸"];
        for requested in requests {
            assert_eq!(resolver.resolve(requested), Locale::Es, "requested {requested:?}");
        }
    }

    #[test]
    fn alternate_configuration_changes_fallback() {
        let resolver = LocaleResolver::new([Locale::En], Locale::En).unwrap();
        assert_eq!(resolver.resolve("es"), Locale::En);
        assert_eq!(resolver.resolve("de"), Locale::En);
        assert_eq!(resolver.supported(), &[Locale::En]);
    }

    #[test]
    fn construction_rejects_default_outside_supported_set() {
        assert_eq!(
            LocaleResolver::new([Locale::En], Locale::Es).unwrap_err(),
            LocaleError::UnsupportedDefault(Locale::Es)
        );
        assert_eq!(
            LocaleResolver::new(Vec::<Locale>::new(), Locale::Es).unwrap_err(),
            LocaleError::NoSupportedLocales
        );
    }

    #[test]
    fn duplicate_supported_entries_collapse() {
        let resolver =
            LocaleResolver::new([Locale::Es, Locale::Es, Locale::En], Locale::Es).unwrap();
        assert_eq!(resolver.supported(), &[Locale::Es, Locale::En]);
    }

    #[test]
    fn negotiate_honours_q_values() {
        let resolver = LocaleResolver::default();
        assert_eq!(resolver.negotiate(Some("en-US,en;q=0.9,es;q=0.8")), Locale::En);
        assert_eq!(resolver.negotiate(Some("fr;q=1.0, es;q=0.3, en;q=0.7")), Locale::En);
        assert_eq!(resolver.negotiate(Some("EN-gb")), Locale::En);
    }

    #[test]
    fn negotiate_reads_uppercase_weight_parameter() {
        let resolver = LocaleResolver::default();
        assert_eq!(resolver.negotiate(Some("en;Q=0.1, es;q=0.9")), Locale::Es);
        assert_eq!(resolver.negotiate(Some("es ; Q = 0.2, en")), Locale::En);
        assert_eq!(resolver.negotiate(Some("en;Q=0")), Locale::Es);
    }

    #[test]
    fn negotiate_falls_back_to_default() {
        let resolver = LocaleResolver::default();
        assert_eq!(resolver.negotiate(None), Locale::Es);
        assert_eq!(resolver.negotiate(Some("")), Locale::Es);
        assert_eq!(resolver.negotiate(Some("fr, de")), Locale::Es);
        assert_eq!(resolver.negotiate(Some("*")), Locale::Es);
        assert_eq!(resolver.negotiate(Some("en;q=0")), Locale::Es);
    }

    #[test]
    fn locale_parses_and_serializes_as_tag() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert!("En".parse::<Locale>().is_err());
        assert_eq!(serde_json::to_string(&Locale::Es).unwrap(), "\"es\"");
        assert_eq!(Locale::En.to_string(), "en");
    }
}
