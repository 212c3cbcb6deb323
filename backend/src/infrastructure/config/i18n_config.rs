use serde::Deserialize;

use crate::application::domain::{Locale, LocaleError, LocaleResolver};

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct I18nConfig {
    pub default_locale: Locale,
    pub supported_locales: Vec<Locale>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::Es,
            supported_locales: Locale::ALL.to_vec(),
        }
    }
}

impl I18nConfig {
    pub fn resolver(&self) -> Result<LocaleResolver, LocaleError> {
        LocaleResolver::new(self.supported_locales.iter().copied(), self.default_locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_spanish_first_resolver() {
        let resolver = I18nConfig::default().resolver().unwrap();
        assert_eq!(resolver.default_locale(), Locale::Es);
        assert_eq!(resolver.supported(), &[Locale::Es, Locale::En]);
    }

    #[test]
    fn misconfigured_default_is_rejected() {
        let config = I18nConfig {
            default_locale: Locale::Es,
            supported_locales: vec![Locale::En],
        };
        assert!(config.resolver().is_err());
    }
}
