use crate::application::domain::Locale;

pub trait I18nService: Send + Sync {
    /// Get a translated message by key for the given locale
    fn translate(&self, key: &str, locale: Locale) -> String;

    /// Locales a catalog was configured for
    fn supported_locales(&self) -> Vec<Locale>;
}
