pub mod locale;
pub mod role;

pub use locale::{Locale, LocaleError, LocaleResolver};
pub use role::{is_authorized, RequiredRoles, Role};
