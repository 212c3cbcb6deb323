use std::sync::OnceLock;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;

mod i18n_config;
mod log_config;

pub use i18n_config::I18nConfig;
pub use log_config::{LogConfig, LogFormat, LogRolling};

pub static CONFIG: OnceLock<ServerConfig> = OnceLock::new();

/// Loads `config.toml` (or `$APP_CONFIG`) overlaid with `APP_*` env vars
/// (`APP_JWT__SECRET` sets `jwt.secret`).
/// Safe to call more than once; the first load wins.
pub fn init() {
    CONFIG.get_or_init(load);
}

pub fn get() -> &'static ServerConfig {
    CONFIG.get().expect("config should be set")
}

fn load() -> ServerConfig {
    let raw_config = Figment::new()
        .merge(Toml::file(
            std::env::var("APP_CONFIG").as_deref().unwrap_or("config.toml"),
        ))
        .merge(Env::prefixed("APP_").split("__").global());

    let config = match raw_config.extract::<ServerConfig>() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("It looks like your config is invalid. The following error occurred: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = config.i18n.resolver() {
        eprintln!("Invalid [i18n] config: {e}");
        std::process::exit(1);
    }
    if config.jwt.secret.is_empty() {
        eprintln!("jwt.secret is not set");
        std::process::exit(1);
    }
    config
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub log: LogConfig,
    pub jwt: JwtConfig,
    pub tls: Option<TlsConfig>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Session lifetime in seconds.
    #[serde(default = "default_jwt_expiry")]
    pub expiry: i64,
    /// Enables `POST /api/dev/session` for local development.
    #[serde(default)]
    pub dev_sessions: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct TlsConfig {
    pub cert: String,
    pub key: String,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8008".into()
}

fn default_jwt_expiry() -> i64 {
    3600
}
