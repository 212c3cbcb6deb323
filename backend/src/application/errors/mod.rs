use salvo::http::{ParseError, StatusCode, StatusError};
use salvo::oapi::{self, EndpointOutRegister, ToSchema};
use salvo::prelude::*;
use thiserror::Error;

use crate::application::services::I18nService;
use crate::infrastructure::i18n::i18n;
use crate::interface::http::request_locale;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("public: `{0}`")]
    Public(String),
    #[error("internal: `{0}`")]
    Internal(String),
    #[error("unauthorized: `{0}`")]
    Unauthorized(String),
    #[error("forbidden: `{0}`")]
    Forbidden(String),
    #[error("not found: `{0}`")]
    NotFound(String),
    #[error("salvo internal error: `{0}`")]
    Salvo(#[from] ::salvo::Error),
    #[error("http status error: `{0}`")]
    HttpStatus(#[from] StatusError),
    #[error("http parse error:`{0}`")]
    HttpParse(#[from] ParseError),
    #[error("anyhow error:`{0}`")]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    pub fn public<S: Into<String>>(msg: S) -> Self {
        Self::Public(msg.into())
    }

    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    pub fn unauthorized<S: Into<String>>(msg: S) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden<S: Into<String>>(msg: S) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Status code and catalog key rendered for this error.
    pub fn status_and_key(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Public(_) => (StatusCode::BAD_REQUEST, "errors.bad_request"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "errors.unauthorized"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "errors.forbidden"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "errors.not_found"),
            Self::HttpStatus(e) => (e.code, "errors.bad_request"),
            Self::HttpParse(_) => (StatusCode::BAD_REQUEST, "errors.bad_request"),
            Self::Salvo(_) => (StatusCode::INTERNAL_SERVER_ERROR, "errors.salvo_error"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "errors.internal_error"),
            Self::Anyhow(_) => (StatusCode::INTERNAL_SERVER_ERROR, "errors.unknown_error"),
        }
    }
}

#[async_trait]
impl Writer for AppError {
    async fn write(self, req: &mut Request, depot: &mut Depot, res: &mut Response) {
        let (code, key) = self.status_and_key();
        res.status_code(code);

        let locale = request_locale(req, depot);

        let message = match self {
            // Public errors pass through
            Self::Public(msg) => msg,

            Self::Unauthorized(msg) => {
                tracing::warn!(path = %req.uri().path(), "unauthorized access attempt: {}", msg);
                i18n().translate(key, locale)
            }
            Self::Forbidden(msg) => {
                tracing::warn!(path = %req.uri().path(), "forbidden access attempt: {}", msg);
                i18n().translate(key, locale)
            }
            Self::NotFound(msg) => {
                tracing::debug!("not found: {}", msg);
                i18n().translate(key, locale)
            }
            Self::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                i18n().translate(key, locale)
            }
            Self::Salvo(e) => {
                tracing::error!(error = ?e, "salvo error");
                i18n().translate(key, locale)
            }
            Self::HttpStatus(e) => {
                tracing::warn!(error = ?e, "http status error");
                i18n().translate(key, locale)
            }
            Self::HttpParse(e) => {
                tracing::warn!(error = ?e, "http parse error");
                i18n().translate(key, locale)
            }
            Self::Anyhow(e) => {
                tracing::error!("unknown error: {}", e);
                i18n().translate(key, locale)
            }
        };

        let err = StatusError::from_code(code)
            .unwrap_or_else(StatusError::internal_server_error)
            .brief(message);

        res.render(err);
    }
}

impl EndpointOutRegister for AppError {
    fn register(
        components: &mut salvo::oapi::Components,
        operation: &mut salvo::oapi::Operation,
    ) {
        let schema = StatusError::to_schema(components);

        for (code, description) in [
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
            (StatusCode::BAD_REQUEST, "Bad request"),
            (StatusCode::NOT_FOUND, "Resource not found"),
            (StatusCode::UNAUTHORIZED, "Missing or invalid session"),
            (StatusCode::FORBIDDEN, "Session lacks a required role"),
        ] {
            operation.responses.insert(
                code.as_str(),
                oapi::Response::new(description).add_content("application/json", schema.clone()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_errors_map_to_their_status_codes() {
        assert_eq!(
            AppError::unauthorized("x").status_and_key(),
            (StatusCode::UNAUTHORIZED, "errors.unauthorized")
        );
        assert_eq!(
            AppError::forbidden("x").status_and_key(),
            (StatusCode::FORBIDDEN, "errors.forbidden")
        );
        assert_eq!(AppError::not_found("x").status_and_key().0, StatusCode::NOT_FOUND);
        assert_eq!(AppError::internal("x").status_and_key().0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn status_errors_keep_their_code() {
        let err: AppError = StatusError::payload_too_large().into();
        assert_eq!(err.status_and_key().0, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
