use salvo::jwt_auth::{ConstDecoder, JwtAuth, JwtAuthDepotExt, JwtAuthState};
use salvo::prelude::*;

use crate::application::domain::{is_authorized, RequiredRoles};
use crate::application::errors::AppError;
use crate::hoops::jwt::JwtClaims;
use crate::infrastructure::config::JwtConfig;
use crate::utils;

/// Decodes the session token when one is present. Never rejects on its own;
/// guards downstream decide.
pub fn auth_hoop(config: &JwtConfig) -> JwtAuth<JwtClaims, ConstDecoder> {
    JwtAuth::new(ConstDecoder::from_secret(config.secret.as_bytes()))
        .finders(utils::get_token_finders())
        .force_passed(true)
}

pub fn session_claims(depot: &Depot) -> Option<&JwtClaims> {
    if depot.jwt_auth_state() != JwtAuthState::Authorized {
        return None;
    }
    depot.jwt_auth_data::<JwtClaims>().map(|data| &data.claims)
}

pub struct RequireRoles {
    required: RequiredRoles,
}

pub fn require_roles(required: impl Into<RequiredRoles>) -> RequireRoles {
    RequireRoles {
        required: required.into(),
    }
}

#[handler]
impl RequireRoles {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let session =
            session_claims(depot).map(|claims| (claims.uid.clone(), claims.assigned_roles()));

        let Some((uid, assigned)) = session else {
            AppError::unauthorized(format!("no session for {}", req.uri().path()))
                .write(req, depot, res)
                .await;
            ctrl.skip_rest();
            return;
        };

        if !is_authorized(assigned.as_deref(), self.required.roles()) {
            AppError::forbidden(format!("{uid} holds none of {}", self.required))
                .write(req, depot, res)
                .await;
            ctrl.skip_rest();
            return;
        }

        tracing::debug!(%uid, required = %self.required, "role check passed");
        ctrl.call_next(req, depot, res).await;
    }
}
