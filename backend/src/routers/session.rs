use salvo::http::cookie::Cookie;
use salvo::oapi::extract::*;
use salvo::prelude::*;

use crate::application::errors::AppError;
use crate::hoops::{jwt, session_claims};
use crate::interface::http::{json_ok, JsonResult};
use crate::models::{DevSessionInData, DevSessionOutData, SessionUser};
use crate::utils;

#[endpoint(tags("session"))]
pub async fn get_session(depot: &mut Depot) -> JsonResult<SessionUser> {
    let claims = session_claims(depot).ok_or_else(|| AppError::unauthorized("no session"))?;
    json_ok(SessionUser {
        uid: claims.uid.clone(),
        roles: claims.assigned_roles(),
    })
}

/// Issues a session token without the authentication provider.
/// Only mounted when `jwt.dev_sessions` is enabled.
#[endpoint(tags("session"))]
pub async fn post_dev_session(
    idata: JsonBody<DevSessionInData>,
    res: &mut Response,
) -> JsonResult<DevSessionOutData> {
    let idata = idata.into_inner();
    if idata.uid.trim().is_empty() {
        return Err(AppError::public("uid is required"));
    }

    let (token, exp) = jwt::generate_jwt_token(idata.uid.trim(), idata.roles.as_deref())?;
    tracing::info!(uid = %idata.uid.trim(), roles = ?idata.roles, "dev session issued");

    let cookie = Cookie::build(("jwt_token", token.clone()))
        .path("/")
        .http_only(true)
        .secure(utils::is_secure_context())
        .build();
    res.add_cookie(cookie);
    json_ok(DevSessionOutData { token, exp })
}
