use anyhow::Result;
use jsonwebtoken::EncodingKey;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::application::domain::Role;
use crate::infrastructure::config;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct JwtClaims {
    pub uid: String,
    pub sid: Uuid, // session id
    /// Role tags as issued. Missing means the user holds no roles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    pub exp: i64,
    pub iat: i64,
}

impl JwtClaims {
    /// Roles recognised by this service. Unknown tags are dropped.
    pub fn assigned_roles(&self) -> Option<Vec<Role>> {
        let tags = self.roles.as_ref()?;
        let roles = tags
            .iter()
            .filter_map(|tag| match tag.parse::<Role>() {
                Ok(role) => Some(role),
                Err(e) => {
                    tracing::warn!(uid = %self.uid, error = %e, "ignoring role claim");
                    None
                }
            })
            .collect();
        Some(roles)
    }
}

/// Mints an HS256 session token with the configured secret and lifetime.
pub fn generate_jwt_token(uid: impl Into<String>, roles: Option<&[Role]>) -> Result<(String, i64)> {
    let jwt = &config::get().jwt;
    let now = OffsetDateTime::now_utc();
    let exp = now + Duration::seconds(jwt.expiry);
    let claim = JwtClaims {
        uid: uid.into(),
        sid: Uuid::new_v4(),
        roles: roles.map(|roles| roles.iter().map(|r| r.as_str().to_string()).collect()),
        exp: exp.unix_timestamp(),
        iat: now.unix_timestamp(),
    };
    let token: String = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claim,
        &EncodingKey::from_secret(jwt.secret.as_bytes()),
    )?;
    Ok((token, exp.unix_timestamp()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(roles: Option<Vec<&str>>) -> JwtClaims {
        JwtClaims {
            uid: "u1".into(),
            sid: Uuid::nil(),
            roles: roles.map(|r| r.into_iter().map(String::from).collect()),
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn missing_roles_claim_stays_absent() {
        assert_eq!(claims(None).assigned_roles(), None);
    }

    #[test]
    fn unknown_role_tags_are_dropped() {
        assert_eq!(
            claims(Some(vec!["pro", "superuser", "ADMIN"])).assigned_roles(),
            Some(vec![Role::Pro])
        );
        assert_eq!(claims(Some(vec![])).assigned_roles(), Some(vec![]));
    }

    #[test]
    fn roles_claim_is_optional_on_the_wire() {
        let raw = r#"{"uid":"u1","sid":"00000000-0000-0000-0000-000000000000","exp":1,"iat":0}"#;
        let parsed: JwtClaims = serde_json::from_str(raw).unwrap();
        assert!(parsed.roles.is_none());
    }
}
