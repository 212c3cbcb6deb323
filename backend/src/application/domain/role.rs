use std::fmt;
use std::str::FromStr;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capability tags carried by a session. Roles are independent flags:
/// `admin` does not imply `pro`.
#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Pro,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Pro, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Pro => "pro",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown role: `{0}`")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Roles a route accepts. Any one of them is enough.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequiredRoles(Vec<Role>);

impl RequiredRoles {
    pub fn roles(&self) -> &[Role] {
        &self.0
    }
}

impl fmt::Display for RequiredRoles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.0.iter().map(Role::as_str).collect();
        write!(f, "[{}]", tags.join("|"))
    }
}

impl From<Role> for RequiredRoles {
    fn from(role: Role) -> Self {
        Self(vec![role])
    }
}

impl From<Vec<Role>> for RequiredRoles {
    fn from(roles: Vec<Role>) -> Self {
        Self(roles)
    }
}

impl From<&[Role]> for RequiredRoles {
    fn from(roles: &[Role]) -> Self {
        Self(roles.to_vec())
    }
}

impl<const N: usize> From<[Role; N]> for RequiredRoles {
    fn from(roles: [Role; N]) -> Self {
        Self(roles.to_vec())
    }
}

/// True when `assigned` holds at least one of the `required` roles.
///
/// An absent assignment never authorizes, and neither does an empty
/// requirement list.
pub fn is_authorized(assigned: Option<&[Role]>, required: impl Into<RequiredRoles>) -> bool {
    let Some(assigned) = assigned else {
        return false;
    };
    required
        .into()
        .roles()
        .iter()
        .any(|role| assigned.contains(role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_assignment_never_authorizes() {
        for role in Role::ALL {
            assert!(!is_authorized(None, role));
        }
        assert!(!is_authorized(None, Role::ALL));
    }

    #[test]
    fn empty_assignment_never_authorizes() {
        assert!(!is_authorized(Some(&[]), Role::Admin));
        assert!(!is_authorized(Some(&[]), Role::ALL));
    }

    #[test]
    fn single_required_role() {
        assert!(is_authorized(Some(&[Role::Pro]), Role::Pro));
        assert!(!is_authorized(Some(&[Role::Pro]), Role::Admin));
    }

    #[test]
    fn any_required_role_suffices() {
        assert!(is_authorized(Some(&[Role::Pro]), [Role::Admin, Role::Pro]));
        assert!(is_authorized(Some(&[Role::User, Role::Admin]), vec![Role::Admin, Role::Pro]));
    }

    #[test]
    fn no_overlap_denies() {
        assert!(!is_authorized(Some(&[Role::User]), [Role::Admin, Role::Pro]));
    }

    #[test]
    fn roles_are_not_a_hierarchy() {
        assert!(!is_authorized(Some(&[Role::Admin]), Role::Pro));
        assert!(!is_authorized(Some(&[Role::Admin]), Role::User));
    }

    #[test]
    fn empty_requirement_authorizes_nobody() {
        let nothing: [Role; 0] = [];
        assert!(!is_authorized(Some(&[Role::Admin]), nothing));
        assert!(!is_authorized(Some(&Role::ALL), Vec::<Role>::new()));
    }

    #[test]
    fn role_tags_round_trip_through_from_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert_eq!("Admin".parse::<Role>(), Err(UnknownRole("Admin".into())));
    }

    #[test]
    fn required_roles_display() {
        assert_eq!(RequiredRoles::from([Role::Pro, Role::Admin]).to_string(), "[pro|admin]");
    }
}
