// file: src/models/session.rs
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Student,
    Other(String),
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "admin" => Role::Admin,
            "student" => Role::Student,
            _ => Role::Other(role),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => "admin".to_string(),
            Role::Student => "student".to_string(),
            Role::Other(other) => other,
        }
    }
}

/// The signed-in user as the login endpoint returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    #[serde(default)]
    pub id_number: Option<String>,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Student
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Gate for the admin console. Pure: no storage, no navigation.
pub fn require_admin(session: &Session) -> AppResult<&SessionUser> {
    let user = match (&session.user, session.authenticated) {
        (Some(user), true) => user,
        _ => return Err(AppError::auth_denied("Please sign in to continue.")),
    };

    if user.role != Role::Admin {
        return Err(AppError::auth_denied("Admin privileges required."));
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> SessionUser {
        SessionUser {
            username: "counselor".to_string(),
            id_number: None,
            role,
        }
    }

    #[test]
    fn test_require_admin_accepts_admin() {
        let session = Session::signed_in(user(Role::Admin));
        assert_eq!(require_admin(&session).unwrap().username, "counselor");
    }

    #[test]
    fn test_require_admin_rejects_student_and_anonymous() {
        let student = Session::signed_in(user(Role::Student));
        assert!(matches!(require_admin(&student), Err(AppError::AuthDenied(_))));

        assert!(matches!(
            require_admin(&Session::anonymous()),
            Err(AppError::AuthDenied(_))
        ));

        let stale = Session {
            authenticated: false,
            user: Some(user(Role::Admin)),
        };
        assert!(require_admin(&stale).is_err());
    }

    #[test]
    fn test_role_round_trips_as_plain_string() {
        let parsed: SessionUser =
            serde_json::from_str(r#"{"username":"dean","role":"registrar"}"#).unwrap();
        assert_eq!(parsed.role, Role::Other("registrar".to_string()));

        let json = serde_json::to_string(&user(Role::Admin)).unwrap();
        assert!(json.contains(r#""role":"admin""#));
    }

    #[test]
    fn test_missing_role_defaults_to_student() {
        let parsed: SessionUser = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert_eq!(parsed.role, Role::Student);
    }
}
