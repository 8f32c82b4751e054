//! User domain entity
//!
//! Back-office accounts (administrators and game masters) that build activities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Back-office role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_GAMEMASTER")]
    Gamemaster,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ROLE_ADMIN"),
            Role::Gamemaster => write!(f, "ROLE_GAMEMASTER"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ROLE_ADMIN" | "ADMIN" => Ok(Role::Admin),
            "ROLE_GAMEMASTER" | "GAMEMASTER" => Ok(Role::Gamemaster),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Roles allowed to manage activities, teams, stands and scenarios
pub const ORGANIZER_ROLES: &[Role] = &[Role::Admin, Role::Gamemaster];

/// A back-office user
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub login: String,
    #[serde(skip)]
    pub password_hash: String,
    #[serde(skip)]
    pub api_key_hash: Option<String>,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Check if the user holds at least one of the given roles
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|r| self.has_role(*r))
    }
}

/// Data needed to create a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
}

/// Partial update of a user
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub login: Option<String>,
    pub password_hash: Option<String>,
    pub roles: Option<Vec<Role>>,
}

/// Encode roles for storage as a comma separated list
pub fn roles_to_string(roles: &[Role]) -> String {
    roles
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Decode stored roles, ignoring unknown entries
pub fn roles_from_str(s: &str) -> Vec<Role> {
    s.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .filter_map(|r| r.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user(roles: Vec<Role>) -> User {
        User {
            id: UserId(1),
            login: "gm".to_string(),
            password_hash: "hash".to_string(),
            api_key_hash: None,
            roles,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn role_display() {
        assert_eq!(Role::Admin.to_string(), "ROLE_ADMIN");
        assert_eq!(Role::Gamemaster.to_string(), "ROLE_GAMEMASTER");
    }

    #[test]
    fn role_from_str() {
        assert_eq!("ROLE_ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("gamemaster".parse::<Role>().unwrap(), Role::Gamemaster);
        assert!("ROLE_PARTICIPANT".parse::<Role>().is_err());
    }

    #[test]
    fn roles_storage_format() {
        let roles = vec![Role::Admin, Role::Gamemaster];
        let stored = roles_to_string(&roles);
        assert_eq!(stored, "ROLE_ADMIN,ROLE_GAMEMASTER");
        assert_eq!(roles_from_str("ROLE_GAMEMASTER, bogus,"), vec![Role::Gamemaster]);
        assert!(roles_from_str("").is_empty());
    }

    #[test]
    fn user_has_any_role() {
        let gm = make_user(vec![Role::Gamemaster]);
        assert!(gm.has_any_role(ORGANIZER_ROLES));
        assert!(!gm.has_role(Role::Admin));

        let nobody = make_user(vec![]);
        assert!(!nobody.has_any_role(ORGANIZER_ROLES));
    }

    #[test]
    fn user_serialization_hides_secrets() {
        let mut user = make_user(vec![Role::Admin]);
        user.api_key_hash = Some("secret-hash".to_string());
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("ROLE_ADMIN"));
    }
}
