use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::new_id;

/// Account roles. Wire strings match the data files already in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Executive,
    #[serde(rename = "Store Manager")]
    StoreManager,
    #[serde(rename = "Team Leader")]
    TeamLeader,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Admin,
        UserRole::Executive,
        UserRole::StoreManager,
        UserRole::TeamLeader,
    ];

    /// Parse a user-supplied role name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "executive" => Some(Self::Executive),
            "store-manager" | "store manager" => Some(Self::StoreManager),
            "team-leader" | "team leader" => Some(Self::TeamLeader),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::Executive => write!(f, "Executive"),
            Self::StoreManager => write!(f, "Store Manager"),
            Self::TeamLeader => write!(f, "Team Leader"),
        }
    }
}

/// A login account. Passwords are stored the way the existing data files
/// store them: plaintext.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("name, username and password are required")]
    MissingFields,

    #[error("username already exists: {0}")]
    DuplicateUsername(String),

    #[error("user not found: {0}")]
    UnknownUser(String),
}

/// Exact-match credential check.
pub fn authenticate<'a>(users: &'a [User], username: &str, password: &str) -> Option<&'a User> {
    users
        .iter()
        .find(|u| u.username == username && u.password == password)
}

/// Add an account. While the collection is empty the new account is forced
/// to Admin, so a fresh repository always starts with an administrator.
pub fn add_user(
    users: &mut Vec<User>,
    name: impl Into<String>,
    username: impl Into<String>,
    password: impl Into<String>,
    role: UserRole,
) -> Result<User, UserError> {
    let (name, username, password) = (name.into(), username.into(), password.into());
    if name.is_empty() || username.is_empty() || password.is_empty() {
        return Err(UserError::MissingFields);
    }
    if users.iter().any(|u| u.username == username) {
        return Err(UserError::DuplicateUsername(username));
    }

    let role = if users.is_empty() { UserRole::Admin } else { role };

    let user = User {
        id: new_id("user"),
        name,
        username,
        password,
        role,
    };
    users.push(user.clone());
    Ok(user)
}

/// Edit an account. `None` fields are left alone; an omitted or empty
/// password keeps the stored one.
pub fn update_user(
    users: &mut [User],
    id: &str,
    name: Option<String>,
    username: Option<String>,
    password: Option<String>,
    role: Option<UserRole>,
) -> Result<(), UserError> {
    if let Some(new_username) = &username
        && users.iter().any(|u| u.id != id && &u.username == new_username)
    {
        return Err(UserError::DuplicateUsername(new_username.clone()));
    }

    let user = users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| UserError::UnknownUser(id.to_owned()))?;

    if let Some(name) = name {
        user.name = name;
    }
    if let Some(username) = username {
        user.username = username;
    }
    if let Some(password) = password
        && !password.is_empty()
    {
        user.password = password;
    }
    if let Some(role) = role {
        user.role = role;
    }
    Ok(())
}

pub fn remove_user(users: &mut Vec<User>, id: &str) -> Result<(), UserError> {
    let before = users.len();
    users.retain(|u| u.id != id);
    if users.len() == before {
        return Err(UserError::UnknownUser(id.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Vec<User> {
        let mut users = Vec::new();
        add_user(&mut users, "Asha", "asha", "secret", UserRole::Admin).unwrap();
        add_user(&mut users, "Ravi", "ravi", "pass123", UserRole::StoreManager).unwrap();
        users
    }

    #[test]
    fn authenticate_requires_both_fields_to_match() {
        let users = seeded();
        assert_eq!(authenticate(&users, "asha", "secret").unwrap().name, "Asha");
        assert!(authenticate(&users, "asha", "wrong").is_none());
        assert!(authenticate(&users, "nobody", "secret").is_none());
    }

    #[test]
    fn first_user_is_always_admin() {
        let mut users = Vec::new();
        let user = add_user(&mut users, "Asha", "asha", "secret", UserRole::TeamLeader).unwrap();
        assert_eq!(user.role, UserRole::Admin);

        let second = add_user(&mut users, "Ravi", "ravi", "pw", UserRole::TeamLeader).unwrap();
        assert_eq!(second.role, UserRole::TeamLeader);
    }

    #[test]
    fn usernames_are_unique() {
        let mut users = seeded();
        let err = add_user(&mut users, "Other", "asha", "pw", UserRole::Executive).unwrap_err();
        assert!(matches!(err, UserError::DuplicateUsername(_)));
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut users = Vec::new();
        let err = add_user(&mut users, "Asha", "asha", "", UserRole::Admin).unwrap_err();
        assert!(matches!(err, UserError::MissingFields));
    }

    #[test]
    fn update_keeps_password_when_blank() {
        let mut users = seeded();
        let id = users[0].id.clone();

        update_user(
            &mut users,
            &id,
            Some("Asha K".into()),
            None,
            Some(String::new()),
            None,
        )
        .unwrap();

        assert_eq!(users[0].name, "Asha K");
        assert_eq!(users[0].password, "secret");
    }

    #[test]
    fn update_cannot_steal_a_username() {
        let mut users = seeded();
        let id = users[1].id.clone();
        let err = update_user(&mut users, &id, None, Some("asha".into()), None, None).unwrap_err();
        assert!(matches!(err, UserError::DuplicateUsername(_)));
    }

    #[test]
    fn remove_unknown_user_errors() {
        let mut users = seeded();
        assert!(remove_user(&mut users, "user_missing").is_err());
        let id = users[0].id.clone();
        remove_user(&mut users, &id).unwrap();
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn roles_use_original_wire_strings() {
        assert_eq!(
            serde_json::to_string(&UserRole::StoreManager).unwrap(),
            "\"Store Manager\""
        );
        let parsed: UserRole = serde_json::from_str("\"Team Leader\"").unwrap();
        assert_eq!(parsed, UserRole::TeamLeader);
    }

    #[test]
    fn parse_accepts_cli_spellings() {
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("store-manager"), Some(UserRole::StoreManager));
        assert_eq!(UserRole::parse("Team Leader"), Some(UserRole::TeamLeader));
        assert_eq!(UserRole::parse("wizard"), None);
    }
}
