use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::id::UserId;

/// A marketplace account.
///
/// Identity itself is owned by the login flow; this record carries the
/// profile fields the marketplace reads (`user_type`, `role`, contact data).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique, stored lowercased.
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub user_type: UserType,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh customer account.
    pub fn new_customer(email: &str, full_name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email: normalize_email(email),
            full_name: full_name.trim().to_string(),
            phone_number: None,
            user_type: UserType::Customer,
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_provider(&self) -> bool {
        self.user_type == UserType::Provider
    }

    /// Landing page for this user after login.
    pub fn dashboard_path(&self) -> &'static str {
        if self.user_type == UserType::Admin || self.is_admin() {
            "/admin"
        } else if self.is_provider() {
            "/provider/dashboard"
        } else {
            "/customer/dashboard"
        }
    }
}

/// Lowercase and trim an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Which side of the marketplace a user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Customer,
    Provider,
    Admin,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::Customer => write!(f, "customer"),
            UserType::Provider => write!(f, "provider"),
            UserType::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(UserType::Customer),
            "provider" => Ok(UserType::Provider),
            "admin" => Ok(UserType::Admin),
            other => Err(format!("invalid user type: '{other}'")),
        }
    }
}

impl Default for UserType {
    fn default() -> Self {
        UserType::Customer
    }
}

/// Permission role. Only `Admin` unlocks moderation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("invalid role: '{other}'")),
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// Self-service profile update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMyUserData {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub user_type: Option<UserType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_normalizes_email() {
        let user = User::new_customer("  Asha@Example.COM ", " Asha Rao ");
        assert_eq!(user.email, "asha@example.com");
        assert_eq!(user.full_name, "Asha Rao");
        assert_eq!(user.user_type, UserType::Customer);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_dashboard_path_by_user_type() {
        let mut user = User::new_customer("a@b.in", "A");
        assert_eq!(user.dashboard_path(), "/customer/dashboard");

        user.user_type = UserType::Provider;
        assert_eq!(user.dashboard_path(), "/provider/dashboard");

        user.role = Role::Admin;
        assert_eq!(user.dashboard_path(), "/admin");
    }

    #[test]
    fn test_user_type_parse() {
        assert_eq!("Provider".parse::<UserType>().unwrap(), UserType::Provider);
        assert!("lawyer".parse::<UserType>().is_err());
    }
}
