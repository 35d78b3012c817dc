//! User model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ruouvan_core::{Email, Role, UserId};

/// A registered user.
///
/// The password hash is never part of this type; repositories hand it out
/// separately where verification needs it, so a serialized `User` can never
/// leak credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_user_carries_no_credentials() {
        let user = User {
            id: UserId::new(1),
            name: "Nguyễn Văn A".to_owned(),
            email: Email::parse("user@ruouvan.com").unwrap(),
            role: Role::User,
            phone: Some("0987 654 321".to_owned()),
            address: None,
            avatar: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("\"role\":\"user\""));
    }
}
