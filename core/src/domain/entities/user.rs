//! User entity representing a registered account.

use serde::{Deserialize, Serialize};

/// Postal address attached to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: i32,
    pub street: String,
    pub city: String,
    pub country: String,
}

/// Address data supplied at sign-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub street: String,
    pub city: String,
    pub country: String,
}

/// A registered user
///
/// The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub phone_number: Option<String>,
    pub address_id: Option<i32>,
    pub address: Option<Address>,
    pub profile_image_id: Option<i32>,
}

impl User {
    pub fn has_profile_image(&self) -> bool {
        self.profile_image_id.is_some()
    }
}

/// Data required to create a user. `password` must already be hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
    pub phone_number: Option<String>,
    pub address: Option<NewAddress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_not_serialized() {
        let user = User {
            id: 1,
            email: "jan@example.com".to_string(),
            name: "Jan".to_string(),
            password: "$argon2id$v=19$hash".to_string(),
            phone_number: None,
            address_id: None,
            address: None,
            profile_image_id: Some(4),
        };
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json["profileImageId"], 4);
        assert!(user.has_profile_image());
    }
}
