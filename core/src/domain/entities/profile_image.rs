use serde::{Deserialize, Serialize};

/// Avatar image of a user; a user has at most one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileImage {
    pub id: i32,
    pub url: String,
}
