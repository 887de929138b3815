use serde::{Deserialize, Serialize};

/// A comment left by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i32,
    pub text: String,
    pub user_id: i32,
}
