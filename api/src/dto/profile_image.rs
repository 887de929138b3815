use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProfileImageRequest {
    #[validate(length(min = 1))]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileImageRequest {
    #[validate(length(min = 1))]
    pub url: Option<String>,
}
