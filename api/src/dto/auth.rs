use serde::{Deserialize, Serialize};
use sf_core::domain::entities::{Address, NewAddress, User};
use sf_core::services::Registration;
use sf_shared::phone::mask_phone_number;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddressRequest {
    #[validate(length(min = 1))]
    pub street: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub phone_number: Option<String>,
    pub address: Option<AddressRequest>,
}

impl From<SignUpRequest> for Registration {
    fn from(request: SignUpRequest) -> Self {
        Self {
            email: request.email,
            name: request.name,
            password: request.password,
            phone_number: request.phone_number,
            address: request.address.map(|address| NewAddress {
                street: address.street,
                city: address.city,
                country: address.country,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogInRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditPhoneNumberRequest {
    #[validate(length(min = 1))]
    pub phone_number: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserQuery {
    pub new_author: Option<i32>,
}

/// User as returned to clients: no password, phone masked
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub phone_number: Option<String>,
    pub address_id: Option<i32>,
    pub address: Option<Address>,
    pub profile_image_id: Option<i32>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            phone_number: user.phone_number.as_deref().map(mask_phone_number),
            address_id: user.address_id,
            address: user.address,
            profile_image_id: user.profile_image_id,
        }
    }
}
