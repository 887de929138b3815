//! Main authentication service implementation

use std::sync::Arc;

use sf_shared::phone::{is_valid_phone, normalize_phone_number};
use tracing::{debug, info, warn};

use crate::domain::entities::user::{NewAddress, NewUser, User};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::password::{hash_password, verify_password};

/// Sign-up data as submitted, with the password still in plain text
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
    pub phone_number: Option<String>,
    pub address: Option<NewAddress>,
}

/// Authentication service for sign-up, log-in and token resolution
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Register a new account
    ///
    /// # Errors
    /// * `AuthError::EmailTaken` - The email is already registered
    /// * `AuthError::InvalidPhoneFormat` - The optional phone number is not E.164
    pub async fn sign_up(&self, registration: Registration) -> DomainResult<User> {
        let phone_number = match registration.phone_number {
            Some(phone) if !is_valid_phone(&phone) => {
                return Err(AuthError::InvalidPhoneFormat { phone }.into());
            }
            Some(phone) => Some(normalize_phone_number(&phone)),
            None => None,
        };
        let password = hash_password(&registration.password).await?;

        let user = self
            .users
            .create(NewUser {
                email: registration.email,
                name: registration.name,
                password,
                phone_number,
                address: registration.address,
            })
            .await
            .map_err(|e| match e {
                DomainError::Conflict { .. } => AuthError::EmailTaken.into(),
                other => other,
            })?;

        info!(user_id = user.id, "User signed up");
        Ok(user)
    }

    /// Check credentials and issue a token.
    ///
    /// Returns the user with the `Set-Cookie` value carrying the token.
    pub async fn log_in(&self, email: &str, password: &str) -> DomainResult<(User, String)> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                debug!("Log-in attempt for unknown email");
                return Err(AuthError::WrongCredentials.into());
            }
        };

        if !verify_password(password, &user.password).await? {
            warn!(user_id = user.id, "Log-in attempt with wrong password");
            return Err(AuthError::WrongCredentials.into());
        }

        let token = self.tokens.generate(user.id)?;
        info!(user_id = user.id, "User logged in");
        Ok((user, self.tokens.auth_cookie(&token)))
    }

    /// Resolve the user a token was issued to
    pub async fn authenticate(&self, token: &str) -> DomainResult<User> {
        let claims = self.tokens.verify(token)?;
        self.authenticated_user(claims.user_id).await
    }

    /// Load the current user; a token for a deleted account is unauthorized
    pub async fn authenticated_user(&self, user_id: i32) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Unauthorized)
    }

    pub fn log_out(&self) -> String {
        self.tokens.logout_cookie()
    }
}
