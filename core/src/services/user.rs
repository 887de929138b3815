//! Account management for signed-in users

use std::sync::Arc;

use sf_shared::phone::{is_valid_phone, normalize_phone_number};
use tracing::info;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;

const USER_NOT_FOUND: &str = "User not found";
const NEW_AUTHOR_NOT_FOUND: &str = "User with provided id doesn't exist.";
const SELF_AS_NEW_AUTHOR: &str = "New author must be a different user.";

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_by_id(&self, id: i32) -> DomainResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(USER_NOT_FOUND))
    }

    /// Store a new phone number after checking it is a valid E.164 number
    pub async fn edit_phone_number(&self, id: i32, phone_number: &str) -> DomainResult<User> {
        if !is_valid_phone(phone_number) {
            return Err(AuthError::InvalidPhoneFormat {
                phone: phone_number.to_string(),
            }
            .into());
        }

        self.repository
            .update_phone_number(id, &normalize_phone_number(phone_number))
            .await?
            .ok_or_else(|| DomainError::not_found(USER_NOT_FOUND))
    }

    /// Delete an account and its comments.
    ///
    /// With `new_author` the user's products change hands, without it they are deleted.
    pub async fn delete_user(&self, id: i32, new_author: Option<i32>) -> DomainResult<()> {
        if new_author == Some(id) {
            return Err(DomainError::bad_request(SELF_AS_NEW_AUTHOR));
        }

        let deleted = self
            .repository
            .delete_account(id, new_author)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    DomainError::not_found(NEW_AUTHOR_NOT_FOUND)
                } else {
                    e
                }
            })?;
        if !deleted {
            return Err(DomainError::not_found(USER_NOT_FOUND));
        }

        info!(user_id = id, ?new_author, "User account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;

    #[tokio::test]
    async fn test_edit_phone_number() {
        let store = InMemoryStore::new();
        let user = store.seed_user("a@example.com", "A", "hash").await;
        let service = UserService::new(Arc::new(store));

        let updated = service
            .edit_phone_number(user.id, "+48 123-456-789")
            .await
            .unwrap();
        assert_eq!(updated.phone_number.as_deref(), Some("+48123456789"));

        let invalid = service.edit_phone_number(user.id, "123").await;
        assert!(matches!(
            invalid,
            Err(DomainError::Auth(AuthError::InvalidPhoneFormat { .. }))
        ));
    }

    #[tokio::test]
    async fn test_delete_user_hands_products_over() {
        let store = InMemoryStore::new();
        let leaving = store.seed_user("leaving@example.com", "L", "hash").await;
        let heir = store.seed_user("heir@example.com", "H", "hash").await;
        let product = store.seed_product("Clock", leaving.id, &[]).await;
        store.seed_comment(leaving.id, "nice").await;
        let service = UserService::new(Arc::new(store.clone()));

        service.delete_user(leaving.id, Some(heir.id)).await.unwrap();

        assert_eq!(store.owner_of(product.id).await, Some(heir.id));
        assert!(service.get_by_id(leaving.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_user_without_heir_drops_products() {
        let store = InMemoryStore::new();
        let leaving = store.seed_user("leaving@example.com", "L", "hash").await;
        let product = store.seed_product("Clock", leaving.id, &[]).await;
        let service = UserService::new(Arc::new(store.clone()));

        service.delete_user(leaving.id, None).await.unwrap();

        assert!(!store.product_exists(product.id).await);
    }

    #[tokio::test]
    async fn test_delete_user_with_unknown_heir_changes_nothing() {
        let store = InMemoryStore::new();
        let leaving = store.seed_user("leaving@example.com", "L", "hash").await;
        let product = store.seed_product("Clock", leaving.id, &[]).await;
        let service = UserService::new(Arc::new(store.clone()));

        let error = service.delete_user(leaving.id, Some(404)).await.unwrap_err();

        assert_eq!(error.to_string(), NEW_AUTHOR_NOT_FOUND);
        assert_eq!(store.owner_of(product.id).await, Some(leaving.id));
        assert!(service.get_by_id(leaving.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_user_rejects_self_as_heir() {
        let store = InMemoryStore::new();
        let user = store.seed_user("a@example.com", "A", "hash").await;
        let service = UserService::new(Arc::new(store));

        let error = service.delete_user(user.id, Some(user.id)).await.unwrap_err();
        assert!(matches!(error, DomainError::BadRequest { .. }));
    }
}
