use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use crate::domain::entities::{Category, CategoryWithProducts};
use crate::errors::DomainError;
use crate::repositories::category::CategoryTransaction;

use super::State;

/// Category transaction over the in-memory store
///
/// Holds the store lock until dropped; changes land in the shared state only on commit.
pub struct InMemoryCategoryTransaction {
    guard: OwnedMutexGuard<State>,
    working: State,
    committed: bool,
}

impl InMemoryCategoryTransaction {
    pub(crate) fn new(guard: OwnedMutexGuard<State>) -> Self {
        let working = guard.clone();
        Self {
            guard,
            working,
            committed: false,
        }
    }

    fn state(&mut self) -> Result<&mut State, DomainError> {
        if self.committed {
            return Err(DomainError::internal("Transaction already committed"));
        }
        Ok(&mut self.working)
    }
}

fn ensure_products_exist(state: &State, product_ids: &[i32]) -> Result<(), DomainError> {
    match product_ids.iter().find(|id| !state.products.contains_key(id)) {
        Some(missing) => Err(DomainError::bad_request(format!(
            "Product {} does not exist",
            missing
        ))),
        None => Ok(()),
    }
}

#[async_trait]
impl CategoryTransaction for InMemoryCategoryTransaction {
    async fn find_all(&mut self) -> Result<Vec<Category>, DomainError> {
        Ok(self.state()?.categories.values().cloned().collect())
    }

    async fn find_by_id_with_products(
        &mut self,
        id: i32,
    ) -> Result<Option<CategoryWithProducts>, DomainError> {
        Ok(self.state()?.category_with_products(id))
    }

    async fn disconnect_products(
        &mut self,
        category_id: i32,
        product_ids: &[i32],
    ) -> Result<(), DomainError> {
        let state = self.state()?;
        if !state.categories.contains_key(&category_id) {
            return Err(DomainError::not_found("Category not found"));
        }
        state
            .category_products
            .retain(|(category, product)| *category != category_id || !product_ids.contains(product));
        Ok(())
    }

    async fn connect_products(
        &mut self,
        category_id: i32,
        product_ids: &[i32],
    ) -> Result<(), DomainError> {
        let state = self.state()?;
        if !state.categories.contains_key(&category_id) {
            return Err(DomainError::not_found("Category not found"));
        }
        ensure_products_exist(state, product_ids)?;
        for product_id in product_ids {
            state.category_products.insert((category_id, *product_id));
        }
        Ok(())
    }

    async fn replace_products(
        &mut self,
        category_id: i32,
        product_ids: &[i32],
    ) -> Result<(), DomainError> {
        let state = self.state()?;
        if !state.categories.contains_key(&category_id) {
            return Err(DomainError::not_found("Category not found"));
        }
        ensure_products_exist(state, product_ids)?;
        state
            .category_products
            .retain(|(category, _)| *category != category_id);
        self.connect_products(category_id, product_ids).await
    }

    async fn delete_category(&mut self, id: i32) -> Result<bool, DomainError> {
        let state = self.state()?;
        if state.failing_category_deletes.contains(&id) {
            return Err(DomainError::database(format!(
                "Injected failure deleting category {}",
                id
            )));
        }
        if state.categories.remove(&id).is_none() {
            return Ok(false);
        }
        state.category_products.retain(|(category, _)| *category != id);
        Ok(true)
    }

    async fn delete_products(&mut self, product_ids: &[i32]) -> Result<u64, DomainError> {
        Ok(self.state()?.remove_products(product_ids))
    }

    async fn commit(&mut self) -> Result<(), DomainError> {
        let working = std::mem::take(self.state()?);
        *self.guard = working;
        self.committed = true;
        Ok(())
    }
}
