//! Category service implementation

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::category::{Category, CategoryWithProducts, MergeSummary};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{CategoryRepository, CategoryTransaction};

const CATEGORY_NOT_FOUND: &str = "Category not found";

/// Service for category management and consolidation
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> DomainResult<Vec<Category>> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> DomainResult<CategoryWithProducts> {
        self.repository
            .find_by_id_with_products(id)
            .await?
            .ok_or_else(|| DomainError::not_found(CATEGORY_NOT_FOUND))
    }

    pub async fn create(&self, name: &str) -> DomainResult<Category> {
        let category = self.repository.create(name).await?;
        info!(category_id = category.id, "Category created");
        Ok(category)
    }

    pub async fn update(&self, id: i32, name: Option<&str>) -> DomainResult<Category> {
        self.repository
            .update(id, name)
            .await?
            .ok_or_else(|| DomainError::not_found(CATEGORY_NOT_FOUND))
    }

    /// Delete a category together with every product linked to it.
    ///
    /// Runs in one transaction; a missing category fails with `NotFound` and
    /// changes nothing.
    pub async fn delete_category_with_products(&self, id: i32) -> DomainResult<()> {
        let mut tx = self.repository.begin().await?;

        let category = tx
            .find_by_id_with_products(id)
            .await?
            .ok_or_else(|| DomainError::not_found(CATEGORY_NOT_FOUND))?;
        let product_ids = category.product_ids();

        let removed = tx.delete_products(&product_ids).await?;
        if !tx.delete_category(id).await? {
            return Err(DomainError::not_found(CATEGORY_NOT_FOUND));
        }
        tx.commit().await?;

        info!(category_id = id, products_removed = removed, "Category deleted with its products");
        Ok(())
    }

    /// Collapse categories whose names differ only in case or surrounding whitespace.
    ///
    /// Within each duplicate group the category with the smallest id survives and
    /// ends up linked to the union of the group's products; the others are
    /// deleted. All groups are processed in a single transaction, so any failure
    /// (e.g. a category that vanished before it could be re-read) leaves the store
    /// untouched.
    pub async fn merge_categories(&self) -> DomainResult<MergeSummary> {
        let mut tx = self.repository.begin().await?;

        let categories = tx.find_all().await?;
        let groups = duplicate_groups(categories);
        let mut summary = MergeSummary::default();

        for (key, group) in &groups {
            let removed = merge_group(tx.as_mut(), group).await?;
            debug!(normalized_name = %key, removed, "Duplicate group merged");
            summary.groups_merged += 1;
            summary.categories_removed += removed;
        }

        tx.commit().await?;

        info!(
            groups_merged = summary.groups_merged,
            categories_removed = summary.categories_removed,
            "Category merge completed"
        );
        Ok(summary)
    }
}

/// Group categories by normalized name and keep groups with two or more members.
///
/// Groups come back in the order their first member was seen.
fn duplicate_groups(categories: Vec<Category>) -> Vec<(String, Vec<Category>)> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<Category>)> = Vec::new();

    for category in categories {
        let key = category.normalized_name();
        match positions.get(&key) {
            Some(&index) => groups[index].1.push(category),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push((key, vec![category]));
            }
        }
    }

    groups.retain(|(_, members)| members.len() > 1);
    groups
}

/// Fold one duplicate group into its survivor; returns how many categories were deleted
async fn merge_group(
    tx: &mut dyn CategoryTransaction,
    group: &[Category],
) -> DomainResult<usize> {
    let mut union: BTreeSet<i32> = BTreeSet::new();
    for member in group {
        let current = tx.find_by_id_with_products(member.id).await?.ok_or_else(|| {
            warn!(category_id = member.id, "Category disappeared during merge");
            DomainError::not_found(CATEGORY_NOT_FOUND)
        })?;
        union.extend(current.product_ids());
    }
    let product_ids: Vec<i32> = union.into_iter().collect();

    let mut member_ids: Vec<i32> = group.iter().map(|category| category.id).collect();
    member_ids.sort_unstable();
    let (survivor, losers) = match member_ids.split_first() {
        Some((survivor, losers)) => (*survivor, losers),
        None => return Ok(0),
    };

    for &loser in losers {
        tx.disconnect_products(loser, &product_ids).await?;
        if !tx.delete_category(loser).await? {
            return Err(DomainError::not_found(CATEGORY_NOT_FOUND));
        }
    }
    tx.replace_products(survivor, &product_ids).await?;

    Ok(losers.len())
}

#[cfg(test)]
mod grouping_tests {
    use super::*;

    #[test]
    fn test_duplicate_groups_keeps_first_seen_order() {
        let groups = duplicate_groups(vec![
            Category::new(1, "Drama"),
            Category::new(2, "Fiction"),
            Category::new(3, "drama "),
            Category::new(4, "Poetry"),
            Category::new(5, " FICTION"),
        ]);

        let keys: Vec<&str> = groups.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["drama", "fiction"]);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].1.len(), 2);
    }

    #[test]
    fn test_duplicate_groups_ignores_singletons() {
        let groups = duplicate_groups(vec![Category::new(1, "Drama"), Category::new(2, "Poetry")]);
        assert!(groups.is_empty());
    }
}
