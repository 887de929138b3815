use std::sync::Arc;

use crate::domain::entities::{NewProduct, ProductPatch, UpvoteChange};
use crate::errors::DomainError;
use crate::repositories::InMemoryStore;

use super::{capitalize_description, preview_description, ProductService};

fn new_product(name: &str, user_id: i32, category_ids: Vec<i32>) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price_in_pln_gr: 4999,
        is_in_stock: true,
        description: "solid oak table".to_string(),
        user_id,
        category_ids,
    }
}

#[tokio::test]
async fn test_create_links_categories() {
    let store = InMemoryStore::new();
    let owner = store.seed_user("a@example.com", "A", "hash").await;
    let furniture = store.seed_category("Furniture").await;
    let service = ProductService::new(Arc::new(store.clone()));

    let created = service
        .create(new_product("Table", owner.id, vec![furniture.id]))
        .await
        .unwrap();

    assert_eq!(created.upvotes, 0);
    let details = service.get_one(created.id).await.unwrap();
    assert_eq!(details.categories, vec![furniture]);
    assert_eq!(details.user.map(|u| u.id), Some(owner.id));
}

#[tokio::test]
async fn test_create_maps_store_errors() {
    let store = InMemoryStore::new();
    let owner = store.seed_user("a@example.com", "A", "hash").await;
    let service = ProductService::new(Arc::new(store.clone()));
    service.create(new_product("Table", owner.id, vec![])).await.unwrap();

    let duplicate = service.create(new_product("Table", owner.id, vec![])).await;
    let wrong_category = service.create(new_product("Chair", owner.id, vec![77])).await;

    assert_eq!(
        duplicate.unwrap_err().to_string(),
        "Product with this name already exists."
    );
    assert!(matches!(
        wrong_category,
        Err(DomainError::BadRequest { message }) if message == "Wrong category id provided."
    ));
}

#[tokio::test]
async fn test_missing_product_messages() {
    let service = ProductService::new(Arc::new(InMemoryStore::new()));

    assert_eq!(
        service.get_one(12).await.unwrap_err().to_string(),
        "Product with 12 cannot be found."
    );
    assert!(service.delete(12).await.unwrap_err().is_not_found());
    assert!(service
        .update(12, ProductPatch::default())
        .await
        .unwrap_err()
        .is_not_found());
    assert!(service.vote(12, UpvoteChange::Up).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_downvote_can_go_negative() {
    let store = InMemoryStore::new();
    let owner = store.seed_user("a@example.com", "A", "hash").await;
    let product = store.seed_product("Lamp", owner.id, &[]).await;
    let service = ProductService::new(Arc::new(store));

    service.vote(product.id, UpvoteChange::Down).await.unwrap();
    let voted = service.vote(product.id, UpvoteChange::Down).await.unwrap();

    assert_eq!(voted.upvotes, -2);
}

#[tokio::test]
async fn test_delete_with_upvotes_below() {
    let store = InMemoryStore::new();
    let owner = store.seed_user("a@example.com", "A", "hash").await;
    let keep = store.seed_product("Keep", owner.id, &[]).await;
    let doomed = store.seed_product("Drop", owner.id, &[]).await;
    let service = ProductService::new(Arc::new(store.clone()));
    service.vote(keep.id, UpvoteChange::Up).await.unwrap();
    service.vote(doomed.id, UpvoteChange::Down).await.unwrap();

    let message = service.delete_with_upvotes_below(0).await.unwrap();

    assert_eq!(message, "Deleted 1 products.");
    assert!(store.product_exists(keep.id).await);
    assert!(!store.product_exists(doomed.id).await);
    assert_eq!(
        service.delete_with_upvotes_below(0).await.unwrap_err().to_string(),
        "Not product matches criteria."
    );
}

#[tokio::test]
async fn test_change_ownership() {
    let store = InMemoryStore::new();
    let old = store.seed_user("old@example.com", "Old", "hash").await;
    let new = store.seed_user("new@example.com", "New", "hash").await;
    let product = store.seed_product("Vase", old.id, &[]).await;
    let service = ProductService::new(Arc::new(store.clone()));

    assert_eq!(service.change_ownership(old.id, new.id).await.unwrap(), 1);
    assert_eq!(store.owner_of(product.id).await, Some(new.id));

    let missing = service.change_ownership(old.id, 404).await.unwrap_err();
    assert_eq!(missing.to_string(), "At least one of the users doesn't exist.");
}

#[test]
fn test_preview_description() {
    let long = "a".repeat(120);
    let preview = preview_description(&long);

    assert_eq!(preview.len(), 103);
    assert!(preview.ends_with("..."));
    assert_eq!(preview_description("short"), "short");
    assert_eq!(preview_description(&"b".repeat(100)), "b".repeat(100));
}

#[test]
fn test_capitalize_description() {
    assert_eq!(capitalize_description("oak table"), "Oak table");
    assert_eq!(capitalize_description("żółw"), "Żółw");
    assert_eq!(capitalize_description(""), "");
}
