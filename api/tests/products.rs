mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use sf_core::repositories::InMemoryStore;

#[actix_web::test]
async fn test_list_shortens_descriptions() {
    let store = InMemoryStore::new();
    let owner = store.seed_user("owner@example.com", "Owner", "hash").await;
    let app = test::init_service(common::app(&store)).await;

    let req = test::TestRequest::post()
        .uri("/products")
        .insert_header(common::bearer(owner.id))
        .set_json(json!({
            "name": "Desk",
            "priceInPLNgr": 129900,
            "isInStock": true,
            "description": "d".repeat(140),
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/products").to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list[0]["description"], format!("{}...", "d".repeat(100)));
    assert_eq!(list[0]["descriptionLength"], 140);
    assert_eq!(list[0]["priceInPLNgr"], 129900);
}

#[actix_web::test]
async fn test_create_requires_authentication() {
    let store = InMemoryStore::new();
    let app = test::init_service(common::app(&store)).await;

    let req = test::TestRequest::post()
        .uri("/products")
        .set_json(json!({
            "name": "Desk",
            "priceInPLNgr": 100,
            "isInStock": true,
            "description": "oak",
        }))
        .to_request();
    let err = test::try_call_service(&app, req)
        .await
        .err()
        .expect("anonymous create is rejected");

    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.product_count().await, 0);
}

#[actix_web::test]
async fn test_create_error_messages() {
    let store = InMemoryStore::new();
    let owner = store.seed_user("owner@example.com", "Owner", "hash").await;
    store.seed_product("Lamp", owner.id, &[]).await;
    let app = test::init_service(common::app(&store)).await;

    let duplicate = test::TestRequest::post()
        .uri("/products")
        .insert_header(common::bearer(owner.id))
        .set_json(json!({
            "name": "Lamp",
            "priceInPLNgr": 100,
            "isInStock": true,
            "description": "brass",
        }))
        .to_request();
    let resp = test::call_service(&app, duplicate).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Product with this name already exists.");

    let wrong_category = test::TestRequest::post()
        .uri("/products")
        .insert_header(common::bearer(owner.id))
        .set_json(json!({
            "name": "Chair",
            "priceInPLNgr": 100,
            "isInStock": false,
            "description": "pine",
            "categoryIds": [42],
        }))
        .to_request();
    let resp = test::call_service(&app, wrong_category).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Wrong category id provided.");
}

#[actix_web::test]
async fn test_details_and_votes() {
    let store = InMemoryStore::new();
    let owner = store.seed_user("owner@example.com", "Owner", "hash").await;
    let category = store.seed_category("Lighting").await;
    let lamp = store.seed_product("lamp", owner.id, &[category.id]).await;
    let app = test::init_service(common::app(&store)).await;

    let req = test::TestRequest::get()
        .uri(&format!("/products/{}", lamp.id))
        .to_request();
    let details: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(details["description"], "Lamp description");
    assert_eq!(details["user"]["email"], "owner@example.com");
    assert!(details["user"].get("password").is_none());
    assert_eq!(details["categories"], json!([{ "id": category.id, "name": "Lighting" }]));

    for _ in 0..2 {
        let req = test::TestRequest::patch()
            .uri(&format!("/products/{}/downvote", lamp.id))
            .to_request();
        test::call_service(&app, req).await;
    }
    let req = test::TestRequest::patch()
        .uri(&format!("/products/{}/upvote", lamp.id))
        .to_request();
    let voted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(voted["upvotes"], -1);

    let req = test::TestRequest::get().uri("/products/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Product with 999 cannot be found.");
}

#[actix_web::test]
async fn test_delete_by_upvote_filter() {
    let store = InMemoryStore::new();
    let owner = store.seed_user("owner@example.com", "Owner", "hash").await;
    let keep = store.seed_product("Keep", owner.id, &[]).await;
    let drop = store.seed_product("Drop", owner.id, &[]).await;
    let app = test::init_service(common::app(&store)).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/products/{}/downvote", drop.id))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::delete()
        .uri("/products/filter?upvotesFewerThan=0")
        .insert_header(common::bearer(owner.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Deleted 1 products.");
    assert!(store.product_exists(keep.id).await);
    assert!(!store.product_exists(drop.id).await);

    let req = test::TestRequest::delete()
        .uri("/products/filter?upvotesFewerThan=0")
        .insert_header(common::bearer(owner.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_change_ownership() {
    let store = InMemoryStore::new();
    let old = store.seed_user("old@example.com", "Old", "hash").await;
    let new = store.seed_user("new@example.com", "New", "hash").await;
    let vase = store.seed_product("Vase", old.id, &[]).await;
    let app = test::init_service(common::app(&store)).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/products/changeOwnership/{}/{}", old.id, new.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["productsMoved"], 1);
    assert_eq!(store.owner_of(vase.id).await, Some(new.id));

    let req = test::TestRequest::patch()
        .uri(&format!("/products/changeOwnership/{}/404", old.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
