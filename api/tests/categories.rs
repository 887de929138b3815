mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use sf_core::repositories::InMemoryStore;

#[actix_web::test]
async fn test_merge_categories_scenario() {
    let store = InMemoryStore::new();
    let owner = store.seed_user("owner@example.com", "Owner", "hash").await;
    store.seed_category_with_id(3, "Fiction").await;
    store.seed_category_with_id(5, "Drama").await;
    store.seed_category_with_id(7, "fiction ").await;
    let p1 = store.seed_product("P1", owner.id, &[3, 7]).await;
    let p2 = store.seed_product("P2", owner.id, &[7]).await;
    let p3 = store.seed_product("P3", owner.id, &[5]).await;
    let app = test::init_service(common::app(&store)).await;

    let req = test::TestRequest::patch().uri("/merge-categories").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "groupsMerged": 1, "categoriesRemoved": 1 }));

    let req = test::TestRequest::get().uri("/categories/7").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/categories/3").to_request();
    let fiction: Value = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<i64> = fiction["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|product| product["id"].as_i64().unwrap())
        .collect();
    assert_eq!(fiction["name"], "Fiction");
    assert_eq!(ids, vec![p1.id as i64, p2.id as i64]);
    assert_eq!(store.product_ids_of(5).await, vec![p3.id]);
}

#[actix_web::test]
async fn test_delete_category_cascades_to_products() {
    let store = InMemoryStore::new();
    let owner = store.seed_user("owner@example.com", "Owner", "hash").await;
    let c1 = store.seed_category("C1").await;
    let p1 = store.seed_product("P1", owner.id, &[c1.id]).await;
    let p2 = store.seed_product("P2", owner.id, &[c1.id]).await;
    let app = test::init_service(common::app(&store)).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/categories/{}", c1.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    for uri in [
        format!("/categories/{}", c1.id),
        format!("/products/{}", p1.id),
        format!("/products/{}", p2.id),
    ] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[actix_web::test]
async fn test_delete_missing_category_is_not_found() {
    let store = InMemoryStore::new();
    let owner = store.seed_user("owner@example.com", "Owner", "hash").await;
    let kitchen = store.seed_category("Kitchen").await;
    store.seed_product("Pan", owner.id, &[kitchen.id]).await;
    let app = test::init_service(common::app(&store)).await;

    let req = test::TestRequest::delete().uri("/categories/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Category not found");
    assert_eq!(store.product_count().await, 1);
}

#[actix_web::test]
async fn test_category_crud() {
    let store = InMemoryStore::new();
    let app = test::init_service(common::app(&store)).await;

    let req = test::TestRequest::post()
        .uri("/categories")
        .set_json(json!({ "name": "Garden" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/categories")
        .set_json(json!({ "name": "Garden" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::patch()
        .uri(&format!("/categories/{}", id))
        .set_json(json!({ "name": "Yard" }))
        .to_request();
    let renamed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(renamed["name"], "Yard");

    let req = test::TestRequest::patch()
        .uri("/categories/404")
        .set_json(json!({ "name": "Nothing" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/categories").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all, json!([{ "id": id, "name": "Yard" }]));
}

#[actix_web::test]
async fn test_invalid_input_is_bad_request() {
    let store = InMemoryStore::new();
    let app = test::init_service(common::app(&store)).await;

    let req = test::TestRequest::post()
        .uri("/categories")
        .set_json(json!({ "name": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"]["validation_errors"]["name"].is_array());

    let req = test::TestRequest::get().uri("/categories/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "bad_request");
}

#[actix_web::test]
async fn test_health_and_unknown_route() {
    let store = InMemoryStore::new();
    let app = test::init_service(common::app(&store)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let health: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(health["status"], "healthy");

    let req = test::TestRequest::get().uri("/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}
