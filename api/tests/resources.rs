mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use sf_core::repositories::InMemoryStore;

#[actix_web::test]
async fn test_comment_lifecycle() {
    let store = InMemoryStore::new();
    let author = store.seed_user("ada@example.com", "Ada", "hash").await;
    let app = test::init_service(common::app(&store)).await;

    let req = test::TestRequest::post()
        .uri("/comments")
        .insert_header(common::bearer(author.id))
        .set_json(json!({ "text": "Great lamp" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let comment: Value = test::read_body_json(resp).await;
    assert_eq!(comment["userId"], author.id);
    let id = comment["id"].as_i64().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/comments/{}", id))
        .set_json(json!({ "text": "Great lamp, bright" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["text"], "Great lamp, bright");

    let req = test::TestRequest::delete()
        .uri(&format!("/comments/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/comments/{}", id))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_book_with_unknown_author() {
    let store = InMemoryStore::new();
    let author = store.seed_author("Lem").await;
    let app = test::init_service(common::app(&store)).await;

    let req = test::TestRequest::post()
        .uri("/books")
        .set_json(json!({ "title": "Solaris", "priceInPLNgr": "3999", "authorIds": [author.id] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let book: Value = test::read_body_json(resp).await;
    assert_eq!(book["authors"], json!([{ "id": author.id, "name": "Lem" }]));

    let req = test::TestRequest::post()
        .uri("/books")
        .set_json(json!({ "title": "Eden", "priceInPLNgr": "2999", "authorIds": [404] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Author with provided id doesn't exist.");
}

#[actix_web::test]
async fn test_second_profile_image_conflicts() {
    let store = InMemoryStore::new();
    let user = store.seed_user("ada@example.com", "Ada", "hash").await;
    let app = test::init_service(common::app(&store)).await;

    let mut statuses = Vec::new();
    for url in ["https://img.example.com/1.png", "https://img.example.com/2.png"] {
        let req = test::TestRequest::post()
            .uri("/profileImages")
            .insert_header(common::bearer(user.id))
            .set_json(json!({ "url": url }))
            .to_request();
        statuses.push(test::call_service(&app, req).await.status());
    }

    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);
}
