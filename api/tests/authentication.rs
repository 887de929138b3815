mod common;

use actix_web::{
    body::to_bytes,
    http::{header, StatusCode},
    test,
};
use serde_json::{json, Value};
use sf_core::repositories::InMemoryStore;

fn sign_up_body() -> Value {
    json!({
        "email": "ada@example.com",
        "name": "Ada",
        "password": "correct horse",
        "phoneNumber": "+48 123 456 789",
        "address": { "street": "Dluga 1", "city": "Gdansk", "country": "Poland" },
    })
}

#[actix_web::test]
async fn test_sign_up_log_in_and_current_user() {
    let store = InMemoryStore::new();
    let app = test::init_service(common::app(&store)).await;

    let req = test::TestRequest::post()
        .uri("/authentication/sign-up")
        .set_json(sign_up_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: Value = test::read_body_json(resp).await;
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["phoneNumber"], "*********789");
    assert_eq!(user["address"]["city"], "Gdansk");
    assert!(user.get("password").is_none());

    let req = test::TestRequest::post()
        .uri("/authentication/log-in")
        .set_json(json!({ "email": "ada@example.com", "password": "correct horse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("Authentication="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age=3600"));
    let cookie = common::cookie_pair(&resp);

    let req = test::TestRequest::get()
        .uri("/authentication")
        .insert_header((header::COOKIE, cookie))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let current: Value = test::read_body_json(resp).await;
    assert_eq!(current["id"], user["id"]);
}

#[actix_web::test]
async fn test_duplicate_email_conflicts() {
    let store = InMemoryStore::new();
    let app = test::init_service(common::app(&store)).await;

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/authentication/sign-up")
            .set_json(sign_up_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
        if expected == StatusCode::CONFLICT {
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], "User with this email already exists.");
        }
    }
}

#[actix_web::test]
async fn test_sign_up_validation() {
    let store = InMemoryStore::new();
    let app = test::init_service(common::app(&store)).await;

    let short_password = test::TestRequest::post()
        .uri("/authentication/sign-up")
        .set_json(json!({ "email": "ada@example.com", "name": "Ada", "password": "short" }))
        .to_request();
    let resp = test::call_service(&app, short_password).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let bad_phone = test::TestRequest::post()
        .uri("/authentication/sign-up")
        .set_json(json!({
            "email": "ada@example.com",
            "name": "Ada",
            "password": "long enough",
            "phoneNumber": "12",
        }))
        .to_request();
    let resp = test::call_service(&app, bad_phone).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_phone_format");
}

#[actix_web::test]
async fn test_wrong_credentials() {
    let store = InMemoryStore::new();
    let app = test::init_service(common::app(&store)).await;
    let req = test::TestRequest::post()
        .uri("/authentication/sign-up")
        .set_json(sign_up_body())
        .to_request();
    test::call_service(&app, req).await;

    for (email, password) in [
        ("ada@example.com", "wrong password"),
        ("nobody@example.com", "correct horse"),
    ] {
        let req = test::TestRequest::post()
            .uri("/authentication/log-in")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Wrong credentials provided");
    }
}

#[actix_web::test]
async fn test_log_out_clears_cookie() {
    let store = InMemoryStore::new();
    let app = test::init_service(common::app(&store)).await;

    let req = test::TestRequest::post().uri("/authentication/log-out").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok()),
        Some("Authentication=; HttpOnly; Path=/; Max-Age=0")
    );
}

#[actix_web::test]
async fn test_guard_rejects_missing_and_invalid_tokens() {
    let store = InMemoryStore::new();
    let app = test::init_service(common::app(&store)).await;

    let req = test::TestRequest::get().uri("/authentication").to_request();
    let err = test::try_call_service(&app, req)
        .await
        .err()
        .expect("missing token is rejected");
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
    let body = to_bytes(err.error_response().into_body()).await.unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "unauthorized");

    let req = test::TestRequest::get()
        .uri("/authentication")
        .insert_header((header::AUTHORIZATION, "Bearer not.a.jwt"))
        .to_request();
    let err = test::try_call_service(&app, req)
        .await
        .err()
        .expect("malformed token is rejected");
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);

    // valid signature, but the account no longer exists
    let req = test::TestRequest::get()
        .uri("/authentication")
        .insert_header(common::bearer(77))
        .to_request();
    let err = test::try_call_service(&app, req)
        .await
        .err()
        .expect("token of a deleted user is rejected");
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
}
