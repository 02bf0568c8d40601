//! End-to-end tests for the axum surface over an in-memory `SQLite` store.
//!
//! Run with: `cargo test --features "axum_api sqlx_sqlite" --test e2e_axum`

#![cfg(all(feature = "axum_api", feature = "sqlx_sqlite"))]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use quill::BlogConfig;
use quill::api::axum::{AppState, router};
use quill::sqlite::{connect, create_repositories, migrations};
use serde_json::{Value, json};
use serial_test::serial;
use tower::ServiceExt;

async fn create_app() -> Router {
    let pool = connect("sqlite::memory:").await.unwrap();
    migrations::run(&pool).await.unwrap();

    let (users, sessions, posts, registration) = create_repositories(pool);
    router(AppState::new(
        users,
        posts,
        sessions,
        registration,
        BlogConfig::default(),
    ))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn set_cookie(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_owned())
}

/// `session_token=...` pair from a Set-Cookie header, ready for a Cookie header.
fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().to_owned()
}

/// Registers `username` and returns `(user_id, cookie)`.
async fn register(app: &Router, username: &str, password: &str) -> (i64, String) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/register",
            &json!({
                "username": username,
                "password": password,
                "confirm_password": password,
            }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = cookie_pair(&set_cookie(&response).unwrap());
    let body = body_to_json(response.into_body()).await;
    (body["user_id"].as_i64().unwrap(), cookie)
}

#[tokio::test]
#[serial]
async fn test_register_sets_session_cookie() {
    let app = create_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/register",
            &json!({
                "username": "alice",
                "password": "secret1",
                "confirm_password": "secret1",
            }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = set_cookie(&response).unwrap();
    assert!(cookie.starts_with("session_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("SameSite=Lax"));

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["name"], "alice");
    assert_eq!(body["message"], "Registration successful");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
#[serial]
async fn test_register_rejections() {
    let app = create_app().await;
    register(&app, "taken", "secret1").await;

    let cases = [
        (json!({"username": "bob"}), StatusCode::BAD_REQUEST),
        (
            json!({"username": "bob", "password": "secret1", "confirm_password": "secret2"}),
            StatusCode::BAD_REQUEST,
        ),
        (
            json!({"username": "bob", "password": "abc", "confirm_password": "abc"}),
            StatusCode::BAD_REQUEST,
        ),
        (
            json!({"username": "taken", "password": "secret1", "confirm_password": "secret1"}),
            StatusCode::CONFLICT,
        ),
    ];

    for (payload, expected) in cases {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/register", &payload, None))
            .await
            .unwrap();
        assert_eq!(response.status(), expected, "payload {payload}");
        assert!(set_cookie(&response).is_none());

        let body = body_to_json(response.into_body()).await;
        assert!(body["error"].is_string());
        assert!(body["code"].is_string());
    }
}

#[tokio::test]
#[serial]
async fn test_login() {
    let app = create_app().await;
    register(&app, "alice", "secret1").await;

    let wrong = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            &json!({"username": "alice", "password": "wrong12"}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&wrong).is_none());

    let unknown = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            &json!({"username": "nobody", "password": "secret1"}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let wrong_body = body_to_json(wrong.into_body()).await;
    let unknown_body = body_to_json(unknown.into_body()).await;
    assert_eq!(wrong_body, unknown_body);

    let ok = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            &json!({"username": "alice", "password": "secret1"}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    let cookie = cookie_pair(&set_cookie(&ok).unwrap());

    let me = app
        .clone()
        .oneshot(get_request("/api/current-user", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(me.status(), StatusCode::OK);
    assert_eq!(body_to_json(me.into_body()).await["name"], "alice");
}

#[tokio::test]
#[serial]
async fn test_current_user_requires_session() {
    let app = create_app().await;

    let missing = app
        .clone()
        .oneshot(get_request("/api/current-user", None))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let bogus = app
        .clone()
        .oneshot(get_request(
            "/api/current-user",
            Some("session_token=not-a-real-token"),
        ))
        .await
        .unwrap();
    assert_eq!(bogus.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_create_and_read_posts() {
    let app = create_app().await;
    let (alice_id, alice_cookie) = register(&app, "alice", "secret1").await;
    let (bob_id, _) = register(&app, "bob", "secret1").await;

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/posts",
            &json!({"title": "Hello", "content": "World", "author_id": alice_id}),
            Some(&alice_cookie),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let post = body_to_json(created.into_body()).await;
    assert_eq!(post["author"]["name"], "alice");
    let post_id = post["id"].as_i64().unwrap();

    let fetched = app
        .clone()
        .oneshot(get_request(&format!("/api/posts/{post_id}"), None))
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_to_json(fetched.into_body()).await, post);

    let all = app
        .clone()
        .oneshot(get_request("/api/posts", None))
        .await
        .unwrap();
    assert_eq!(all.status(), StatusCode::OK);
    assert_eq!(body_to_json(all.into_body()).await.as_array().unwrap().len(), 1);

    let forged = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/posts",
            &json!({"title": "Forged", "content": "x", "author_id": bob_id}),
            Some(&alice_cookie),
        ))
        .await
        .unwrap();
    assert_eq!(forged.status(), StatusCode::FORBIDDEN);

    let anonymous = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/posts",
            &json!({"title": "Anon", "content": "x", "author_id": alice_id}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let missing = app
        .clone()
        .oneshot(get_request("/api/posts/9999", None))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_user_reads() {
    let app = create_app().await;
    let (admin_id, admin_cookie) = register(&app, "admin", "secret1").await;
    let (alice_id, alice_cookie) = register(&app, "alice", "secret1").await;
    let (_, bob_cookie) = register(&app, "bob", "secret1").await;
    assert_eq!(admin_id, 1);

    let own = app
        .clone()
        .oneshot(get_request(&format!("/api/users/{alice_id}"), Some(&alice_cookie)))
        .await
        .unwrap();
    assert_eq!(own.status(), StatusCode::OK);
    let profile = body_to_json(own.into_body()).await;
    assert_eq!(profile, json!({"id": alice_id, "name": "alice"}));

    let by_admin = app
        .clone()
        .oneshot(get_request(&format!("/api/users/{alice_id}"), Some(&admin_cookie)))
        .await
        .unwrap();
    assert_eq!(by_admin.status(), StatusCode::OK);

    let by_other = app
        .clone()
        .oneshot(get_request(&format!("/api/users/{alice_id}"), Some(&bob_cookie)))
        .await
        .unwrap();
    assert_eq!(by_other.status(), StatusCode::FORBIDDEN);

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/posts",
            &json!({"title": "Mine", "content": "x", "author_id": alice_id}),
            Some(&alice_cookie),
        ))
        .await
        .unwrap();

    // listing by author needs no session
    let listed = app
        .clone()
        .oneshot(get_request(&format!("/api/users/{alice_id}/posts"), None))
        .await
        .unwrap();
    assert_eq!(listed.status(), StatusCode::OK);
    assert_eq!(body_to_json(listed.into_body()).await.as_array().unwrap().len(), 1);

    let empty = app
        .clone()
        .oneshot(get_request(&format!("/api/users/{admin_id}/posts"), None))
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_logout_ends_session() {
    let app = create_app().await;
    let (_, cookie) = register(&app, "alice", "secret1").await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/logout", &json!({}), Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let removal = set_cookie(&response).unwrap();
    assert!(removal.starts_with("session_token="));
    assert!(removal.contains("Max-Age=0"));
    assert_eq!(
        body_to_json(response.into_body()).await["message"],
        "Logged out successfully"
    );

    let after = app
        .clone()
        .oneshot(get_request("/api/current-user", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);

    // logging out again is harmless
    let again = app
        .clone()
        .oneshot(json_request("POST", "/logout", &json!({}), None))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::OK);
}
