use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use mushroom_hunters::api;
use mushroom_hunters::config::Config;
use mushroom_hunters::db;
use mushroom_hunters::infrastructure::AppState;
use mushroom_hunters::seed;
use tower::util::ServiceExt; // for `oneshot`

async fn setup_router() -> axum::Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let state = AppState::new(db, &Config::default());
    seed::seed_demo_data(&state)
        .await
        .expect("Failed to seed data");
    api::api_router(state)
}

fn login_request(nickname: &str, password: &str) -> Request<Body> {
    let payload = serde_json::json!({ "nickname": nickname, "password": password });
    Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = setup_router().await;

    let response = app
        .clone()
        .oneshot(login_request("boletus_bob", "amanita"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(login_request("nobody", "hunter"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_me_logout() {
    let app = setup_router().await;

    let response = app
        .clone()
        .oneshot(login_request("boletus_bob", "hunter"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("SESSIONID="));

    let me = || {
        Request::builder()
            .uri("/auth/me")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(me()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["hunter"]["nickname"], "boletus_bob");
    assert!(json["hunter"].get("password_hash").is_none());

    let logout = Request::builder()
        .uri("/auth/logout")
        .method("POST")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(logout).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(me()).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_router().await;

    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

fn cookie_of(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

fn me_request(cookie: &str) -> Request<Body> {
    Request::builder()
        .uri("/auth/me")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_requests_without_state_leave_no_session() {
    let app = setup_router().await;

    for uri in ["/health", "/visits", "/forests"] {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(cookie_of(&response).is_none(), "{} set a cookie", uri);
    }
}

#[tokio::test]
async fn test_login_issues_new_session_id() {
    let app = setup_router().await;

    let response = app
        .clone()
        .oneshot(login_request("boletus_bob", "hunter"))
        .await
        .unwrap();
    let first = cookie_of(&response).expect("login should set a cookie");

    // Logging in again from an existing session moves it to a new id
    let mut req = login_request("admin", "admin");
    req.headers_mut()
        .insert(header::COOKIE, first.parse().unwrap());
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let second = cookie_of(&response).expect("login should set a new cookie");
    assert_ne!(first, second);

    let response = app.clone().oneshot(me_request(&first)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.oneshot(me_request(&second)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["hunter"]["nickname"], "admin");
}
