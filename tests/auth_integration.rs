mod common;

use chirpy::auth::{access_token_ttl, make_access_token};
use chirpy::routes::{LoginResponse, TokenResponse};
use common::{error_code, spawn_app, TEST_SECRET};
use serde_json::{json, Value};

// --- Registration ---

#[tokio::test]
async fn register_returns_profile_without_password() {
    let app = spawn_app();

    let response = app.post_user("saul@bettercall.com", "123456").await;
    assert_eq!(201, response.status().as_u16());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], "saul@bettercall.com");
    assert!(body["id"].as_str().is_some());
    assert!(body["created_at"].as_str().is_some());
    assert!(body.get("password").is_none());
    assert!(body.get("hashed_password").is_none());
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let app = spawn_app();

    assert_eq!(201, app.post_user("saul@bettercall.com", "123456").await.status().as_u16());
    let response = app.post_user("saul@bettercall.com", "other").await;

    assert_eq!(409, response.status().as_u16());
    assert_eq!("DUPLICATE_ENTRY", error_code(response).await);
}

#[tokio::test]
async fn register_rejects_invalid_input() {
    let app = spawn_app();
    let long_password = "a".repeat(73);
    let cases = vec![
        ("not-an-email", "123456", "malformed email"),
        ("", "123456", "empty email"),
        ("saul@bettercall.com", "", "empty password"),
        ("saul@bettercall.com", long_password.as_str(), "password over 72 bytes"),
    ];

    for (email, password, description) in cases {
        let response = app.post_user(email, password).await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request for {}.",
            description
        );
        assert_eq!("VALIDATION_ERROR", error_code(response).await);
    }
}

// --- Login ---

#[tokio::test]
async fn login_returns_token_pair() {
    let app = spawn_app();
    app.post_user("saul@bettercall.com", "123456").await;

    let response = app.post_login("saul@bettercall.com", "123456").await;
    assert_eq!(200, response.status().as_u16());

    let body: LoginResponse = response.json().await.unwrap();
    assert_eq!(body.email, "saul@bettercall.com");
    assert_eq!(body.token.split('.').count(), 3);
    assert_eq!(body.refresh_token.len(), 64);
    assert!(body.refresh_token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn login_failures_look_identical() {
    let app = spawn_app();
    app.post_user("saul@bettercall.com", "123456").await;

    let wrong_password = app.post_login("saul@bettercall.com", "654321").await;
    let unknown_email = app.post_login("kim@wexler.com", "123456").await;

    assert_eq!(401, wrong_password.status().as_u16());
    assert_eq!(401, unknown_email.status().as_u16());

    let wrong_password: Value = wrong_password.json().await.unwrap();
    let unknown_email: Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password["code"], "INVALID_CREDENTIALS");
    assert_eq!(wrong_password["code"], unknown_email["code"]);
    assert_eq!(wrong_password["message"], unknown_email["message"]);
}

// --- Refresh and revoke ---

#[tokio::test]
async fn refresh_then_revoke_scenario() {
    let app = spawn_app();
    let session = app.signed_in_user("walt@breakingbad.com", "123456").await;
    let refresh_token = session["refresh_token"].as_str().unwrap();

    let response = app.post_with_bearer("/api/refresh", refresh_token).await;
    assert_eq!(200, response.status().as_u16());
    let refreshed: TokenResponse = response.json().await.unwrap();

    // The new access token works on a protected route
    let response = app.post_chirp(&refreshed.token, "I am the one who knocks").await;
    assert_eq!(201, response.status().as_u16());

    let response = app.post_with_bearer("/api/revoke", refresh_token).await;
    assert_eq!(204, response.status().as_u16());

    let response = app.post_with_bearer("/api/refresh", refresh_token).await;
    assert_eq!(401, response.status().as_u16());
    assert_eq!("REFRESH_TOKEN_INVALID", error_code(response).await);

    // Revoking again is accepted and changes nothing
    let response = app.post_with_bearer("/api/revoke", refresh_token).await;
    assert_eq!(204, response.status().as_u16());
}

#[tokio::test]
async fn sessions_are_independent() {
    let app = spawn_app();
    app.post_user("walt@breakingbad.com", "123456").await;

    let laptop: LoginResponse = app
        .post_login("walt@breakingbad.com", "123456")
        .await
        .json()
        .await
        .unwrap();
    let phone: LoginResponse = app
        .post_login("walt@breakingbad.com", "123456")
        .await
        .json()
        .await
        .unwrap();
    assert_ne!(laptop.refresh_token, phone.refresh_token);

    let response = app.post_with_bearer("/api/revoke", &laptop.refresh_token).await;
    assert_eq!(204, response.status().as_u16());

    let response = app.post_with_bearer("/api/refresh", &laptop.refresh_token).await;
    assert_eq!(401, response.status().as_u16());
    let response = app.post_with_bearer("/api/refresh", &phone.refresh_token).await;
    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn refresh_and_revoke_reject_bad_tokens() {
    let app = spawn_app();
    let unknown = "ab".repeat(32);

    for path in ["/api/refresh", "/api/revoke"] {
        let response = app.client.post(app.url(path)).send().await.unwrap();
        assert_eq!(401, response.status().as_u16());
        assert_eq!("MISSING_TOKEN", error_code(response).await);

        let response = app.post_with_bearer(path, &unknown).await;
        assert_eq!(401, response.status().as_u16());
        assert_eq!("REFRESH_TOKEN_INVALID", error_code(response).await);
    }
}

// --- Access tokens on protected routes ---

#[tokio::test]
async fn protected_route_rejects_missing_and_invalid_tokens() {
    let app = spawn_app();
    let session = app.signed_in_user("walt@breakingbad.com", "123456").await;

    let response = app
        .client
        .post(app.url("/api/chirps"))
        .json(&json!({ "body": "no token" }))
        .send()
        .await
        .unwrap();
    assert_eq!(401, response.status().as_u16());
    assert_eq!("MISSING_TOKEN", error_code(response).await);

    let response = app.post_chirp("not.a.jwt", "garbage token").await;
    assert_eq!(401, response.status().as_u16());
    assert_eq!("TOKEN_INVALID", error_code(response).await);

    // A refresh token is not an access token
    let refresh_token = session["refresh_token"].as_str().unwrap();
    let response = app.post_chirp(refresh_token, "wrong kind of token").await;
    assert_eq!(401, response.status().as_u16());
    assert_eq!("TOKEN_INVALID", error_code(response).await);
}

#[tokio::test]
async fn protected_route_rejects_expired_and_foreign_tokens() {
    let app = spawn_app();
    let session = app.signed_in_user("walt@breakingbad.com", "123456").await;
    let user_id = session["id"].as_str().unwrap().parse().unwrap();

    let expired = make_access_token(user_id, TEST_SECRET, chrono::Duration::seconds(-10)).unwrap();
    let response = app.post_chirp(&expired, "too late").await;
    assert_eq!(401, response.status().as_u16());
    assert_eq!("TOKEN_INVALID", error_code(response).await);

    let foreign = make_access_token(user_id, "some-other-secret", access_token_ttl()).unwrap();
    let response = app.post_chirp(&foreign, "wrong key").await;
    assert_eq!(401, response.status().as_u16());
    assert_eq!("TOKEN_INVALID", error_code(response).await);
}

// --- Profile update ---

#[tokio::test]
async fn update_user_changes_credentials() {
    let app = spawn_app();
    let session = app.signed_in_user("walt@breakingbad.com", "123456").await;
    let token = session["token"].as_str().unwrap();

    let response = app
        .client
        .put(app.url("/api/users"))
        .bearer_auth(token)
        .json(&json!({ "email": "heisenberg@breakingbad.com", "password": "losPollos" }))
        .send()
        .await
        .unwrap();
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], "heisenberg@breakingbad.com");
    assert_eq!(body["id"], session["id"]);

    assert_eq!(401, app.post_login("walt@breakingbad.com", "123456").await.status().as_u16());
    assert_eq!(
        200,
        app.post_login("heisenberg@breakingbad.com", "losPollos")
            .await
            .status()
            .as_u16()
    );
}

#[tokio::test]
async fn update_user_requires_token() {
    let app = spawn_app();

    let response = app
        .client
        .put(app.url("/api/users"))
        .json(&json!({ "email": "heisenberg@breakingbad.com", "password": "losPollos" }))
        .send()
        .await
        .unwrap();
    assert_eq!(401, response.status().as_u16());
}
