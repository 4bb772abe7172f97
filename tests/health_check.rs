mod common;

use chirpy::configuration::Platform;
use common::{error_code, spawn_app, spawn_app_on};

#[tokio::test]
async fn healthz_returns_ok() {
    let app = spawn_app();

    let response = app
        .client
        .get(app.url("/api/healthz"))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn app_visits_are_counted_in_metrics() {
    let app = spawn_app();

    for _ in 0..3 {
        let response = app.client.get(app.url("/app/")).send().await.unwrap();
        assert_eq!(200, response.status().as_u16());
        assert!(response.text().await.unwrap().contains("Welcome to Chirpy"));
    }
    // Non-/app traffic is not a visit
    app.client.get(app.url("/api/healthz")).send().await.unwrap();

    let page = app
        .client
        .get(app.url("/admin/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Chirpy has been visited 3 times!"));
}

#[tokio::test]
async fn reset_clears_hits_and_users_in_dev() {
    let app = spawn_app();
    app.signed_in_user("walt@breakingbad.com", "123456").await;
    app.client.get(app.url("/app/")).send().await.unwrap();

    let response = app.client.post(app.url("/admin/reset")).send().await.unwrap();
    assert_eq!(200, response.status().as_u16());

    let page = app
        .client
        .get(app.url("/admin/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("visited 0 times"));

    // The account is gone, so the same email can register again
    let response = app.post_user("walt@breakingbad.com", "123456").await;
    assert_eq!(201, response.status().as_u16());
}

#[tokio::test]
async fn reset_is_forbidden_outside_dev() {
    let app = spawn_app_on(Platform::Production);
    app.signed_in_user("walt@breakingbad.com", "123456").await;

    let response = app.client.post(app.url("/admin/reset")).send().await.unwrap();
    assert_eq!(403, response.status().as_u16());
    assert_eq!("FORBIDDEN", error_code(response).await);

    let response = app.post_user("walt@breakingbad.com", "123456").await;
    assert_eq!(409, response.status().as_u16());
}
