//! Integration tests for `/api/v1/users`, addressed by uid.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use sqlx::PgPool;

fn user_body(uid: &str, lastname: &str, role_id: i16) -> serde_json::Value {
    serde_json::json!({
        "uid": uid,
        "firstname": "Jean",
        "lastname": lastname,
        "email": "jean.dupont@example.com",
        "role_id": role_id,
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_returns_201(pool: PgPool) {
    let response = post_json(build_test_app(pool), "/api/v1/users", user_body("uid-1", "Dupont", 1)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["uid"], "uid-1");
    assert_eq!(json["lastname"], "Dupont");
    assert_eq!(json["role_id"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_rejects_invalid_fields(pool: PgPool) {
    let mut body = user_body("uid-1", "Dupont", 1);
    body["email"] = "not-an-email".into();
    let response = post_json(build_test_app(pool.clone()), "/api/v1/users", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_json(build_test_app(pool), "/api/v1/users", user_body("", "Dupont", 0)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_duplicate_uid_returns_409(pool: PgPool) {
    let response = post_json(build_test_app(pool.clone()), "/api/v1/users", user_body("uid-1", "Dupont", 1)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(build_test_app(pool), "/api/v1/users", user_body("uid-1", "Martin", 2)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_user_returns_204_then_404(pool: PgPool) {
    post_json(build_test_app(pool.clone()), "/api/v1/users", user_body("uid-1", "Dupont", 1)).await;

    let response = put_json(
        build_test_app(pool.clone()),
        "/api/v1/users/uid-1",
        user_body("uid-1", "Martin", 2),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(build_test_app(pool.clone()), "/api/v1/users/uid-1").await).await;
    assert_eq!(json["lastname"], "Martin");
    assert_eq!(json["role_id"], 2);

    let response = put_json(
        build_test_app(pool.clone()),
        "/api/v1/users/missing",
        user_body("missing", "Martin", 2),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    // The path uid and the body uid must agree.
    let response = put_json(
        build_test_app(pool),
        "/api/v1/users/uid-1",
        user_body("uid-2", "Martin", 2),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_and_delete_user(pool: PgPool) {
    post_json(build_test_app(pool.clone()), "/api/v1/users", user_body("uid-1", "Dupont", 1)).await;

    let response = get(build_test_app(pool.clone()), "/api/v1/users/uid-1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["email"], "jean.dupont@example.com");

    let response = delete(build_test_app(pool.clone()), "/api/v1/users/uid-1").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool.clone()), "/api/v1/users/uid-1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(build_test_app(pool), "/api/v1/users/uid-1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
