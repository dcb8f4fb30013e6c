//! HTTP-level integration tests for `/genres/`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_genre_crud_round_trip(pool: PgPool) {
    let id = common::create(&pool, "/genres/", json!({"name": "Drama"})).await;

    let response = get(common::build_test_app(pool.clone()), &format!("/genres/{id}/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"id": id, "name": "Drama"}));

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/genres/{id}/"),
        json!({"name": "Melodrama"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Melodrama");

    let response = delete(common::build_test_app(pool.clone()), &format!("/genres/{id}/")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool), &format!("/genres/{id}/")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_is_an_alias_for_put(pool: PgPool) {
    let id = common::create(&pool, "/genres/", json!({"name": "Scifi"})).await;

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/genres/{id}/"),
        json!({"name": "Sci-Fi"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Sci-Fi");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_genre_name_is_a_field_error(pool: PgPool) {
    common::create(&pool, "/genres/", json!({"name": "Comedy"})).await;

    let response = post_json(
        common::build_test_app(pool),
        "/genres/",
        json!({"name": "Comedy"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"]["name"][0], "genre with this name already exists.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_name_rejected(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/genres/",
        json!({"name": "   "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["name"][0], "This field may not be blank.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_name_is_a_field_error(pool: PgPool) {
    let response = post_json(common::build_test_app(pool), "/genres/", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["name"][0], "This field is required.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_genre_is_404_even_with_bad_payload(pool: PgPool) {
    let response = put_json(
        common::build_test_app(pool),
        "/genres/999999/",
        json!({"name": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_genre_list_pagination_links(pool: PgPool) {
    for i in 0..12 {
        common::create(&pool, "/genres/", json!({"name": format!("Genre {i:02}")})).await;
    }

    let json = body_json(get(common::build_test_app(pool.clone()), "/genres/").await).await;
    assert_eq!(json["count"], 12);
    assert_eq!(json["results"].as_array().unwrap().len(), 10);
    assert_eq!(json["next"], "/genres/?page=2");
    assert!(json["previous"].is_null());

    let json = body_json(get(common::build_test_app(pool.clone()), "/genres/?page=2").await).await;
    assert_eq!(json["results"].as_array().unwrap().len(), 2);
    assert!(json["next"].is_null());
    assert_eq!(json["previous"], "/genres/");

    let json =
        body_json(get(common::build_test_app(pool), "/genres/?page_size=5&page=2").await).await;
    assert_eq!(json["results"][0]["name"], "Genre 05");
    assert_eq!(json["next"], "/genres/?page=3&page_size=5");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_page_is_rejected(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/genres/?page=zero").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_FILTER_VALUE");
}
