//! HTTP-level tests for the `/directors` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_director, create_movie, create_review, delete, get, post_json, put_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_director_returns_201() {
    let (app, _) = common::build_test_app();
    let response = post_json(app, "/api/v1/directors/", json!({"name": "Nolan"})).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Nolan");
    assert!(json["id"].is_number());
    assert!(json["created_at"].is_string());
}

#[tokio::test]
async fn test_create_then_retrieve_round_trip() {
    let (app, _) = common::build_test_app();
    let id = create_director(&app, "Nolan").await;

    let response = get(app, &format!("/api/v1/directors/{id}/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["name"], "Nolan");
}

#[tokio::test]
async fn test_name_is_trimmed() {
    let (app, _) = common::build_test_app();
    let response = post_json(app, "/api/v1/directors/", json!({"name": "  Nolan  "})).await;
    assert_eq!(body_json(response).await["name"], "Nolan");
}

#[tokio::test]
async fn test_get_nonexistent_director_returns_404() {
    let (app, _) = common::build_test_app();
    let response = get(app, "/api/v1/directors/999999/").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Director with id 999999 not found");
}

#[tokio::test]
async fn test_update_director() {
    let (app, _) = common::build_test_app();
    let id = create_director(&app, "Nolan").await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/directors/{id}/"),
        json!({"name": "Christopher Nolan"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Christopher Nolan");

    let json = body_json(get(app, &format!("/api/v1/directors/{id}/")).await).await;
    assert_eq!(json["name"], "Christopher Nolan");
}

#[tokio::test]
async fn test_empty_update_changes_nothing() {
    let (app, _) = common::build_test_app();
    let id = create_director(&app, "Nolan").await;

    let response = put_json(app, &format!("/api/v1/directors/{id}/"), json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Nolan");
}

#[tokio::test]
async fn test_update_nonexistent_director_returns_404() {
    let (app, _) = common::build_test_app();
    let response = put_json(app, "/api/v1/directors/999999/", json!({"name": "Ghost"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_nonexistent_director_with_bad_body_returns_404() {
    let (app, _) = common::build_test_app();
    let response = put_json(app, "/api/v1/directors/999999/", json!({"name": ""})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_director_returns_204() {
    let (app, _) = common::build_test_app();
    let id = create_director(&app, "Nolan").await;

    let response = delete(app.clone(), &format!("/api/v1/directors/{id}/")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &format!("/api/v1/directors/{id}/")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(app, &format!("/api/v1/directors/{id}/")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let (app, _) = common::build_test_app();
    let response = post_json(app, "/api/v1/directors/", json!({"name": "   "})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["name"][0], "Name cannot be empty.");
}

#[tokio::test]
async fn test_missing_name_is_a_field_error() {
    let (app, _) = common::build_test_app();
    let response = post_json(app, "/api/v1/directors/", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["name"][0], "This field is required.");
}

#[tokio::test]
async fn test_overlong_name_is_rejected() {
    let (app, _) = common::build_test_app();
    let response = post_json(app.clone(), "/api/v1/directors/", json!({"name": "x".repeat(101)})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["fields"]["name"][0],
        "Ensure this field has no more than 100 characters."
    );

    let response = post_json(app, "/api/v1/directors/", json!({"name": "x".repeat(100)})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_invalid_update_leaves_director_unchanged() {
    let (app, _) = common::build_test_app();
    let id = create_director(&app, "Nolan").await;

    let response = put_json(app.clone(), &format!("/api/v1/directors/{id}/"), json!({"name": ""})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(get(app, &format!("/api/v1/directors/{id}/")).await).await;
    assert_eq!(json["name"], "Nolan");
}

// ---------------------------------------------------------------------------
// Movie count view and cascade
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_includes_movies_count() {
    let (app, _) = common::build_test_app();
    let nolan = create_director(&app, "Nolan").await;
    let lonely = create_director(&app, "Lonely").await;
    create_movie(&app, nolan, "Memento").await;
    create_movie(&app, nolan, "Tenet").await;

    let response = get(app, "/api/v1/directors/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let directors = json.as_array().unwrap();
    assert_eq!(directors.len(), 2);
    assert_eq!(directors[0]["id"], nolan);
    assert_eq!(directors[0]["name"], "Nolan");
    assert_eq!(directors[0]["movies_count"], 2);
    assert_eq!(directors[1]["id"], lonely);
    assert_eq!(directors[1]["movies_count"], 0);
}

#[tokio::test]
async fn test_delete_director_cascades_to_movies_and_reviews() {
    let (app, _) = common::build_test_app();
    let nolan = create_director(&app, "Nolan").await;
    let villeneuve = create_director(&app, "Villeneuve").await;
    let memento = create_movie(&app, nolan, "Memento").await;
    let dune = create_movie(&app, villeneuve, "Dune").await;
    let review = create_review(&app, memento, 5).await;
    let kept_review = create_review(&app, dune, 4).await;

    let response = delete(app.clone(), &format!("/api/v1/directors/{nolan}/")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &format!("/api/v1/movies/{memento}/")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = get(app.clone(), &format!("/api/v1/reviews/{review}/")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app.clone(), &format!("/api/v1/movies/{dune}/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get(app, &format!("/api/v1/reviews/{kept_review}/")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
