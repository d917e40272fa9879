mod common;

use axum::http::StatusCode;
use blog_school_api::errors::StorageError;
use common::{assert_error_envelope, TestApp};
use serde_json::json;

async fn create(app: &TestApp, name: &str, email: &str) -> i64 {
    let (status, body) = app
        .post("/students", json!({ "name": name, "email": email }))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["student"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn list_is_empty_without_students() {
    let app = TestApp::new();

    let (status, body) = app.get("/students").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "success", "results": 0, "data": { "students": [] } })
    );
}

#[tokio::test]
async fn create_get_update_delete() {
    let app = TestApp::new();

    let (status, created) = app
        .post("/students", json!({ "name": "Ana Souza", "email": "ana@school.test" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Student created successfully");
    let student = created["data"]["student"].clone();
    let uri = format!("/students/{}", student["id"]);

    let (status, fetched) = app.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["student"], student);

    let (status, updated) = app
        .put(&uri, json!({ "name": "Ana S.", "email": "ana.s@school.test" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["message"], "Student updated successfully");
    assert_eq!(updated["data"]["student"]["id"], student["id"]);
    assert_eq!(updated["data"]["student"]["created_at"], student["created_at"]);
    assert_eq!(updated["data"]["student"]["name"], "Ana S.");
    assert_eq!(updated["data"]["student"]["email"], "ana.s@school.test");

    let (status, deleted) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Student deleted successfully");
    assert_eq!(deleted["data"]["student"], updated["data"]["student"]);

    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Record not found");

    let (status, _) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_fields_are_all_listed() {
    let app = TestApp::new();

    let (status, body) = app.post("/students", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_envelope(&body, "fail", "Required fields not provided", "POST", "/students");
    assert_eq!(body["details"]["missingFields"], json!(["name", "email"]));

    let id = create(&app, "Bruno", "bruno@school.test").await;
    let (status, body) = app
        .put(&format!("/students/{id}"), json!({ "name": "", "email": "b@school.test" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["missingFields"], json!(["name"]));
}

#[tokio::test]
async fn invalid_and_unknown_ids() {
    let app = TestApp::new();

    let (status, body) = app.get("/students/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_envelope(&body, "fail", "Invalid ID, must be a number", "GET", "/students/abc");

    let (status, body) = app.get("/students/999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["details"]["studentId"], 999999);

    let (status, _) = app
        .put("/students/999999", json!({ "name": "Nobody", "email": "no@school.test" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_matches_name_or_email() {
    let app = TestApp::new();
    create(&app, "Carla Mendes", "carla@school.test").await;
    create(&app, "Daniel Rocha", "daniel@academy.test").await;

    let (status, body) = app.get("/students/search?q=CARLA").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], 1);
    assert_eq!(body["searchTerm"], "CARLA");
    assert_eq!(body["data"]["students"][0]["name"], "Carla Mendes");

    let (_, body) = app.get("/students/search?q=ACADEMY").await;
    assert_eq!(body["results"], 1);
    assert_eq!(body["data"]["students"][0]["email"], "daniel@academy.test");

    let (_, body) = app.get("/students/search?q=test").await;
    assert_eq!(body["results"], 2);

    let (status, body) = app.get("/students/search?q=x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Search term must be at least 2 characters");
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = TestApp::new();
    let mut err = StorageError::with_code("23505");
    err.constraint = Some("students_email_key".to_string());
    app.repo.fail_next(err);

    let (status, body) = app
        .post("/students", json!({ "name": "Eva", "email": "eva@school.test" }))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Duplicate data found");
    assert_eq!(body["status"], "fail");
}
