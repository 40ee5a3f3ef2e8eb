//! Integration tests for document operations.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn register_and_fetch_document() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let folder = app.create_folder(&token, "Actas", None).await;
    let doc = app.register_document(&token, folder, "acta.PDF").await;

    let response = app
        .request("GET", &format!("/files/{doc}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "acta.PDF");
    assert_eq!(response.body["data"]["extension"], "pdf");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn duplicate_blob_key_is_a_conflict() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let folder = app.create_folder(&token, "Actas", None).await;
    let blob_key = Uuid::new_v4();
    let body = json!({
        "folder_id": folder,
        "name": "acta.pdf",
        "blob_key": blob_key,
        "size_bytes": 1024,
    });

    let response = app
        .request("POST", "/files", Some(body.clone()), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app.request("POST", "/files", Some(body), Some(&token)).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn register_with_record_then_read_it_back() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let folder = app.create_folder(&token, "Actas", None).await;
    let body = json!({
        "folder_id": folder,
        "name": "acta.pdf",
        "blob_key": Uuid::new_v4(),
        "size_bytes": 2048,
        "record": { "student_name": "Ana Pérez", "period": "2021-II" },
    });
    let response = app.request("POST", "/files", Some(body), Some(&token)).await;
    assert_eq!(response.status, StatusCode::CREATED);
    let doc = response.body["data"]["id"].as_i64().unwrap();

    let response = app
        .request("GET", &format!("/files/{doc}/record"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let records = response.body["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["student_name"], "Ana Pérez");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn update_record_merges_fields() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let folder = app.create_folder(&token, "Actas", None).await;
    let doc = app.register_document(&token, folder, "acta.pdf").await;

    let response = app
        .request(
            "PUT",
            &format!("/files/{doc}/record"),
            Some(json!({ "student_name": "Ana Pérez", "period": "2021-II" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // A second patch leaves the untouched field alone.
    let response = app
        .request(
            "PUT",
            &format!("/files/{doc}/record"),
            Some(json!({ "student_code": "20181234" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["student_name"], "Ana Pérez");
    assert_eq!(response.body["data"]["student_code"], "20181234");

    let response = app
        .request(
            "PUT",
            &format!("/files/{doc}/record"),
            Some(json!({})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn move_document_between_folders() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let source = app.create_folder(&token, "Origen", None).await;
    let target = app.create_folder(&token, "Destino", None).await;
    let doc = app.register_document(&token, source, "acta.pdf").await;

    let response = app
        .request(
            "PATCH",
            &format!("/files/{doc}"),
            Some(json!({ "IdCarpetaPadre": target })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["folder_id"], target);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn delete_cascades_to_records() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let folder = app.create_folder(&token, "Actas", None).await;
    let doc = app.register_document(&token, folder, "acta.pdf").await;
    app.request(
        "PUT",
        &format!("/files/{doc}/record"),
        Some(json!({ "student_name": "Ana Pérez" })),
        Some(&token),
    )
    .await;

    let response = app
        .request("DELETE", &format!("/files/{doc}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/files/{doc}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let live_records: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM academic_records WHERE document_id = $1 AND status = 'active'",
    )
    .bind(doc)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(live_records, 0);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn document_ancestors_include_containing_folder() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let root = app.create_folder(&token, "Sistemas", None).await;
    let child = app.create_folder(&token, "Actas", Some(root)).await;
    let doc = app.register_document(&token, child, "acta.pdf").await;

    let response = app
        .request(
            "GET",
            &format!("/parentFolders/fileId/{doc}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let names: Vec<&str> = response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Sistemas", "Actas"]);
}
