//! Integration tests for folder operations.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn create_folder_builds_path() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let root = app.create_folder(&token, "Sistemas", None).await;
    let child = app.create_folder(&token, "Actas", Some(root)).await;

    assert_eq!(app.path_of(root).await, "/Sistemas");
    assert_eq!(app.path_of(child).await, "/Sistemas/Actas");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn folder_endpoints_require_a_token() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/folders", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body.get("error").is_some());
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn short_names_are_rejected() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let response = app
        .request(
            "POST",
            "/folders",
            Some(json!({ "Nombre": "ab" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn rename_cascades_to_descendant_paths() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let root = app.create_folder(&token, "Sistemas", None).await;
    let child = app.create_folder(&token, "Actas", Some(root)).await;
    let grandchild = app.create_folder(&token, "2021", Some(child)).await;

    let response = app
        .request(
            "PUT",
            &format!("/folders/{root}"),
            Some(json!({ "Nombre": "Industrial" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    assert_eq!(app.path_of(root).await, "/Industrial");
    assert_eq!(app.path_of(child).await, "/Industrial/Actas");
    assert_eq!(app.path_of(grandchild).await, "/Industrial/Actas/2021");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn move_into_descendant_is_a_conflict() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let root = app.create_folder(&token, "Sistemas", None).await;
    let child = app.create_folder(&token, "Actas", Some(root)).await;

    let response = app
        .request(
            "PATCH",
            &format!("/folders/{root}"),
            Some(json!({ "IdCarpetaPadre": child })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    // Paths must be untouched after the rejected move.
    assert_eq!(app.path_of(root).await, "/Sistemas");
    assert_eq!(app.path_of(child).await, "/Sistemas/Actas");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn move_to_null_detaches_to_root() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let root = app.create_folder(&token, "Sistemas", None).await;
    let child = app.create_folder(&token, "Actas", Some(root)).await;

    let response = app
        .request(
            "PATCH",
            &format!("/folders/{child}"),
            Some(json!({ "IdCarpetaPadre": null })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.path_of(child).await, "/Actas");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn delete_non_empty_folder_is_a_conflict() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let root = app.create_folder(&token, "Sistemas", None).await;
    let child = app.create_folder(&token, "Actas", Some(root)).await;

    let response = app
        .request("DELETE", &format!("/folders/{root}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    // Empty the folder, then the delete goes through.
    let response = app
        .request("DELETE", &format!("/folders/{child}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("DELETE", &format!("/folders/{root}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Soft-deleted: the row survives but reads return 404.
    let response = app
        .request("GET", &format!("/folders/{root}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn children_are_merged_folders_then_documents() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let root = app.create_folder(&token, "Sistemas", None).await;
    app.create_folder(&token, "Actas", Some(root)).await;
    app.register_document(&token, root, "acta.pdf").await;

    let response = app
        .request(
            "GET",
            &format!("/folders/{root}/children"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["kind"], "Folder");
    assert_eq!(items[1]["kind"], "Document");
    assert_eq!(response.body["data"]["total_items"], 2);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn invalid_pagination_is_rejected() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let response = app
        .request("GET", "/folders?page=0", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("GET", "/folders?page_size=500", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn scoped_folders_are_hidden_from_other_programs() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user-a", &[7]);

    let response = app
        .request(
            "POST",
            "/folders",
            Some(json!({ "Nombre": "Privado", "IdPrograma": 7 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["data"]["id"].as_i64().unwrap();

    // A caller from another program sees neither the folder nor its listing entry.
    let outsider = app.token_for("user-b", &[3]);
    let response = app
        .request("GET", &format!("/folders/{id}"), None, Some(&outsider))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("GET", "/folders", None, Some(&outsider)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total_items"], 0);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn ancestor_chain_matches_path() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let root = app.create_folder(&token, "Sistemas", None).await;
    let child = app.create_folder(&token, "Actas", Some(root)).await;
    let grandchild = app.create_folder(&token, "2021", Some(child)).await;

    let response = app
        .request(
            "GET",
            &format!("/parentFolders/folderId/{grandchild}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let chain = response.body["data"].as_array().unwrap();
    let names: Vec<&str> = chain.iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Sistemas", "Actas"]);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn foreign_program_scope_is_forbidden() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("member", &[3]);

    let response = app
        .request(
            "POST",
            "/folders",
            Some(json!({ "Nombre": "Actas", "IdPrograma": 7 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            "/folders",
            Some(json!({ "Nombre": "Actas", "IdPrograma": 3 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["program_id"], 3);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn failed_cascade_rolls_back_every_path() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let root = app.create_folder(&token, "Sistemas", None).await;
    let child = app.create_folder(&token, "Actas", Some(root)).await;
    let grandchild = app.create_folder(&token, "2021", Some(child)).await;

    // Make the deepest descendant refuse path updates so the cascade
    // dies after the first rows were already rewritten.
    sqlx::query(
        "CREATE OR REPLACE FUNCTION reject_path_update() RETURNS trigger AS \
         $$ BEGIN RAISE EXCEPTION 'path update rejected'; END; $$ LANGUAGE plpgsql",
    )
    .execute(&app.db_pool)
    .await
    .expect("Failed to create trigger function");
    sqlx::query(&format!(
        "CREATE TRIGGER folders_reject_path_update \
         BEFORE UPDATE OF path ON folders \
         FOR EACH ROW WHEN (NEW.id = {grandchild}) \
         EXECUTE FUNCTION reject_path_update()"
    ))
    .execute(&app.db_pool)
    .await
    .expect("Failed to create trigger");

    let response = app
        .request(
            "PUT",
            &format!("/folders/{root}"),
            Some(json!({ "Nombre": "Industrial" })),
            Some(&token),
        )
        .await;

    sqlx::query("DROP TRIGGER IF EXISTS folders_reject_path_update ON folders")
        .execute(&app.db_pool)
        .await
        .expect("Failed to drop trigger");
    sqlx::query("DROP FUNCTION IF EXISTS reject_path_update")
        .execute(&app.db_pool)
        .await
        .expect("Failed to drop trigger function");

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);

    // Nothing in the subtree changed, the renamed root included.
    assert_eq!(app.path_of(root).await, "/Sistemas");
    assert_eq!(app.path_of(child).await, "/Sistemas/Actas");
    assert_eq!(app.path_of(grandchild).await, "/Sistemas/Actas/2021");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn concurrent_renames_leave_paths_consistent() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("user", &[]);

    let root = app.create_folder(&token, "Sistemas", None).await;
    let child = app.create_folder(&token, "Actas", Some(root)).await;

    let path = format!("/folders/{root}");
    let first = app.request(
        "PUT",
        &path,
        Some(json!({ "Nombre": "Industrial" })),
        Some(&token),
    );
    let second = app.request(
        "PUT",
        &path,
        Some(json!({ "Nombre": "Mecanica" })),
        Some(&token),
    );
    let (first, second) = tokio::join!(first, second);
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);

    // Whichever rename committed last won; the subtree must agree with it.
    let name: String = sqlx::query_scalar("SELECT name FROM folders WHERE id = $1")
        .bind(root)
        .fetch_one(&app.db_pool)
        .await
        .expect("Folder missing");
    assert!(name == "Industrial" || name == "Mecanica");
    assert_eq!(app.path_of(root).await, format!("/{name}"));
    assert_eq!(app.path_of(child).await, format!("/{name}/Actas"));
}
