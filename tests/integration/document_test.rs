//! Integration tests for document upload, download, view, ordering and
//! deletion.

mod helpers;

use axum::http::{StatusCode, header};
use bytes::Bytes;
use docshelf_service::UploadRequest;

#[tokio::test]
async fn test_upload_appends_within_group() {
    let app = helpers::TestApp::new().await;
    let g1 = app.create_group("one").await;
    let g2 = app.create_group("two").await;

    let a = app.upload(&g1, "a.pdf", "application/pdf", b"%PDF-1.4").await;
    let b = app.upload(&g1, "b.txt", "text/plain", b"bee").await;
    let c = app.upload(&g2, "c.png", "image/png", b"png").await;

    assert_eq!(a.status, StatusCode::CREATED);
    assert_eq!(a.body["data"]["display_order"], 1);
    assert_eq!(b.body["data"]["display_order"], 2);
    assert_eq!(c.body["data"]["display_order"], 1);

    assert_eq!(a.body["data"]["name"], "a.pdf");
    assert_eq!(a.body["data"]["file_type"], "application/pdf");
    assert_eq!(a.body["data"]["file_size"], 8);
    assert_eq!(a.body["data"]["category"], "pdf");
    assert_eq!(a.body["data"]["viewable"], true);
    assert_eq!(b.body["data"]["viewable"], false);
    assert!(
        a.body["data"]["file_path"]
            .as_str()
            .unwrap()
            .ends_with("-a.pdf")
    );

    let listed = app
        .request("GET", &format!("/api/groups/{g1}/documents"), None, None)
        .await;
    let names: Vec<&str> = listed.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a.pdf", "b.txt"]);

    let all = app.request("GET", "/api/documents", None, None).await;
    assert_eq!(all.body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_upload_into_missing_group() {
    let app = helpers::TestApp::new().await;
    let missing = docshelf_core::types::GroupId::new().to_string();

    let response = app.upload(&missing, "a.txt", "text/plain", b"x").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(app.state.storage_manager.health_check().await);
}

#[tokio::test]
async fn test_upload_over_limit_is_rejected() {
    let app = helpers::TestApp::new().await;
    let g = app.create_group("G").await;
    let big = vec![b'x'; 1024 * 1024 + 1];

    let response = app.upload(&g, "big.bin", "application/octet-stream", &big).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let listed = app
        .request("GET", &format!("/api/groups/{g}/documents"), None, None)
        .await;
    assert!(listed.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_download_returns_attachment() {
    let app = helpers::TestApp::new().await;
    let g = app.create_group("G").await;
    let up = app.upload(&g, "notes.txt", "text/plain", b"hello shelf").await;
    let id = up.body["data"]["id"].as_str().unwrap();

    let (status, headers, bytes) = app.get_raw(&format!("/api/documents/{id}/download")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/plain");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"notes.txt\""
    );
    assert_eq!(&bytes[..], b"hello shelf");
}

#[tokio::test]
async fn test_download_of_name_with_control_character() {
    let app = helpers::TestApp::new().await;
    let g = app.create_group("G").await;
    let doc = app
        .state
        .document_service
        .upload(UploadRequest {
            group_id: g.parse().unwrap(),
            file_name: "tab\u{1}le.csv".to_string(),
            content_type: Some("text/csv\u{0}".to_string()),
            data: Bytes::from_static(b"a,b"),
        })
        .await
        .unwrap();

    let (status, headers, bytes) = app
        .get_raw(&format!("/api/documents/{}/download", doc.id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/octet-stream");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"tab_le.csv\"; filename*=UTF-8''tab%01le.csv"
    );
    assert_eq!(&bytes[..], b"a,b");
}

#[tokio::test]
async fn test_view_link_resolves_to_public_route() {
    let app = helpers::TestApp::new().await;
    let g = app.create_group("G").await;
    let up = app.upload(&g, "photo.png", "image/png", b"not really a png").await;
    let id = up.body["data"]["id"].as_str().unwrap();
    let key = up.body["data"]["file_path"].as_str().unwrap();

    let view = app
        .request("GET", &format!("/api/documents/{id}/view"), None, None)
        .await;
    assert_eq!(view.status, StatusCode::OK);
    assert_eq!(view.body["data"]["category"], "image");
    assert_eq!(view.body["data"]["viewable"], true);
    let url = view.body["data"]["url"].as_str().unwrap();
    assert_eq!(url, format!("http://localhost:8080/public/{key}"));

    let (status, headers, bytes) = app.get_raw(&format!("/public/{key}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/png");
    assert_eq!(&bytes[..], b"not really a png");
}

#[tokio::test]
async fn test_document_moves_stay_within_group() {
    let app = helpers::TestApp::new().await;
    let g1 = app.create_group("one").await;
    let g2 = app.create_group("two").await;
    let a = app.upload(&g1, "a.txt", "text/plain", b"a").await;
    app.upload(&g2, "x.txt", "text/plain", b"x").await;
    app.upload(&g1, "b.txt", "text/plain", b"b").await;
    let a_id = a.body["data"]["id"].as_str().unwrap();

    let response = app
        .request("POST", &format!("/api/documents/{a_id}/move-down"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["moved"], true);

    let names = |body: &serde_json::Value| -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap().to_string())
            .collect()
    };
    let g1_docs = app
        .request("GET", &format!("/api/groups/{g1}/documents"), None, None)
        .await;
    assert_eq!(names(&g1_docs.body), vec!["b.txt", "a.txt"]);

    let response = app
        .request("POST", &format!("/api/documents/{a_id}/move-down"), None, None)
        .await;
    assert_eq!(response.body["data"]["moved"], false);

    let g2_docs = app
        .request("GET", &format!("/api/groups/{g2}/documents"), None, None)
        .await;
    assert_eq!(g2_docs.body["data"][0]["display_order"], 1);
}

#[tokio::test]
async fn test_move_unknown_document_is_noop() {
    let app = helpers::TestApp::new().await;
    let id = docshelf_core::types::DocumentId::new();
    let response = app
        .request("POST", &format!("/api/documents/{id}/move-up"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["moved"], false);
}

#[tokio::test]
async fn test_delete_document_removes_record_and_object() {
    let app = helpers::TestApp::new().await;
    let g = app.create_group("G").await;
    let up = app.upload(&g, "a.txt", "text/plain", b"a").await;
    let id = up.body["data"]["id"].as_str().unwrap();
    let key = up.body["data"]["file_path"].as_str().unwrap();

    let response = app
        .request("DELETE", &format!("/api/documents/{id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let token = app.admin_token().await;
    let response = app
        .request("DELETE", &format!("/api/documents/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let missing = app
        .request("GET", &format!("/api/documents/{id}/view"), None, None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert!(!app.state.storage_manager.exists(key).await.unwrap());
}

#[tokio::test]
async fn test_renumber_documents() {
    let app = helpers::TestApp::new().await;
    let g = app.create_group("G").await;
    let a = app.upload(&g, "a.txt", "text/plain", b"a").await;
    app.upload(&g, "b.txt", "text/plain", b"b").await;
    app.upload(&g, "c.txt", "text/plain", b"c").await;
    let a_id = a.body["data"]["id"].as_str().unwrap();

    let token = app.admin_token().await;
    app.request("DELETE", &format!("/api/documents/{a_id}"), None, Some(&token))
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/groups/{g}/documents/renumber"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["updated"], 2);

    let listed = app
        .request("GET", &format!("/api/groups/{g}/documents"), None, None)
        .await;
    let orders: Vec<i64> = listed.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["display_order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![1, 2]);
}

#[tokio::test]
async fn test_health_reports_memory_backends() {
    let app = helpers::TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"]["backend"], "memory");
    assert_eq!(response.body["data"]["storage"]["backend"], "memory");
}
