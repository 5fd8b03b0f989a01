//! Integration tests for group listing, ordering and deletion.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_groups_append_in_order() {
    let app = helpers::TestApp::new().await;
    for name in ["Contracts", "Invoices", "Reports"] {
        app.create_group(name).await;
    }

    let response = app.request("GET", "/api/groups", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);

    let orders: Vec<i64> = response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["display_order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_create_group_rejects_empty_name() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/groups",
            Some(serde_json::json!({ "name": "" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .request(
            "POST",
            "/api/groups",
            Some(serde_json::json!({ "name": "   " })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.group_names().await.is_empty());
}

#[tokio::test]
async fn test_move_up_swaps_with_predecessor() {
    let app = helpers::TestApp::new().await;
    app.create_group("A").await;
    let b = app.create_group("B").await;
    let c = app.create_group("C").await;

    let response = app
        .request("POST", &format!("/api/groups/{c}/move-up"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["moved"], true);

    let writes = response.body["data"]["writes"].as_array().unwrap();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0]["id"], c.as_str());
    assert_eq!(writes[0]["display_order"], 2);
    assert_eq!(writes[1]["id"], b.as_str());
    assert_eq!(writes[1]["display_order"], 3);

    assert_eq!(app.group_names().await, vec!["A", "C", "B"]);
}

#[tokio::test]
async fn test_boundary_moves_are_noops() {
    let app = helpers::TestApp::new().await;
    let a = app.create_group("A").await;
    let b = app.create_group("B").await;

    let response = app
        .request("POST", &format!("/api/groups/{a}/move-up"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["moved"], false);
    assert!(response.body["data"]["writes"].as_array().unwrap().is_empty());

    let response = app
        .request("POST", &format!("/api/groups/{b}/move-down"), None, None)
        .await;
    assert_eq!(response.body["data"]["moved"], false);

    assert_eq!(app.group_names().await, vec!["A", "B"]);
}

#[tokio::test]
async fn test_up_then_down_restores_order() {
    let app = helpers::TestApp::new().await;
    for name in ["A", "B", "C"] {
        app.create_group(name).await;
    }
    let before = app.request("GET", "/api/groups", None, None).await.body;
    let b = before["data"][1]["id"].as_str().unwrap().to_string();

    app.request("POST", &format!("/api/groups/{b}/move-up"), None, None)
        .await;
    app.request("POST", &format!("/api/groups/{b}/move-down"), None, None)
        .await;

    let after = app.request("GET", "/api/groups", None, None).await.body;
    assert_eq!(before["data"], after["data"]);
}

#[tokio::test]
async fn test_move_with_malformed_id() {
    let app = helpers::TestApp::new().await;
    let response = app
        .request("POST", "/api/groups/not-an-id/move-up", None, None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_requires_admin() {
    let app = helpers::TestApp::new().await;
    let g = app.create_group("G").await;

    let response = app
        .request("DELETE", &format!("/api/groups/{g}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("DELETE", &format!("/api/groups/{g}"), None, Some("garbage"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let token = app.admin_token().await;
    let response = app
        .request("DELETE", &format!("/api/groups/{g}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(app.group_names().await.is_empty());
}

#[tokio::test]
async fn test_delete_non_empty_group_conflicts() {
    let app = helpers::TestApp::new().await;
    let g = app.create_group("G").await;
    let upload = app.upload(&g, "a.txt", "text/plain", b"hello").await;
    assert_eq!(upload.status, StatusCode::CREATED);

    let token = app.admin_token().await;
    let response = app
        .request("DELETE", &format!("/api/groups/{g}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(app.group_names().await, vec!["G"]);
}

#[tokio::test]
async fn test_renumber_compacts_order() {
    let app = helpers::TestApp::new().await;
    let a = app.create_group("A").await;
    app.create_group("B").await;
    app.create_group("C").await;

    let token = app.admin_token().await;
    app.request("DELETE", &format!("/api/groups/{a}"), None, Some(&token))
        .await;

    let response = app
        .request("POST", "/api/groups/renumber", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["updated"], 2);

    let orders: Vec<i64> = app.request("GET", "/api/groups", None, None).await.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["display_order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![1, 2]);
}

#[tokio::test]
async fn test_renumber_requires_admin() {
    let app = helpers::TestApp::new().await;
    let response = app.request("POST", "/api/groups/renumber", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
