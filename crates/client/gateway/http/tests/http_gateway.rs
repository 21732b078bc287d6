use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};

use client_gateway_core::{
    DirectoryReader, HistoryQuery, HistoryReader, PointsWriter, RequestErrorKind, UserId,
};
use client_gateway_http::{GatewayConfig, HttpGateway};

/// Serve `router` on an ephemeral port and return a gateway pointed at it.
async fn gateway_for(router: Router) -> HttpGateway {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    HttpGateway::new(GatewayConfig::new(format!("http://{}", addr)).unwrap())
}

fn happy_router() -> Router {
    Router::new()
        .route(
            "/api/users",
            get(|| async {
                Json(json!([
                    {"id": "u1", "name": "Ada", "totalPoints": 12},
                    {"id": "u2", "name": "Bo", "totalPoints": 3}
                ]))
            })
            .post(|Json(body): Json<Value>| async move {
                Json(json!({"id": "u9", "name": body["name"], "totalPoints": 0}))
            }),
        )
        .route(
            "/api/users/leaderboard",
            get(|| async {
                Json(json!([
                    {"rank": 1, "userId": "u1", "name": "Ada", "totalPoints": 12},
                    {"rank": 2, "userId": "u2", "name": "Bo", "totalPoints": 3}
                ]))
            }),
        )
        .route(
            "/api/users/claim",
            post(|Json(body): Json<Value>| async move {
                Json(json!({"userId": body["userId"], "points": 7, "totalPoints": 19}))
            }),
        )
        .route(
            "/api/users/history",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                // Echo the query back through `total` so the test can see it.
                let page: u64 = params["page"].parse().unwrap();
                let limit: u64 = params["limit"].parse().unwrap();
                Json(json!({
                    "items": [{
                        "id": "h1", "userId": "u1", "userName": "Ada",
                        "points": 4, "timestamp": "2025-01-02T03:04:05Z"
                    }],
                    "total": page * 100 + limit
                }))
            }),
        )
        .route(
            "/api/users/history/:id",
            get(|Path(id): Path<String>| async move {
                let total = match id.as_str() {
                    "u2" => 1,
                    "team/a?b#c" => 2,
                    _ => 0,
                };
                Json(json!({"items": [], "total": total}))
            }),
        )
}

#[tokio::test]
async fn reads_decode_server_payloads() {
    let gateway = gateway_for(happy_router()).await;

    let users = gateway.list_users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].total_points, 12);

    let rows = gateway.leaderboard().await.unwrap();
    assert_eq!(rows[1].rank, 2);
    assert_eq!(rows[1].user_id, UserId::from("u2"));
}

#[tokio::test]
async fn history_sends_page_and_limit() {
    let gateway = gateway_for(happy_router()).await;

    let page = gateway.history(HistoryQuery::new(3, 10)).await.unwrap();
    assert_eq!(page.total, 310);
    assert_eq!(page.items[0].user_name, "Ada");

    let own = gateway
        .user_history(&UserId::from("u2"), HistoryQuery::new(1, 10))
        .await
        .unwrap();
    assert_eq!(own.total, 1);
}

#[tokio::test]
async fn user_ids_stay_one_path_segment() {
    let gateway = gateway_for(happy_router()).await;

    let page = gateway
        .user_history(&UserId::from("team/a?b#c"), HistoryQuery::new(1, 5))
        .await
        .unwrap();
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn writes_send_json_bodies() {
    let gateway = gateway_for(happy_router()).await;

    let created = gateway.create_user("Alice").await.unwrap();
    assert_eq!(created.id, UserId::from("u9"));
    assert_eq!(created.name, "Alice");

    let outcome = gateway.claim(&UserId::from("u1")).await.unwrap();
    assert_eq!(outcome.user_id, UserId::from("u1"));
    assert_eq!((outcome.points, outcome.total_points), (7, 19));
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let router = Router::new().route(
        "/api/users",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Name is required"})),
            )
        }),
    );
    let gateway = gateway_for(router).await;

    let err = gateway.create_user("").await.unwrap_err();
    assert_eq!(err.kind(), RequestErrorKind::Status(400));
    assert_eq!(err.message(), "Name is required");
}

#[tokio::test]
async fn non_json_error_falls_back_to_status_text() {
    let router = Router::new().route(
        "/api/users/claim",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "stack trace here") }),
    );
    let gateway = gateway_for(router).await;

    let err = gateway.claim(&UserId::from("u1")).await.unwrap_err();
    assert_eq!(err.kind(), RequestErrorKind::Status(500));
    assert_eq!(err.message(), "Internal Server Error");
}

#[tokio::test]
async fn json_error_without_message_leaves_fallback_to_caller() {
    let router = Router::new().route(
        "/api/users/leaderboard",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(json!({}))) }),
    );
    let gateway = gateway_for(router).await;

    let err = gateway.leaderboard().await.unwrap_err();
    assert_eq!(err.message(), "");
    assert_eq!(err.message_or("Failed to load data"), "Failed to load data");
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let router = Router::new().route("/api/users", get(|| async { "not json" }));
    let gateway = gateway_for(router).await;

    let err = gateway.list_users().await.unwrap_err();
    assert_eq!(err.kind(), RequestErrorKind::Decode);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = HttpGateway::new(GatewayConfig::new(format!("http://{}", addr)).unwrap());

    let err = gateway.list_users().await.unwrap_err();
    assert_eq!(err.kind(), RequestErrorKind::Network);
    assert_eq!(err.message_or("Failed to load data"), "Failed to load data");
}
