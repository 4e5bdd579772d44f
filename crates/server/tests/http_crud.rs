use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, ServerState};
use service::id_scheme::SequentialScheme;
use service::store::memory::MemStore;
use service::{RecordApi, RecordService};

struct TestApp {
    base_url: String,
}

// Sequential-scheme app over the in-memory store; no external services needed.
async fn start_server() -> anyhow::Result<TestApp> {
    let records: Arc<dyn RecordApi> =
        Arc::new(RecordService::<SequentialScheme, _>::new(MemStore::new()));
    let state = ServerState { records };

    let app: Router = routes::build_router(state, CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn health_reports_ok() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn full_crud_scenario() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // Create
    let res = c
        .post(format!("{}/lists", app.base_url))
        .json(&json!({"list": "buy milk"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "List created successfully");
    assert_eq!(body["data"]["list"], "buy milk");
    let id = body["data"]["id"].as_i64().expect("numeric id");

    // Read back
    let res = c.get(format!("{}/lists/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, json!({"id": id, "list": "buy milk"}));

    // Update
    let res = c
        .put(format!("{}/lists/{}", app.base_url, id))
        .json(&json!({"list": "buy bread"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "List updated successfully");
    assert_eq!(body["data"]["list"], "buy bread");

    let res = c.get(format!("{}/lists/{}", app.base_url, id)).send().await?;
    assert_eq!(res.json::<serde_json::Value>().await?["list"], "buy bread");

    // Delete, then the record is gone
    let res = c.delete(format!("{}/lists/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?["message"], "List deleted successfully");

    let res = c.get(format!("{}/lists/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<serde_json::Value>().await?["error"], "List not found");
    Ok(())
}

#[tokio::test]
async fn listing_returns_created_records_in_order() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    for text in ["alpha", "beta", "gamma"] {
        let res = c
            .post(format!("{}/lists", app.base_url))
            .json(&json!({"list": text}))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
    }

    let res = c.get(format!("{}/lists", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let items = body.as_array().expect("array body");
    assert_eq!(items.len(), 3);
    let texts: Vec<_> = items.iter().map(|i| i["list"].as_str().unwrap()).collect();
    assert_eq!(texts, vec!["alpha", "beta", "gamma"]);
    Ok(())
}

#[tokio::test]
async fn create_rejects_missing_empty_and_invalid_fields() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    for body in [json!({}), json!({"list": ""}), json!({"list": "   "})] {
        let res = c.post(format!("{}/lists", app.base_url)).json(&body).send().await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
        let err = res.json::<serde_json::Value>().await?;
        assert_eq!(err["error"], "List field is required in the request body");
    }

    for body in [json!({"list": 42}), json!({"list": ["x"]}), json!({"list": "z".repeat(201)})] {
        let res = c.post(format!("{}/lists", app.base_url)).json(&body).send().await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
        let err = res.json::<serde_json::Value>().await?;
        assert_eq!(err["error"], "List field must be a string of at most 200 characters");
    }

    // Nothing was persisted by any of the rejected requests
    let res = c.get(format!("{}/lists", app.base_url)).send().await?;
    assert_eq!(res.json::<serde_json::Value>().await?.as_array().unwrap().len(), 0);
    Ok(())
}

#[tokio::test]
async fn malformed_json_body_gets_a_distinct_error() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(format!("{}/lists", app.base_url))
        .header("content-type", "application/json")
        .body("{\"list\": ")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let err = res.json::<serde_json::Value>().await?;
    assert_eq!(err["error"], "Invalid JSON format in request body");
    Ok(())
}

#[tokio::test]
async fn non_numeric_ids_are_rejected_for_sequential_scheme() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    for method in ["get", "put", "delete"] {
        let url = format!("{}/lists/abc", app.base_url);
        let req = match method {
            "get" => c.get(&url),
            "put" => c.put(&url).json(&json!({"list": "x"})),
            _ => c.delete(&url),
        };
        let res = req.send().await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST, "method {method}");
        let err = res.json::<serde_json::Value>().await?;
        assert_eq!(err["error"], "Invalid list ID format");
    }
    Ok(())
}

#[tokio::test]
async fn invalid_id_wins_over_invalid_body_on_update() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .put(format!("{}/lists/abc", app.base_url))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let err = res.json::<serde_json::Value>().await?;
    assert_eq!(err["error"], "Invalid list ID format");
    Ok(())
}

#[tokio::test]
async fn update_and_delete_of_unknown_id_are_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .put(format!("{}/lists/9999", app.base_url))
        .json(&json!({"list": "x"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(format!("{}/lists/9999", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn cors_preflight_is_permitted() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .request(reqwest::Method::OPTIONS, format!("{}/lists", app.base_url))
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "PUT")
        .send()
        .await?;
    assert!(res.status().is_success());
    assert!(res.headers().contains_key("access-control-allow-origin"));
    Ok(())
}
