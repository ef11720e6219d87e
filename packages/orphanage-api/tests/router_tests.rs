//! Router contract tests.
//!
//! Requests are fed straight into `Router::route` with in-memory bodies;
//! no socket is involved.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request};
use serde_json::{json, Value};

use orphanage_api::config::ApiConfig;
use orphanage_api::router::Router;
use orphanage_store::{Store, StoreConfig};

fn router() -> Router {
    router_with(ApiConfig::default())
}

fn router_with(config: ApiConfig) -> Router {
    let store = Store::open(&StoreConfig::default()).unwrap();
    Router::new(store, config)
}

/// Sends a request and returns the status and decoded JSON body.
async fn send(router: &Router, method: Method, path: &str, body: Option<Value>) -> (u16, Value) {
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body.to_string()))),
        None => builder.body(Full::new(Bytes::new())),
    }
    .unwrap();

    let response = router.route(request).await;
    let status = response.status().as_u16();
    let body = response.into_body();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

async fn create_employee(router: &Router, name: &str) -> i64 {
    let (status, body) = send(
        router,
        Method::POST,
        "/employees",
        Some(json!({"name": name, "role": "Cook", "salary": 1500})),
    )
    .await;
    assert_eq!(status, 201, "create failed: {body}");
    body["id"].as_i64().unwrap()
}

async fn list_len(router: &Router, path: &str) -> usize {
    let (status, body) = send(router, Method::GET, path, None).await;
    assert_eq!(status, 200);
    body["data"].as_array().unwrap().len()
}

#[tokio::test]
async fn test_employee_lifecycle_scenario() {
    let router = router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/employees",
        Some(json!({"name": "Ana", "role": "Cook", "salary": 1500})),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body, json!({"id": 1}));

    let (status, body) = send(&router, Method::GET, "/employees/1", None).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"data": {"id": 1, "name": "Ana", "role": "Cook", "salary": 1500}})
    );

    let (status, body) = send(&router, Method::DELETE, "/employees/1", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"message": "Employee deleted"}));

    let (status, body) = send(&router, Method::GET, "/employees/1", None).await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({"error": "Employee not found"}));
}

#[tokio::test]
async fn test_child_create_then_read_returns_submitted_fields() {
    let router = router();
    let child = json!({"name": "Bia", "age": 7, "history": "Arrived in March"});

    let (status, body) = send(&router, Method::POST, "/children", Some(child.clone())).await;
    assert_eq!(status, 201);
    let id = body["id"].as_i64().unwrap();

    let (status, body) = send(&router, Method::GET, &format!("/children/{id}"), None).await;
    assert_eq!(status, 200);
    let mut expected = child;
    expected["id"] = json!(id);
    assert_eq!(body["data"], expected);
}

#[tokio::test]
async fn test_list_wraps_rows_in_data() {
    let router = router();

    let (status, body) = send(&router, Method::GET, "/children", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"data": []}));

    create_employee(&router, "Ana").await;
    create_employee(&router, "Rui").await;

    let (_, body) = send(&router, Method::GET, "/employees", None).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Ana", "Rui"]);
}

#[tokio::test]
async fn test_list_after_creates_and_deletes() {
    let router = router();
    let mut ids = Vec::new();
    for name in ["a", "b", "c", "d", "e"] {
        ids.push(create_employee(&router, name).await);
    }

    for id in &ids[1..3] {
        let (status, _) = send(&router, Method::DELETE, &format!("/employees/{id}"), None).await;
        assert_eq!(status, 200);
    }

    assert_eq!(list_len(&router, "/employees").await, 3);
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let router = router();
    let id = create_employee(&router, "Ana").await;

    let (status, body) = send(
        &router,
        Method::PUT,
        &format!("/employees/{id}"),
        Some(json!({"name": "Ana Maria", "role": "Head cook", "salary": 1750.5})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"message": "Employee updated"}));

    let (_, body) = send(&router, Method::GET, &format!("/employees/{id}"), None).await;
    assert_eq!(
        body["data"],
        json!({"id": id, "name": "Ana Maria", "role": "Head cook", "salary": 1750.5})
    );
}

#[tokio::test]
async fn test_update_missing_child_is_not_found() {
    let router = router();

    let (status, body) = send(
        &router,
        Method::PUT,
        "/children/99",
        Some(json!({"name": "Caio", "age": 5, "history": "-"})),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({"error": "Child not found"}));
    assert_eq!(list_len(&router, "/children").await, 0);
}

#[tokio::test]
async fn test_update_missing_employee_leaves_table_unchanged() {
    let router = router();
    let id = create_employee(&router, "Ana").await;

    let (status, _) = send(
        &router,
        Method::PUT,
        "/employees/42",
        Some(json!({"name": "Rui", "role": "Driver", "salary": 900})),
    )
    .await;
    assert_eq!(status, 404);

    let (_, body) = send(&router, Method::GET, &format!("/employees/{id}"), None).await;
    assert_eq!(body["data"]["name"], "Ana");
    assert_eq!(list_len(&router, "/employees").await, 1);
}

#[tokio::test]
async fn test_delete_missing_id_is_not_found() {
    let router = router();
    create_employee(&router, "Ana").await;

    let (status, body) = send(&router, Method::DELETE, "/employees/7", None).await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({"error": "Employee not found"}));
    assert_eq!(list_len(&router, "/employees").await, 1);
}

#[tokio::test]
async fn test_create_missing_field_is_bad_request() {
    let router = router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/children",
        Some(json!({"name": "Bia", "history": "-"})),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("NOT NULL"));
    assert_eq!(list_len(&router, "/children").await, 0);
}

#[tokio::test]
async fn test_create_without_json_body_is_bad_request() {
    let router = router();

    let (status, body) = send(&router, Method::POST, "/employees", None).await;
    assert_eq!(status, 400);
    assert!(body["error"].is_string());
    assert_eq!(list_len(&router, "/employees").await, 0);
}

#[tokio::test]
async fn test_update_with_missing_field_is_bad_request() {
    let router = router();
    let id = create_employee(&router, "Ana").await;

    let (status, _) = send(
        &router,
        Method::PUT,
        &format!("/employees/{id}"),
        Some(json!({"name": "Ana"})),
    )
    .await;
    assert_eq!(status, 400);

    let (_, body) = send(&router, Method::GET, &format!("/employees/{id}"), None).await;
    assert_eq!(body["data"]["role"], "Cook");
}

#[tokio::test]
async fn test_wrong_value_type_is_bad_request() {
    let router = router();

    let (status, _) = send(
        &router,
        Method::POST,
        "/children",
        Some(json!({"name": "Bia", "age": "seven", "history": "-"})),
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_extra_fields_are_ignored() {
    let router = router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/children",
        Some(json!({"id": 50, "name": "Bia", "age": 7, "history": "-", "nickname": "B"})),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["id"], 1);

    let (_, body) = send(&router, Method::GET, "/children/1", None).await;
    assert!(body["data"].get("nickname").is_none());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let router = router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/employees")
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from_static(b"{\"name\": ")))
        .unwrap();

    let response = router.route(request).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let router = router_with(ApiConfig { max_body_bytes: 64 });
    let history = "x".repeat(256);

    let (status, _) = send(
        &router,
        Method::POST,
        "/children",
        Some(json!({"name": "Bia", "age": 7, "history": history})),
    )
    .await;
    assert_eq!(status, 413);
    assert_eq!(list_len(&router, "/children").await, 0);
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let router = router();
    create_employee(&router, "Ana").await;

    let (status, _) = send(&router, Method::GET, "/employees/abc", None).await;
    assert_eq!(status, 404);
    let (status, _) = send(&router, Method::DELETE, "/employees/abc", None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_unknown_route_and_method() {
    let router = router();

    let (status, body) = send(&router, Method::GET, "/volunteers", None).await;
    assert_eq!(status, 404);
    assert!(body["error"].as_str().unwrap().contains("/volunteers"));

    let (status, _) = send(&router, Method::PATCH, "/employees/1", None).await;
    assert_eq!(status, 405);
    let (status, _) = send(&router, Method::DELETE, "/children", None).await;
    assert_eq!(status, 405);
}

#[tokio::test]
async fn test_trailing_slash_is_ignored() {
    let router = router();
    let id = create_employee(&router, "Ana").await;

    assert_eq!(list_len(&router, "/employees/").await, 1);

    let (status, body) = send(&router, Method::GET, &format!("/employees/{id}/"), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["name"], "Ana");

    let (status, _) = send(&router, Method::DELETE, &format!("/employees/{id}/"), None).await;
    assert_eq!(status, 200);
    assert_eq!(list_len(&router, "/employees").await, 0);
}

#[tokio::test]
async fn test_resources_are_independent() {
    let router = router();
    create_employee(&router, "Ana").await;

    let (status, _) = send(&router, Method::GET, "/children/1", None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_openapi_document_enumerates_endpoints() {
    let router = router();

    let (status, doc) = send(&router, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, 200);
    assert_eq!(doc["info"]["title"], "Orphanage API");

    let paths = doc["paths"].as_object().unwrap();
    for path in ["/employees", "/children"] {
        assert!(paths[path].get("get").is_some());
        assert!(paths[path].get("post").is_some());
    }
    for path in ["/employees/{id}", "/children/{id}"] {
        for verb in ["get", "put", "delete"] {
            assert!(paths[path].get(verb).is_some(), "{verb} {path}");
        }
    }
    assert_eq!(
        doc["components"]["schemas"]["Employee"]["required"],
        json!(["name", "role", "salary"])
    );
}

#[tokio::test]
async fn test_docs_page_is_html() {
    let router = router();
    let request = Request::builder()
        .uri("/api-docs")
        .body(Full::new(Bytes::new()))
        .unwrap();

    let response = router.route(request).await;
    assert_eq!(response.status().as_u16(), 200);
    let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let page = String::from_utf8(response.into_body().to_vec()).unwrap();
    assert!(page.contains("/api-docs/openapi.json"));
    assert!(page.contains(r##"dom_id: "#swagger-ui""##));
    assert!(page.trim_end().ends_with("</html>"));
}
