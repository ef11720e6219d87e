//! API documentation handlers.

use hyper::{body::Bytes, Response};

use crate::router::{AppState, RouterError, DOCS_JSON_PATH};

use super::request_utils::build_response;

const SWAGGER_UI_VERSION: &str = "5";

/// Serves the generated OpenAPI document.
///
/// # Endpoint
/// `GET /api-docs/openapi.json`
pub fn openapi_json(state: &AppState) -> Result<Response<Bytes>, RouterError> {
    build_response(200, "application/json", state.docs.clone())
}

/// Serves a Swagger UI page that renders the OpenAPI document.
///
/// # Endpoint
/// `GET /api-docs`
pub fn docs_ui() -> Result<Response<Bytes>, RouterError> {
    let page = format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Orphanage API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{v}/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@{v}/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({{ url: "{url}", dom_id: "#swagger-ui" }});
  </script>
</body>
</html>
"##,
        v = SWAGGER_UI_VERSION,
        url = DOCS_JSON_PATH,
    );
    build_response(200, "text/html; charset=utf-8", page)
}
