//! Matchit routing configuration.

use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use matchit::Router as MatchitRouter;

use crate::config::ApiConfig;
use crate::docs;
use crate::handlers::{self, request_utils::BoxError};
use orphanage_store::{Store, Table};

/// A CRUD resource exposed over HTTP, backed by one store table.
#[derive(Debug, Clone, Copy)]
pub struct Resource {
    /// Backing table
    pub table: Table,
    /// Collection route (list, create)
    pub collection_path: &'static str,
    /// Item route (get, update, delete)
    pub item_path: &'static str,
    /// Documentation tag
    pub tag: &'static str,
}

/// Every resource served by the API.
pub const RESOURCES: [Resource; 2] = [
    Resource {
        table: Table::Employee,
        collection_path: "/employees",
        item_path: "/employees/{id}",
        tag: "Employees",
    },
    Resource {
        table: Table::Child,
        collection_path: "/children",
        item_path: "/children/{id}",
        tag: "Children",
    },
];

/// Path of the rendered documentation page.
pub const DOCS_UI_PATH: &str = "/api-docs";
/// Path of the machine-readable API description.
pub const DOCS_JSON_PATH: &str = "/api-docs/openapi.json";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Store handle
    pub store: Store,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Serialized OpenAPI document
    pub docs: Bytes,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a router serving every resource in [`RESOURCES`] plus the
    /// documentation endpoints.
    pub fn new(store: Store, config: ApiConfig) -> Self {
        let mut router = MatchitRouter::new();

        for resource in RESOURCES {
            router
                .insert(resource.collection_path, RouteHandler::Collection(resource.table))
                .expect("Failed to insert collection route");
            router
                .insert(resource.item_path, RouteHandler::Item(resource.table))
                .expect("Failed to insert item route");
        }

        router
            .insert(DOCS_UI_PATH, RouteHandler::DocsUi)
            .expect("Failed to insert docs UI route");
        router
            .insert(DOCS_JSON_PATH, RouteHandler::DocsJson)
            .expect("Failed to insert docs JSON route");

        let docs = Bytes::from(docs::openapi_document(&RESOURCES).to_string());

        Self {
            inner: router,
            state: AppState {
                store,
                config: Arc::new(config),
                docs,
            },
        }
    }

    /// Routes an incoming request to the appropriate handler.
    ///
    /// Handler failures are rendered as JSON error responses; this never
    /// fails.
    pub async fn route<B>(&self, req: Request<B>) -> Response<Bytes>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        match self.dispatch(req).await {
            Ok(response) => response,
            Err(err) => err.into(),
        }
    }

    async fn dispatch<B>(&self, req: Request<B>) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let path = req.uri().path().to_string();
        // One trailing slash is ignored.
        let lookup = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path.as_str(),
        };

        match self.inner.at(lookup) {
            Ok(matched) => {
                let id = matched.params.get("id").map(handlers::decode_path_param).transpose()?;
                matched.value.handle(req, id, &self.state).await
            }
            Err(_) => Err(RouterError::NotFound(format!("No route found for {}", path))),
        }
    }
}

/// Route handler function.
#[derive(Debug, Clone, Copy)]
enum RouteHandler {
    Collection(Table),
    Item(Table),
    DocsUi,
    DocsJson,
}

impl RouteHandler {
    /// Handles a request with the decoded `{id}` parameter, if any.
    async fn handle<B>(
        &self,
        req: Request<B>,
        id: Option<String>,
        state: &AppState,
    ) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let method = req.method().clone();
        match (*self, id) {
            (RouteHandler::Collection(table), _) => match method {
                Method::GET => handlers::list_rows(table, state).await,
                Method::POST => handlers::create_row(req, table, state).await,
                _ => Err(RouterError::MethodNotAllowed),
            },
            (RouteHandler::Item(table), Some(id)) => match method {
                Method::GET => handlers::get_row(table, &id, state).await,
                Method::PUT => handlers::update_row(req, table, &id, state).await,
                Method::DELETE => handlers::delete_row(table, &id, state).await,
                _ => Err(RouterError::MethodNotAllowed),
            },
            (RouteHandler::Item(_), None) => {
                Err(RouterError::InternalError("Missing id parameter".to_string()))
            }
            (RouteHandler::DocsUi, _) if method == Method::GET => handlers::docs_ui(),
            (RouteHandler::DocsJson, _) if method == Method::GET => handlers::openapi_json(state),
            (RouteHandler::DocsUi | RouteHandler::DocsJson, _) => Err(RouterError::MethodNotAllowed),
        }
    }
}

/// Router error type.
#[derive(Debug)]
pub enum RouterError {
    MethodNotAllowed,
    InternalError(String),
    BadRequest(String),
    NotFound(String),
    PayloadTooLarge(String),
}

impl RouterError {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            RouterError::MethodNotAllowed => 405,
            RouterError::InternalError(_) => 500,
            RouterError::BadRequest(_) => 400,
            RouterError::NotFound(_) => 404,
            RouterError::PayloadTooLarge(_) => 413,
        }
    }

    /// Message rendered in the `error` field of the response body.
    pub fn message(&self) -> &str {
        match self {
            RouterError::MethodNotAllowed => "Method Not Allowed",
            RouterError::InternalError(msg)
            | RouterError::BadRequest(msg)
            | RouterError::NotFound(msg)
            | RouterError::PayloadTooLarge(msg) => msg,
        }
    }
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            RouterError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            RouterError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            RouterError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            RouterError::PayloadTooLarge(msg) => write!(f, "Payload Too Large: {}", msg),
        }
    }
}

impl std::error::Error for RouterError {}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let status = err.status();
        let error_response = crate::handlers::error_response(err.message());
        let body = serde_json::to_vec(&error_response)
            .unwrap_or_else(|_| b"{\"error\":\"Internal Server Error\"}".to_vec());

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Bytes::from(body))
            .unwrap_or_else(|_| {
                let mut fallback = Response::new(Bytes::from("Internal Server Error"));
                *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}
