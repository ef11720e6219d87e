//! CRUD (Create, Read, Update, Delete) operation handlers.
//!
//! Every handler issues exactly one store operation. Store failures are
//! classified by operation kind only: reads map to 500, writes to 400, and
//! zero affected rows on update or delete to 404.

use hyper::body::{Body, Bytes};
use hyper::{Request, Response};

use crate::router::{AppState, RouterError};
use orphanage_store::Table;

use super::request_utils::{
    column_values, json_response, read_body_fields, read_failure, write_failure, BoxError,
};
use super::response::{data_response, message_response, CreatedResponse};

fn not_found(table: Table) -> RouterError {
    RouterError::NotFound(format!("{} not found", table.entity()))
}

/// Lists every row of a table.
///
/// # Endpoint
/// `GET /employees`, `GET /children`
///
/// # Response
/// - **200 OK**: `{"data": [{"id": 1, "name": "Ana", ...}]}`
///
/// # Errors
/// - **500 Internal Server Error**: Store fault
pub async fn list_rows(table: Table, state: &AppState) -> Result<Response<Bytes>, RouterError> {
    let rows = state.store.list_all(table).await.map_err(read_failure)?;
    json_response(200, &data_response(rows))
}

/// Reads one row by id.
///
/// # Endpoint
/// `GET /employees/{id}`, `GET /children/{id}`
///
/// # Response
/// - **200 OK**: `{"data": {"id": 1, "name": "Ana", "role": "Cook", "salary": 1500}}`
///
/// # Errors
/// - **404 Not Found**: No row with this id
/// - **500 Internal Server Error**: Store fault
pub async fn get_row(
    table: Table,
    id: &str,
    state: &AppState,
) -> Result<Response<Bytes>, RouterError> {
    let row = state
        .store
        .get_by_id(table, id)
        .await
        .map_err(read_failure)?
        .ok_or_else(|| not_found(table))?;
    json_response(200, &data_response(row))
}

/// Creates a row from the request body.
///
/// # Endpoint
/// `POST /employees`, `POST /children`
///
/// # Request Body
/// ```json
/// {"name": "Ana", "role": "Cook", "salary": 1500}
/// ```
///
/// # Response
/// - **201 Created**: `{"id": 1}`
///
/// # Errors
/// - **400 Bad Request**: Malformed JSON or a value the store rejects
///   (missing field, wrong type)
/// - **413 Payload Too Large**: Body over the configured limit
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:3000/employees \
///   -H "Content-Type: application/json" \
///   -d '{"name": "Ana", "role": "Cook", "salary": 1500}'
/// ```
pub async fn create_row<B>(
    req: Request<B>,
    table: Table,
    state: &AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let fields = read_body_fields(req, state.config.max_body_bytes).await?;

    let id = state
        .store
        .insert(table, column_values(table, &fields))
        .await
        .map_err(write_failure)?;

    json_response(201, &CreatedResponse { id })
}

/// Replaces every non-id field of a row.
///
/// # Endpoint
/// `PUT /employees/{id}`, `PUT /children/{id}`
///
/// # Response
/// - **200 OK**: `{"message": "Employee updated"}`
///
/// # Errors
/// - **400 Bad Request**: Malformed JSON or a value the store rejects
/// - **404 Not Found**: No row with this id
pub async fn update_row<B>(
    req: Request<B>,
    table: Table,
    id: &str,
    state: &AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let fields = read_body_fields(req, state.config.max_body_bytes).await?;

    let changes = state
        .store
        .update(table, id, column_values(table, &fields))
        .await
        .map_err(write_failure)?;
    if changes == 0 {
        return Err(not_found(table));
    }

    json_response(200, &message_response(format!("{} updated", table.entity())))
}

/// Deletes a row.
///
/// # Endpoint
/// `DELETE /employees/{id}`, `DELETE /children/{id}`
///
/// # Response
/// - **200 OK**: `{"message": "Employee deleted"}`
///
/// # Errors
/// - **400 Bad Request**: Store fault
/// - **404 Not Found**: No row with this id
pub async fn delete_row(
    table: Table,
    id: &str,
    state: &AppState,
) -> Result<Response<Bytes>, RouterError> {
    let changes = state
        .store
        .delete(table, id)
        .await
        .map_err(write_failure)?;
    if changes == 0 {
        return Err(not_found(table));
    }

    json_response(200, &message_response(format!("{} deleted", table.entity())))
}
