//! HTTP endpoint implementations for the CRUD resources and documentation.

pub mod crud_handlers;
pub mod docs_handlers;
pub mod request_utils;
pub mod response;

pub use crud_handlers::{create_row, delete_row, get_row, list_rows, update_row};
pub use docs_handlers::{docs_ui, openapi_json};
pub use request_utils::decode_path_param;
pub use response::error_response;
