//! OpenAPI document generated from the route table and store schema.

use serde_json::{json, Map, Value};

use crate::router::Resource;
use orphanage_store::Table;

/// Builds the OpenAPI 3.0 description of every endpoint in `resources`.
pub fn openapi_document(resources: &[Resource]) -> Value {
    let mut paths = Map::new();
    let mut schemas = Map::new();

    for resource in resources {
        let entity = resource.table.entity();
        paths.insert(
            resource.collection_path.to_string(),
            collection_path_item(resource),
        );
        paths.insert(resource.item_path.to_string(), item_path_item(resource));
        schemas.insert(entity.to_string(), entity_schema(resource.table));
    }
    schemas.insert("Error".to_string(), message_schema("error"));
    schemas.insert("Message".to_string(), message_schema("message"));

    let tags: Vec<Value> = resources.iter().map(|r| json!({"name": r.tag})).collect();

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Orphanage API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Registry of orphanage employees and children",
        },
        "tags": tags,
        "paths": paths,
        "components": {"schemas": schemas},
    })
}

fn entity_schema(table: Table) -> Value {
    let mut properties = Map::new();
    properties.insert("id".to_string(), json!({"type": "integer", "readOnly": true}));
    for column in table.columns() {
        properties.insert(
            column.name.to_string(),
            json!({"type": column.ty.json_type()}),
        );
    }
    let required: Vec<&str> = table.columns().iter().map(|c| c.name).collect();

    json!({
        "type": "object",
        "required": required,
        "properties": properties,
    })
}

fn message_schema(field: &str) -> Value {
    let mut properties = Map::new();
    properties.insert(field.to_string(), json!({"type": "string"}));
    json!({"type": "object", "properties": properties})
}

fn schema_ref(name: &str) -> Value {
    json!({"$ref": format!("#/components/schemas/{}", name)})
}

fn json_content(schema: Value) -> Value {
    json!({"application/json": {"schema": schema}})
}

fn response(description: String, schema: Value) -> Value {
    json!({"description": description, "content": json_content(schema)})
}

fn error_response(description: String) -> Value {
    response(description, schema_ref("Error"))
}

fn entity_body(entity: &str) -> Value {
    json!({"required": true, "content": json_content(schema_ref(entity))})
}

fn collection_path_item(resource: &Resource) -> Value {
    let entity = resource.table.entity();
    json!({
        "get": {
            "tags": [resource.tag],
            "summary": format!("List every {}", entity.to_lowercase()),
            "operationId": format!("list{}", resource.tag),
            "responses": {
                "200": response(
                    format!("All {} rows", entity.to_lowercase()),
                    json!({
                        "type": "object",
                        "properties": {"data": {"type": "array", "items": schema_ref(entity)}},
                    }),
                ),
                "500": error_response("Store fault".to_string()),
            },
        },
        "post": {
            "tags": [resource.tag],
            "summary": format!("Create a {}", entity.to_lowercase()),
            "operationId": format!("create{}", entity),
            "requestBody": entity_body(entity),
            "responses": {
                "201": response(
                    format!("{} created", entity),
                    json!({"type": "object", "properties": {"id": {"type": "integer"}}}),
                ),
                "400": error_response("Constraint violation".to_string()),
            },
        },
    })
}

fn item_path_item(resource: &Resource) -> Value {
    let entity = resource.table.entity();
    let not_found = format!("{} not found", entity);
    json!({
        "parameters": [{
            "name": "id",
            "in": "path",
            "required": true,
            "description": format!("{} id", entity),
            "schema": {"type": "integer"},
        }],
        "get": {
            "tags": [resource.tag],
            "summary": format!("Get a {} by id", entity.to_lowercase()),
            "operationId": format!("get{}", entity),
            "responses": {
                "200": response(
                    format!("{} found", entity),
                    json!({"type": "object", "properties": {"data": schema_ref(entity)}}),
                ),
                "404": error_response(not_found.clone()),
                "500": error_response("Store fault".to_string()),
            },
        },
        "put": {
            "tags": [resource.tag],
            "summary": format!("Update a {} by id", entity.to_lowercase()),
            "operationId": format!("update{}", entity),
            "requestBody": entity_body(entity),
            "responses": {
                "200": response(format!("{} updated", entity), schema_ref("Message")),
                "400": error_response("Constraint violation".to_string()),
                "404": error_response(not_found.clone()),
            },
        },
        "delete": {
            "tags": [resource.tag],
            "summary": format!("Delete a {} by id", entity.to_lowercase()),
            "operationId": format!("delete{}", entity),
            "responses": {
                "200": response(format!("{} deleted", entity), schema_ref("Message")),
                "400": error_response("Store fault".to_string()),
                "404": error_response(not_found),
            },
        },
    })
}
