use axum::{response::IntoResponse, Json};
use serde_json::{json, Map, Value};

struct ResourceDoc {
    path: &'static str,
    singular: &'static str,
    tag: &'static str,
    fields: &'static [(&'static str, &'static str)],
}

const RESOURCES: [ResourceDoc; 3] = [
    ResourceDoc {
        path: "posts",
        singular: "Post",
        tag: "Posts",
        fields: &[
            ("title", "min 3 characters"),
            ("content", "min 10 characters"),
            ("author", ""),
        ],
    },
    ResourceDoc {
        path: "students",
        singular: "Student",
        tag: "Students",
        fields: &[("name", ""), ("email", "")],
    },
    ResourceDoc {
        path: "teachers",
        singular: "Teacher",
        tag: "Teachers",
        fields: &[("name", ""), ("email", "")],
    },
];

/// OpenAPI 3.0 description of every resource route.
pub async fn api_docs() -> impl IntoResponse {
    Json(openapi_document())
}

pub fn openapi_document() -> Value {
    let mut paths = Map::new();
    let mut schemas = Map::new();
    schemas.insert("Error".to_string(), error_schema());

    for resource in &RESOURCES {
        let schema_ref = format!("#/components/schemas/{}", resource.singular);
        let input_ref = format!("#/components/schemas/{}Input", resource.singular);
        let id_param = json!({
            "in": "path",
            "name": "id",
            "required": true,
            "schema": { "type": "integer" }
        });
        let error = json!({ "$ref": "#/components/responses/Error" });

        paths.insert(
            format!("/{}", resource.path),
            json!({
                "get": {
                    "tags": [resource.tag],
                    "summary": format!("List all {}", resource.path),
                    "responses": { "200": { "description": format!("List of {}", resource.path) } }
                },
                "post": {
                    "tags": [resource.tag],
                    "summary": format!("Create a {}", resource.singular.to_lowercase()),
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": input_ref } } }
                    },
                    "responses": {
                        "201": { "description": format!("{} created", resource.singular) },
                        "400": error
                    }
                }
            }),
        );

        paths.insert(
            format!("/{}/search", resource.path),
            json!({
                "get": {
                    "tags": [resource.tag],
                    "summary": format!("Search {} by keyword", resource.path),
                    "parameters": [{
                        "in": "query",
                        "name": "q",
                        "required": true,
                        "schema": { "type": "string", "minLength": 2 }
                    }],
                    "responses": {
                        "200": { "description": format!("Matching {}", resource.path) },
                        "400": error
                    }
                }
            }),
        );

        paths.insert(
            format!("/{}/{{id}}", resource.path),
            json!({
                "get": {
                    "tags": [resource.tag],
                    "summary": format!("Get a {} by id", resource.singular.to_lowercase()),
                    "parameters": [id_param],
                    "responses": {
                        "200": { "description": format!("{} found", resource.singular) },
                        "400": error,
                        "404": error
                    }
                },
                "put": {
                    "tags": [resource.tag],
                    "summary": format!("Replace a {}", resource.singular.to_lowercase()),
                    "parameters": [id_param],
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": input_ref } } }
                    },
                    "responses": {
                        "200": { "description": format!("{} updated", resource.singular) },
                        "400": error,
                        "404": error
                    }
                },
                "delete": {
                    "tags": [resource.tag],
                    "summary": format!("Delete a {}", resource.singular.to_lowercase()),
                    "parameters": [id_param],
                    "responses": {
                        "200": { "description": format!("{} deleted", resource.singular) },
                        "400": error,
                        "404": error
                    }
                }
            }),
        );

        let mut properties = Map::new();
        let mut input_properties = Map::new();
        properties.insert("id".to_string(), json!({ "type": "integer" }));
        for (name, rule) in resource.fields {
            let field = if rule.is_empty() {
                json!({ "type": "string" })
            } else {
                json!({ "type": "string", "description": rule })
            };
            properties.insert(name.to_string(), field.clone());
            input_properties.insert(name.to_string(), field);
        }
        properties.insert(
            "created_at".to_string(),
            json!({ "type": "string", "format": "date-time" }),
        );
        let required: Vec<&str> = resource.fields.iter().map(|(name, _)| *name).collect();

        schemas.insert(
            resource.singular.to_string(),
            json!({ "type": "object", "properties": properties }),
        );
        schemas.insert(
            format!("{}Input", resource.singular),
            json!({ "type": "object", "required": required, "properties": input_properties }),
        );
    }

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Blog School API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "REST API for blog posts, students and teachers"
        },
        "paths": paths,
        "components": {
            "schemas": schemas,
            "responses": {
                "Error": {
                    "description": "Error envelope",
                    "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } }
                }
            }
        }
    })
}

fn error_schema() -> Value {
    json!({
        "type": "object",
        "required": ["status", "message", "timestamp", "path", "method"],
        "properties": {
            "status": { "type": "string", "enum": ["fail", "error"] },
            "message": { "type": "string" },
            "timestamp": { "type": "string", "format": "date-time" },
            "path": { "type": "string" },
            "method": { "type": "string" },
            "details": { "type": "object" }
        }
    })
}
