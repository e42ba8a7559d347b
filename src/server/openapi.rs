//! Static OpenAPI 3 description of the service, served at `GET /openapi.json`.
//!
//! The document is hand-written and must be kept in step with the
//! routes in `routes.rs` and the field names in `FEATURE_COLUMNS`.

use serde_json::{json, Value};

pub const API_TITLE: &str = "EcoAgriNet Crop Recommendation Service";
pub const API_DESCRIPTION: &str = "Predicts the best crop based on environmental data.";
pub const API_VERSION: &str = "1.0.0";

/// Build the OpenAPI document.
pub fn openapi_document() -> Value {
    let error_content = json!({
        "application/json": {
            "schema": { "$ref": "#/components/schemas/ErrorDetail" }
        }
    });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title":       API_TITLE,
            "description": API_DESCRIPTION,
            "version":     API_VERSION
        },
        "paths": {
            "/": {
                "get": {
                    "summary": "Home",
                    "operationId": "home",
                    "responses": {
                        "200": {
                            "description": "Service is running",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/StatusResponse" }
                                }
                            }
                        }
                    }
                }
            },
            "/predict_crop": {
                "post": {
                    "summary": "Predict Crop",
                    "operationId": "predict_crop",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/CropInput" }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Recommended crop",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/PredictionResponse" }
                                }
                            }
                        },
                        "422": { "description": "Validation Error", "content": error_content },
                        "500": { "description": "Prediction error", "content": error_content }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "CropInput": {
                    "title": "CropInput",
                    "type": "object",
                    "required": ["temp", "rainfall", "soil_ph"],
                    "properties": {
                        "temp":     { "title": "Temp",     "type": "number", "description": "Temperature in °C" },
                        "rainfall": { "title": "Rainfall", "type": "number", "description": "Rainfall in mm" },
                        "soil_ph":  { "title": "Soil Ph",  "type": "number", "description": "Soil pH" }
                    }
                },
                "PredictionResponse": {
                    "title": "PredictionResponse",
                    "type": "object",
                    "required": ["crop"],
                    "properties": { "crop": { "title": "Crop", "type": "string" } }
                },
                "StatusResponse": {
                    "title": "StatusResponse",
                    "type": "object",
                    "required": ["message"],
                    "properties": { "message": { "title": "Message", "type": "string" } }
                },
                "ErrorDetail": {
                    "title": "ErrorDetail",
                    "type": "object",
                    "required": ["detail"],
                    "properties": { "detail": { "title": "Detail", "type": "string" } }
                }
            }
        }
    })
}
