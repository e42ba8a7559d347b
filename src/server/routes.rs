//! HTTP routes for the crop recommendation service.
//!
//! | Method | Path            | Success                     |
//! |--------|-----------------|-----------------------------|
//! | GET    | `/`             | 200 `{"message": "..."}`    |
//! | POST   | `/predict_crop` | 200 `{"crop": "<label>"}`   |
//! | GET    | `/openapi.json` | 200 OpenAPI 3 document      |
//!
//! Errors always use the body `{"detail": "<text>"}`:
//! - 422 when the request body is missing fields or has non-numeric values
//!   (the handler never runs)
//! - 500 `Prediction error: <message>` for any failure inside prediction
//! - 404 / 405 / 415 for unknown paths, wrong methods, non-JSON bodies

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::domain::features::CropFeatures;
use crate::domain::traits::CropRecommender;
use crate::server::openapi::openapi_document;

/// Fixed liveness message returned by `GET /`.
pub const RUNNING_MESSAGE: &str = "EcoAgriNet Crop Recommendation Service is running";

/// The model, shared read-only by all handlers.
pub type SharedRecommender = Arc<dyn CropRecommender>;

// =============================================================================
// Request/Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub crop: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

// =============================================================================
// API Routes
// =============================================================================

/// Build the complete route tree, with rejections already recovered.
pub fn api_routes(
    recommender: SharedRecommender,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let root = warp::path::end().and(warp::get()).and_then(handle_root);

    let openapi = warp::path("openapi.json")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::json(&openapi_document()));

    let predict = warp::path("predict_crop")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_recommender(recommender))
        .and_then(handle_predict);

    root.or(openapi).or(predict).recover(handle_rejection)
}

// =============================================================================
// Filters
// =============================================================================

fn with_recommender(
    recommender: SharedRecommender,
) -> impl Filter<Extract = (SharedRecommender,), Error = Infallible> + Clone {
    warp::any().map(move || recommender.clone())
}

// =============================================================================
// Handlers
// =============================================================================

async fn handle_root() -> Result<impl Reply, Infallible> {
    Ok(warp::reply::json(&StatusResponse {
        message: RUNNING_MESSAGE.to_string(),
    }))
}

async fn handle_predict(
    features: CropFeatures,
    recommender: SharedRecommender,
) -> Result<warp::reply::Response, Infallible> {
    match recommender.recommend(&features) {
        Ok(crop) => Ok(warp::reply::json(&PredictionResponse { crop }).into_response()),
        Err(e) => {
            tracing::warn!("Prediction failed: {:#}", e);
            Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Prediction error: {}", e),
            ))
        }
    }
}

// =============================================================================
// Error mapping
// =============================================================================

async fn handle_rejection(err: Rejection) -> Result<warp::reply::Response, Infallible> {
    let (status, detail) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
    };

    Ok(error_response(status, &detail))
}

fn error_response(status: StatusCode, detail: &str) -> warp::reply::Response {
    let body = ErrorDetail {
        detail: detail.to_string(),
    };
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use serde_json::json;

    use crate::application::predict_use_case::PredictUseCase;
    use crate::data::dataset::LabeledDataset;
    use crate::domain::record::TrainingRecord;
    use crate::infra::model_store::ModelArtifact;
    use crate::ml::forest::{ForestConfig, RandomForest};
    use crate::ml::inferencer::Inferencer;
    use crate::server::openapi::API_TITLE;

    fn rice_recommender() -> SharedRecommender {
        let mut records = vec![TrainingRecord::new(25.0, 100.0, 6.5, "rice"); 30];
        records.extend(vec![TrainingRecord::new(12.0, 30.0, 8.0, "sorghum"); 30]);
        let forest =
            RandomForest::fit(&LabeledDataset::from_records(&records), &ForestConfig::default())
                .unwrap();
        let inferencer = Inferencer::from_artifact(ModelArtifact::new(forest, records.len()));
        Arc::new(PredictUseCase::from_inferencer(inferencer))
    }

    struct FailingRecommender;

    impl CropRecommender for FailingRecommender {
        fn recommend(&self, _: &CropFeatures) -> Result<String> {
            Err(anyhow!("X has 2 features, but the model expects 3 features as input"))
        }
    }

    #[tokio::test]
    async fn test_root_reports_running() {
        let routes = api_routes(rice_recommender());

        let resp = warp::test::request().method("GET").path("/").reply(&routes).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: StatusResponse = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body.message, RUNNING_MESSAGE);
    }

    #[tokio::test]
    async fn test_predict_rice() {
        let routes = api_routes(rice_recommender());

        let resp = warp::test::request()
            .method("POST")
            .path("/predict_crop")
            .json(&json!({"temp": 25, "rainfall": 100, "soil_ph": 6.5}))
            .reply(&routes)
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: PredictionResponse = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body.crop, "rice");
    }

    #[tokio::test]
    async fn test_predict_label_is_known_and_stable() {
        let routes = api_routes(rice_recommender());
        let mut seen = Vec::new();

        for _ in 0..2 {
            let resp = warp::test::request()
                .method("POST")
                .path("/predict_crop")
                .json(&json!({"temp": 18.2, "rainfall": 61.0, "soil_ph": 7.3}))
                .reply(&routes)
                .await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: PredictionResponse = serde_json::from_slice(resp.body()).unwrap();
            assert!(body.crop == "rice" || body.crop == "sorghum");
            seen.push(body.crop);
        }

        assert_eq!(seen[0], seen[1]);
    }

    #[tokio::test]
    async fn test_predict_accepts_numeric_strings() {
        let routes = api_routes(rice_recommender());

        let resp = warp::test::request()
            .method("POST")
            .path("/predict_crop")
            .json(&json!({"temp": "25", "rainfall": "100", "soil_ph": "6.5"}))
            .reply(&routes)
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected_before_model() {
        let routes = api_routes(Arc::new(FailingRecommender));

        let resp = warp::test::request()
            .method("POST")
            .path("/predict_crop")
            .json(&json!({"temp": 25, "rainfall": 100}))
            .reply(&routes)
            .await;

        // A 500 here would mean the handler ran
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: ErrorDetail = serde_json::from_slice(resp.body()).unwrap();
        assert!(body.detail.contains("soil_ph"));
    }

    #[tokio::test]
    async fn test_non_numeric_field_is_rejected() {
        let routes = api_routes(Arc::new(FailingRecommender));

        let resp = warp::test::request()
            .method("POST")
            .path("/predict_crop")
            .json(&json!({"temp": "warm", "rainfall": 100, "soil_ph": 6.5}))
            .reply(&routes)
            .await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let routes = api_routes(rice_recommender());

        let resp = warp::test::request()
            .method("POST")
            .path("/predict_crop")
            .header("content-type", "application/json")
            .body("{\"temp\": 25,")
            .reply(&routes)
            .await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_prediction_failure_becomes_500_with_message() {
        let routes = api_routes(Arc::new(FailingRecommender));

        let resp = warp::test::request()
            .method("POST")
            .path("/predict_crop")
            .json(&json!({"temp": 25, "rainfall": 100, "soil_ph": 6.5}))
            .reply(&routes)
            .await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorDetail = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(
            body.detail,
            "Prediction error: X has 2 features, but the model expects 3 features as input"
        );
    }

    #[tokio::test]
    async fn test_openapi_document_describes_service() {
        let routes = api_routes(rice_recommender());

        let resp = warp::test::request().method("GET").path("/openapi.json").reply(&routes).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let doc: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(doc["info"]["title"], API_TITLE);
        assert_eq!(doc["info"]["version"], "1.0.0");
        assert!(doc["paths"]["/predict_crop"]["post"].is_object());
        assert!(doc["paths"]["/"]["get"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let routes = api_routes(rice_recommender());

        let resp = warp::test::request().method("GET").path("/recommend").reply(&routes).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorDetail = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body.detail, "Not Found");
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let routes = api_routes(rice_recommender());

        let resp = warp::test::request().method("GET").path("/predict_crop").reply(&routes).await;

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_non_json_content_type_is_415() {
        let routes = api_routes(rice_recommender());

        let resp = warp::test::request()
            .method("POST")
            .path("/predict_crop")
            .header("content-type", "text/plain")
            .body("temp=25")
            .reply(&routes)
            .await;

        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
