//! REST API Handlers
//!
//! Implements the data source endpoints: listing, schema negotiation and
//! reads. Reads run synchronously on the request task; they never touch
//! the network or the filesystem.

use super::metrics::ApiMetrics;
use crate::datasource::ReadResponse;
use crate::error::Error;
use crate::provider::Provider;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Json, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

// =============================================================================
// Request/Response Types
// =============================================================================

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiErrorResponse {
    fn from_error(e: &Error) -> (StatusCode, Self) {
        let (status, code) = match e {
            Error::DataSourceNotFound { .. } => (StatusCode::NOT_FOUND, "data_source_not_found"),
            Error::Json(_) | Error::Yaml(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        (
            status,
            Self {
                error: code.into(),
                message: e.to_string(),
                details: None,
            },
        )
    }

    /// Body that could not be parsed as JSON
    fn from_rejection(rejection: &JsonRejection) -> (StatusCode, Self) {
        (
            rejection.status(),
            Self {
                error: "invalid_request".into(),
                message: "Request body must be a JSON object".into(),
                details: Some(rejection.body_text()),
            },
        )
    }
}

// =============================================================================
// REST Router
// =============================================================================

/// Default request body limit
pub const DEFAULT_MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// REST API router builder
pub struct RestRouter {
    provider: Arc<Provider>,
    metrics: ApiMetrics,
    max_body_size: usize,
}

impl RestRouter {
    pub fn new(provider: Arc<Provider>, metrics: ApiMetrics) -> Self {
        Self {
            provider,
            metrics,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    /// Build the Axum router
    pub fn build(self) -> Router {
        let state = AppState {
            provider: self.provider,
            metrics: self.metrics,
        };

        Router::new()
            // Data source endpoints
            .route("/v1/datasources", get(list_data_sources))
            .route("/v1/datasources/:type_name/schema", get(get_schema))
            .route("/v1/datasources/:type_name/read", post(read_data_source))
            // Health and metrics
            .route("/healthz", get(health_check))
            .route("/metrics", get(metrics))
            .layer(DefaultBodyLimit::max(self.max_body_size))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    provider: Arc<Provider>,
    metrics: ApiMetrics,
}

// =============================================================================
// Handlers
// =============================================================================

async fn list_data_sources(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.provider.data_sources())
}

async fn get_schema(State(state): State<AppState>, Path(type_name): Path<String>) -> Response {
    match state.provider.schema(&type_name) {
        Ok(schema) => Json(schema).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn read_data_source(
    State(state): State<AppState>,
    Path(type_name): Path<String>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Response {
    let config = match body {
        Ok(Json(config)) => config,
        Err(rejection) => {
            debug!(data_source = %type_name, "Rejected request body: {}", rejection.body_text());
            let (status, body) = ApiErrorResponse::from_rejection(&rejection);
            return (status, Json(body)).into_response();
        }
    };

    let data_source = match state.provider.get(&type_name) {
        Ok(data_source) => data_source,
        Err(e) => return error_response(&e),
    };
    let kind = data_source.kind().to_string();

    let started = Instant::now();
    let response = match state.provider.read(&type_name, config) {
        Ok(response) => response,
        Err(e) => return error_response(&e),
    };
    let ok = response.is_ok();
    state
        .metrics
        .observe_read(&kind, ok, started.elapsed().as_secs_f64());

    debug!(data_source = %type_name, ok, "Served read");
    read_response(response)
}

fn read_response(response: ReadResponse) -> Response {
    let status = if response.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(response)).into_response()
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok((content_type, body)) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        Err(e) => error_response(&e),
    }
}

fn error_response(e: &Error) -> Response {
    let (status, body) = ApiErrorResponse::from_error(e);
    if status.is_server_error() {
        error!("Request failed: {}", e);
    }
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::json;
    use crate::api::metrics::{OUTCOME_ERROR, OUTCOME_OK};
    use tower::ServiceExt;

    const IAM: &str = "k8s_anywhere_eks_amazonaws_com_aws_iam_config_v1alpha1_manifest";

    fn app() -> (Router, ApiMetrics) {
        let provider = Arc::new(Provider::new().unwrap());
        let metrics = ApiMetrics::new().unwrap();
        (RestRouter::new(provider, metrics.clone()).build(), metrics)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_data_sources() {
        let (app, _) = app();
        let response = app
            .oneshot(Request::builder().uri("/v1/datasources").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 17);
        assert!(json[0]["typeName"].as_str().unwrap().starts_with("k8s_anywhere_eks_amazonaws_com_"));
    }

    #[tokio::test]
    async fn test_get_schema() {
        let (app, _) = app();
        let uri = format!("/v1/datasources/{}/schema", IAM);
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["attributes"]["id"]["requiredness"], "computed");
        assert_eq!(
            json["attributes"]["spec"]["type"]["attributes"]["awsRegion"]["requiredness"],
            "required"
        );
    }

    #[tokio::test]
    async fn test_read() {
        let (app, metrics) = app();
        let config = json!({
            "metadata": {"name": "demo", "namespace": "default"},
            "spec": {"awsRegion": "us-west-2", "backendMode": ["EKSConfigMap"]}
        });
        let response = app
            .oneshot(post_json(&format!("/v1/datasources/{}/read", IAM), config))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["state"]["id"], "default/demo");
        assert!(json["state"]["yaml"].as_str().unwrap().contains("kind: AWSIamConfig"));
        assert_eq!(metrics.read_count("AWSIamConfig", OUTCOME_OK), 1);
    }

    #[tokio::test]
    async fn test_read_with_invalid_config() {
        let (app, metrics) = app();
        let config = json!({"metadata": {"name": "demo", "namespace": "default"}});
        let response = app
            .oneshot(post_json(&format!("/v1/datasources/{}/read", IAM), config))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert!(json.get("state").is_none());
        assert_eq!(json["diagnostics"][0]["summary"], "Missing required argument");
        assert_eq!(json["diagnostics"][0]["path"], "spec");
        assert_eq!(metrics.read_count("AWSIamConfig", OUTCOME_ERROR), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_json_error() {
        let (app, metrics) = app();
        let request = Request::builder()
            .method("POST")
            .uri(format!("/v1/datasources/{}/read", IAM))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"metadata\": "))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"], "invalid_request");
        assert!(!json["details"].as_str().unwrap().is_empty());

        let request = Request::builder()
            .method("POST")
            .uri(format!("/v1/datasources/{}/read", IAM))
            .body(Body::from("{}"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body_json(response).await["error"], "invalid_request");

        assert_eq!(metrics.read_count("AWSIamConfig", OUTCOME_ERROR), 0);
    }

    #[tokio::test]
    async fn test_unknown_data_source() {
        let (app, _) = app();
        let response = app
            .oneshot(post_json("/v1/datasources/k8s_nope_manifest/read", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["error"], "data_source_not_found");
    }

    #[tokio::test]
    async fn test_health_and_metrics() {
        let (app, _) = app();
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
    }
}
