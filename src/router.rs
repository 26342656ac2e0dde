use std::net::TcpListener;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::classifier::Classifier;
use crate::logger::Logger;
use crate::models::{HealthResponse, PredictRequest};
use crate::proxy::ProxyError;

const INDEX_HTML: &str = include_str!("../static/index.html");
// base64 of a full-size camera photo
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

pub struct RouterState {
  pub started_at: Instant,
  pub classifier: Classifier,
  pub logger: Arc<Logger>,
}

pub fn build_router(state: RouterState) -> Router {
  Router::new()
    .route("/", get(index))
    .route("/health", get(health))
    .route("/api/predict", post(predict))
    .route("/api/analyze", post(analyze))
    .route("/api/breeds", get(breeds))
    .route("/api/breeds/:name", get(breed))
    .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
    .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
    .with_state(Arc::new(state))
}

pub async fn run_router(listener: TcpListener, state: RouterState) -> anyhow::Result<()> {
  let app = build_router(state);
  listener.set_nonblocking(true)?;
  let listener = tokio::net::TcpListener::from_std(listener)?;
  axum::serve(listener, app).await?;
  Ok(())
}

async fn index() -> Html<&'static str> {
  Html(INDEX_HTML)
}

async fn health(State(state): State<Arc<RouterState>>) -> Json<HealthResponse> {
  Json(HealthResponse {
    status: "ok".to_string(),
    version: env!("CARGO_PKG_VERSION").to_string(),
    uptime_ms: state.started_at.elapsed().as_millis(),
    remote_enabled: state.classifier.proxy().is_configured(),
  })
}

async fn predict(
  State(state): State<Arc<RouterState>>,
  payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
  let req = match payload {
    Ok(Json(req)) => req,
    Err(rejection) => {
      state.logger.warn(&format!("predict: rejected body: {rejection}"));
      if let JsonRejection::BytesRejection(_) = rejection {
        return rejection_response(&rejection);
      }
      return proxy_error_response(&ProxyError::Validation);
    }
  };

  match state.classifier.proxy().predict(&req).await {
    Ok(res) => (StatusCode::OK, Json(res)).into_response(),
    Err(err) => {
      match &err {
        ProxyError::Upstream { status, .. } => {
          state.logger.warn(&format!("predict: upstream returned {status}"))
        }
        ProxyError::Internal(detail) => state.logger.error(&format!("predict: {detail}")),
        _ => {}
      }
      proxy_error_response(&err)
    }
  }
}

async fn analyze(
  State(state): State<Arc<RouterState>>,
  payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
  let req = match payload {
    Ok(Json(req)) => req,
    Err(rejection) => {
      state.logger.warn(&format!("analyze: rejected body: {rejection}"));
      return rejection_response(&rejection);
    }
  };

  match state.classifier.classify(&req.image_base64).await {
    Ok(result) => (StatusCode::OK, Json(result)).into_response(),
    Err(err) => error_response(err.status(), err.code(), &err.to_string()),
  }
}

async fn breeds(State(state): State<Arc<RouterState>>) -> Response {
  let all: Vec<_> = state.classifier.catalog().iter().collect();
  (StatusCode::OK, Json(all)).into_response()
}

async fn breed(State(state): State<Arc<RouterState>>, Path(name): Path<String>) -> Response {
  match state.classifier.catalog().lookup(&name) {
    Some(info) => (StatusCode::OK, Json(info)).into_response(),
    None => error_response(StatusCode::NOT_FOUND, "unknown_breed", &format!("Unknown breed: {name}")),
  }
}

fn proxy_error_response(err: &ProxyError) -> Response {
  let body = match err {
    ProxyError::Upstream { detail, .. } => serde_json::json!({
      "error": err.public_message(),
      "code": err.code(),
      "detail": detail,
    }),
    _ => serde_json::json!({ "error": err.public_message(), "code": err.code() }),
  };
  (err.status(), Json(body)).into_response()
}

fn rejection_response(rejection: &JsonRejection) -> Response {
  let code = match rejection {
    JsonRejection::BytesRejection(_) => "body_rejected",
    _ => "validation",
  };
  error_response(rejection.status(), code, &rejection.body_text())
}

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
  let body = Json(serde_json::json!({ "error": message, "code": code }));
  (status, body).into_response()
}
