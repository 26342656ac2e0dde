use axum::http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::models::{BreedPrediction, PredictRequest, PredictResponse};

pub const DETAIL_LIMIT: usize = 500;

#[derive(Debug, Error)]
pub enum ProxyError {
  #[error("imageBase64 is required")]
  Validation,
  #[error("MODEL_ENDPOINT not configured")]
  NotConfigured,
  #[error("Upstream error: {status}")]
  Upstream { status: u16, detail: String },
  // logged only, never sent to clients
  #[error("internal: {0}")]
  Internal(String),
}

impl ProxyError {
  pub fn status(&self) -> StatusCode {
    match self {
      ProxyError::Validation => StatusCode::BAD_REQUEST,
      ProxyError::NotConfigured => StatusCode::NOT_IMPLEMENTED,
      ProxyError::Upstream { .. } => StatusCode::BAD_GATEWAY,
      ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  pub fn code(&self) -> &'static str {
    match self {
      ProxyError::Validation => "validation",
      ProxyError::NotConfigured => "not_configured",
      ProxyError::Upstream { .. } => "upstream",
      ProxyError::Internal(_) => "internal",
    }
  }

  pub fn public_message(&self) -> String {
    match self {
      ProxyError::Internal(_) => "Unexpected server error".to_string(),
      other => other.to_string(),
    }
  }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamRequest<'a> {
  image_base64: &'a str,
}

#[derive(Clone)]
pub struct PredictionProxy {
  client: reqwest::Client,
  endpoint: Option<String>,
}

impl PredictionProxy {
  pub fn new(endpoint: Option<String>) -> Self {
    Self::with_client(reqwest::Client::new(), endpoint)
  }

  pub fn with_client(client: reqwest::Client, endpoint: Option<String>) -> Self {
    Self { client, endpoint }
  }

  pub fn is_configured(&self) -> bool {
    self.endpoint.is_some()
  }

  pub async fn predict(&self, req: &PredictRequest) -> Result<PredictResponse, ProxyError> {
    if req.image_base64.is_empty() {
      return Err(ProxyError::Validation);
    }
    let endpoint = self.endpoint.as_deref().ok_or(ProxyError::NotConfigured)?;

    let resp = self
      .client
      .post(endpoint)
      .json(&UpstreamRequest {
        image_base64: &req.image_base64,
      })
      .send()
      .await
      .map_err(|err| ProxyError::Internal(format!("upstream request failed: {err}")))?;

    if !resp.status().is_success() {
      let status = resp.status().as_u16();
      let text = resp
        .text()
        .await
        .map_err(|err| ProxyError::Internal(format!("reading upstream error body failed: {err}")))?;
      return Err(ProxyError::Upstream {
        status,
        detail: truncate_chars(&text, DETAIL_LIMIT),
      });
    }

    let body = resp
      .json::<Value>()
      .await
      .map_err(|err| ProxyError::Internal(format!("upstream body is not JSON: {err}")))?;
    Ok(normalize_upstream(body))
  }
}

pub fn normalize_upstream(body: Value) -> PredictResponse {
  let predictions = match body.get("predictions") {
    Some(Value::Array(items)) => items.iter().map(coerce_prediction).collect(),
    _ => Vec::new(),
  };
  let meta = body.get("meta").filter(|m| !m.is_null()).cloned();
  PredictResponse { predictions, meta }
}

fn coerce_prediction(item: &Value) -> BreedPrediction {
  BreedPrediction {
    breed: coerce_breed(item.get("breed")),
    confidence: coerce_confidence(item.get("confidence")),
  }
}

fn coerce_breed(value: Option<&Value>) -> String {
  match value {
    None => "undefined".to_string(),
    Some(v) => js_string(v),
  }
}

// String(x) semantics for JSON values
fn js_string(value: &Value) -> String {
  match value {
    Value::Null => "null".to_string(),
    Value::Bool(b) => b.to_string(),
    Value::String(s) => s.clone(),
    Value::Number(n) => match n.as_f64() {
      Some(f) if n.is_f64() => f.to_string(),
      _ => n.to_string(),
    },
    Value::Array(items) => items
      .iter()
      .map(|item| match item {
        Value::Null => String::new(),
        other => js_string(other),
      })
      .collect::<Vec<_>>()
      .join(","),
    Value::Object(_) => "[object Object]".to_string(),
  }
}

fn coerce_confidence(value: Option<&Value>) -> f64 {
  let n = match value {
    Some(Value::Number(n)) => n.as_f64(),
    Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
    Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
    _ => None,
  };
  n.filter(|n| n.is_finite()).unwrap_or(0.0)
}

fn truncate_chars(text: &str, limit: usize) -> String {
  text.chars().take(limit).collect()
}
