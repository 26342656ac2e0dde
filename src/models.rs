use serde::{Deserialize, Serialize};

use crate::catalog::BreedInfo;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BreedPrediction {
  pub breed: String,
  // 0..1
  pub confidence: f64,
}

impl BreedPrediction {
  pub fn new(breed: impl Into<String>, confidence: f64) -> Self {
    Self {
      breed: breed.into(),
      confidence,
    }
  }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
  #[serde(default)]
  pub image_base64: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PredictResponse {
  pub predictions: Vec<BreedPrediction>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub meta: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
  Remote,
  Local,
}

#[derive(Serialize, Clone, Debug)]
pub struct Classification {
  pub source: PredictionSource,
  pub predictions: Vec<BreedPrediction>,
  pub breed: Option<BreedInfo>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub meta: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
  pub status: String,
  pub version: String,
  pub uptime_ms: u128,
  pub remote_enabled: bool,
}
