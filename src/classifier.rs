use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;

use crate::catalog::BreedCatalog;
use crate::logger::Logger;
use crate::models::{BreedPrediction, Classification, PredictRequest, PredictionSource};
use crate::payload::{decode_image_payload, split_data_url, PayloadError};
use crate::proxy::PredictionProxy;
use crate::scorer;

#[derive(Debug, Error)]
pub enum AnalysisError {
  #[error("imageBase64 is required")]
  MissingImage,
  #[error("Failed to analyze image.")]
  Undecodable(#[source] PayloadError),
  #[error("Failed to analyze image.")]
  NoPixels,
}

impl AnalysisError {
  pub fn status(&self) -> StatusCode {
    match self {
      AnalysisError::MissingImage => StatusCode::BAD_REQUEST,
      AnalysisError::Undecodable(_) | AnalysisError::NoPixels => StatusCode::UNPROCESSABLE_ENTITY,
    }
  }

  pub fn code(&self) -> &'static str {
    match self {
      AnalysisError::MissingImage => "validation",
      AnalysisError::Undecodable(_) => "undecodable_payload",
      AnalysisError::NoPixels => "no_pixels",
    }
  }
}

pub struct Classifier {
  proxy: PredictionProxy,
  catalog: Arc<BreedCatalog>,
  logger: Arc<Logger>,
}

impl Classifier {
  pub fn new(proxy: PredictionProxy, catalog: Arc<BreedCatalog>, logger: Arc<Logger>) -> Self {
    Self {
      proxy,
      catalog,
      logger,
    }
  }

  pub fn proxy(&self) -> &PredictionProxy {
    &self.proxy
  }

  pub fn catalog(&self) -> &BreedCatalog {
    &self.catalog
  }

  pub async fn classify(&self, image_base64: &str) -> Result<Classification, AnalysisError> {
    if image_base64.trim().is_empty() {
      return Err(AnalysisError::MissingImage);
    }
    let request_id = uuid::Uuid::new_v4();

    let req = PredictRequest {
      image_base64: image_base64.to_string(),
    };
    match self.proxy.predict(&req).await {
      Ok(res) => {
        self
          .logger
          .info(&format!("[{request_id}] remote model returned {} predictions", res.predictions.len()));
        return Ok(self.finish(PredictionSource::Remote, res.predictions, res.meta));
      }
      Err(err) => {
        self.logger.warn(&format!("[{request_id}] remote prediction failed, using local heuristic: {err}"));
      }
    }

    let bytes = decode_image_payload(image_base64).map_err(|err| {
      self.logger.error(&format!("[{request_id}] payload could not be decoded: {err}"));
      AnalysisError::Undecodable(err)
    })?;
    let predictions = scorer::analyze(&bytes);
    if predictions.is_empty() {
      let mime = split_data_url(image_base64).map(|(mime, _)| mime).unwrap_or("unknown");
      self
        .logger
        .error(&format!("[{request_id}] local heuristic could not rasterise {mime} image"));
      return Err(AnalysisError::NoPixels);
    }
    self.logger.info(&format!(
      "[{request_id}] local heuristic picked {}",
      predictions[0].breed
    ));
    Ok(self.finish(PredictionSource::Local, predictions, None))
  }

  fn finish(
    &self,
    source: PredictionSource,
    predictions: Vec<BreedPrediction>,
    meta: Option<serde_json::Value>,
  ) -> Classification {
    let breed = predictions
      .first()
      .and_then(|top| self.catalog.lookup(&top.breed))
      .cloned();
    Classification {
      source,
      predictions,
      breed,
      meta,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::routing::post;
  use axum::{Json, Router};
  use base64::Engine;
  use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
  use serde_json::json;
  use std::io::Cursor;

  fn classifier(endpoint: Option<String>) -> Classifier {
    Classifier::new(
      PredictionProxy::new(endpoint),
      Arc::new(BreedCatalog::builtin()),
      Arc::new(Logger::stderr()),
    )
  }

  fn black_png_data_url() -> String {
    let mut png = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 32, Rgb([0, 0, 0])))
      .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
      .expect("encode png");
    format!(
      "data:image/png;base64,{}",
      base64::engine::general_purpose::STANDARD.encode(png)
    )
  }

  async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind mock");
    let addr = listener.local_addr().expect("mock addr");
    tokio::spawn(async move {
      let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/predict")
  }

  #[tokio::test]
  async fn remote_result_wins_when_available() {
    let app = Router::new().route(
      "/predict",
      post(|| async { Json(json!({ "predictions": [{ "breed": "jersey", "confidence": 0.8 }] })) }),
    );
    let classifier = classifier(Some(spawn_upstream(app).await));
    let result = classifier.classify(&black_png_data_url()).await.expect("classify");
    assert_eq!(result.source, PredictionSource::Remote);
    assert_eq!(result.predictions[0].breed, "jersey");
    assert_eq!(result.breed.expect("catalogued").name, "Jersey");
  }

  #[tokio::test]
  async fn falls_back_locally_without_endpoint() {
    let result = classifier(None).classify(&black_png_data_url()).await.expect("classify");
    assert_eq!(result.source, PredictionSource::Local);
    assert_eq!(result.predictions[0].breed, "Angus");
    assert_eq!(result.breed.expect("catalogued").origin, "Scotland");
  }

  #[tokio::test]
  async fn falls_back_locally_on_upstream_error() {
    let app = Router::new().route(
      "/predict",
      post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let classifier = classifier(Some(spawn_upstream(app).await));
    let result = classifier.classify(&black_png_data_url()).await.expect("classify");
    assert_eq!(result.source, PredictionSource::Local);
  }

  #[tokio::test]
  async fn empty_payload_is_rejected() {
    let err = classifier(None).classify("  ").await.expect_err("should fail");
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn unrasterisable_payload_is_reported() {
    let payload = base64::engine::general_purpose::STANDARD.encode(b"definitely not a picture");
    let err = classifier(None).classify(&payload).await.expect_err("should fail");
    assert!(matches!(err, AnalysisError::NoPixels));
    assert_eq!(err.to_string(), "Failed to analyze image.");
  }
}
