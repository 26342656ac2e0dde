use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;

use cattlescope::catalog::BreedCatalog;
use cattlescope::classifier::Classifier;
use cattlescope::config::AppConfig;
use cattlescope::logger::Logger;
use cattlescope::proxy::PredictionProxy;
use cattlescope::router::{run_router, RouterState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let config = AppConfig::load().context("loading configuration")?;

  let logger = Arc::new(
    Logger::from_path(config.log_path.as_deref()).context("opening log file")?,
  );
  logger.info("CattleScope starting up");

  let catalog = Arc::new(BreedCatalog::builtin());
  let proxy = PredictionProxy::new(config.model_endpoint.clone());
  match config.model_endpoint.as_deref() {
    Some(endpoint) => logger.info(&format!("forwarding predictions to {endpoint}")),
    None => logger.warn("MODEL_ENDPOINT not set; using the local heuristic only"),
  }
  logger.info(&format!("{} breeds in catalog", catalog.len()));

  let listener = std::net::TcpListener::bind(&config.bind_addr)
    .with_context(|| format!("binding {}", config.bind_addr))?;
  logger.info(&format!("listening on http://{}", listener.local_addr()?));

  let state = RouterState {
    started_at: Instant::now(),
    classifier: Classifier::new(proxy, catalog, logger.clone()),
    logger: logger.clone(),
  };

  if let Err(err) = run_router(listener, state).await {
    logger.error(&format!("router error: {err}"));
    return Err(err);
  }
  Ok(())
}
