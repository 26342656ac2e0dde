pub mod catalog;
pub mod classifier;
pub mod config;
pub mod logger;
pub mod models;
pub mod payload;
pub mod proxy;
pub mod router;
pub mod scorer;
pub mod stats;
