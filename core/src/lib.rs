//! Core library for gdm, a local-first gestational diabetes self-monitoring
//! tracker: health calculators, the food calorie catalog, SQLite persistence,
//! and the service the application shell calls into.

pub mod calculator;
pub mod catalog;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod recommend;
pub mod service;
pub mod validate;

pub use catalog::FoodCatalog;
pub use error::{Error, Result};
pub use service::GdmService;
pub use validate::ValidationPolicy;
