//! Core domain logic for the Imaginarium catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod sanitize;
pub mod service;
pub mod shield;

pub use config::{AppConfig, ConfigError, ConfigOverrides};
pub use error::{error_chain, AppError, AppResult, IoFailure, IoOperation, ValidationError};
pub use export::export_json;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::item::Item;
pub use repo::csv_codec::{decode_line, encode_item, CSV_HEADER};
pub use repo::item_repo::{CsvItemRepository, ItemRepository};
pub use repo::resource::{FileResource, TextResource};
pub use sanitize::sanitize_line;
pub use service::catalog_service::{CatalogService, CategoryGroup, ItemDraft};
pub use shield::{BoxError, ExceptionShield};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
