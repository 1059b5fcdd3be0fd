//! Service layer module

pub mod scan_service;
pub mod types;

pub use scan_service::ScanService;
pub use types::*;
