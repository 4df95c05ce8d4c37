pub mod apigee;
pub mod config;
pub mod export;
pub mod label;
pub mod registry;

pub use apigee::{ApigeeClient, ApigeeError, RestClient};
pub use config::ApigeeConfig;
pub use export::{ExportError, Exporter};
pub use registry::ExportDocument;
