mod client;
mod env_map;
mod error;
mod types;

pub use client::RestClient;
pub use env_map::EnvironmentMap;
pub use error::ApigeeError;
pub use types::{Deployment, OperationConfig, OperationGroup, Product, Proxy};

use async_trait::async_trait;

/// Read-only view of one Apigee organization.
///
/// This abstraction keeps the export pipeline independent of the HTTP
/// transport: production code uses [`RestClient`], tests supply in-memory
/// fixtures. Every method covers one management-API listing; all of them
/// are fatal on failure (the export never emits partial output).
#[async_trait]
pub trait ApigeeClient: Send + Sync {
    /// The organization this client is scoped to.
    fn org(&self) -> &str;

    /// Lists all API Products in the organization.
    async fn products(&self) -> Result<Vec<Product>, ApigeeError>;

    /// Fetches one product in full, including operation-group configs
    /// (the listing endpoint omits them).
    async fn product(&self, name: &str) -> Result<Product, ApigeeError>;

    /// Lists all API proxies.
    async fn proxies(&self) -> Result<Vec<Proxy>, ApigeeError>;

    /// Lists all proxy deployments across environments.
    async fn deployments(&self) -> Result<Vec<Deployment>, ApigeeError>;

    /// Builds the environment/hostname/envgroup index for the organization.
    async fn env_map(&self) -> Result<EnvironmentMap, ApigeeError>;

    /// Console overview URL for a proxy, or an empty string when the
    /// proxy record is unknown.
    fn proxy_url(&self, proxy: Option<&Proxy>) -> String;
}
