//! Wire types for the Apigee management API.
//!
//! These mirror the JSON shapes returned by the v1 management endpoints.
//! Only the fields the export pipeline reads are modeled; everything else
//! is ignored on deserialization.

use serde::{Deserialize, Serialize};

/// An API Product: a named bundle of access rules over one or more proxies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub name: String,

    /// Proxy names explicitly bound to this product.
    pub proxies: Vec<String>,

    /// Operation-level configuration, which may bind additional proxies.
    pub operation_group: Option<OperationGroup>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationGroup {
    pub operation_configs: Vec<OperationConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationConfig {
    /// The proxy this operation config routes to, if any.
    pub api_source: String,
}

/// An API proxy, the deployable implementation unit behind a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Proxy {
    pub name: String,
}

/// A record that a proxy revision is running in an environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Deployment {
    pub api_proxy: String,
    pub environment: String,
    pub revision: String,
}
