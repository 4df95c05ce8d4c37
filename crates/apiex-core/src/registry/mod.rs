//! Output document models for the API hub registry.
//!
//! These serialize to the `apigeeregistry/v1` YAML patch format. Maps use
//! `BTreeMap` so repeated exports of the same input are byte-identical.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Schema version carried by every emitted document and item.
pub const REGISTRY_V1: &str = "apigeeregistry/v1";

/// Common header shared by every registry resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// One exported API, derived 1:1 from an Apigee product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Api {
    #[serde(flatten)]
    pub header: Header,
    pub data: ApiData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiData {
    pub display_name: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deployments: Vec<ApiDeployment>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
}

/// One deployment entry: a (deployment record, hostname) pair attached to
/// an owning API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiDeployment {
    #[serde(flatten)]
    pub header: Header,
    pub data: ApiDeploymentData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDeploymentData {
    pub display_name: String,

    #[serde(rename = "endpointURI")]
    pub endpoint_uri: String,
}

/// A typed side-payload attached to an API. The payload is kept as a
/// generic YAML value so the artifact schema stays open-ended.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(flatten)]
    pub header: Header,
    pub data: serde_yaml::Value,
}

/// An ordered collection of cross-links, emitted as artifact data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceList {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    pub references: Vec<Reference>,
}

/// A single cross-link: either internal (registry resource path) or
/// external (display name plus URI).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uri: String,
}

/// Top-level export output: the schema version plus every API in product
/// fetch order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub api_version: String,
    pub items: Vec<Api>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_skips_empty_maps() {
        let metadata = Metadata {
            name: "thing".to_string(),
            ..Metadata::default()
        };
        let yaml = serde_yaml::to_string(&metadata).unwrap();
        assert!(!yaml.contains("labels"));
        assert!(!yaml.contains("annotations"));
    }

    #[test]
    fn test_reference_skips_empty_fields() {
        let reference = Reference {
            id: "hello".to_string(),
            resource: "projects/x/locations/global/apis/hello".to_string(),
            ..Reference::default()
        };
        let yaml = serde_yaml::to_string(&reference).unwrap();
        assert!(yaml.contains("resource:"));
        assert!(!yaml.contains("displayName"));
        assert!(!yaml.contains("uri"));
    }

    #[test]
    fn test_endpoint_uri_field_name() {
        let data = ApiDeploymentData {
            display_name: "test (api.example.com)".to_string(),
            endpoint_uri: "https://api.example.com/hello".to_string(),
        };
        let yaml = serde_yaml::to_string(&data).unwrap();
        assert!(yaml.contains("endpointURI: https://api.example.com/hello"));
    }

    #[test]
    fn test_header_flattens_into_item() {
        let api = Api {
            header: Header {
                api_version: REGISTRY_V1.to_string(),
                kind: "API".to_string(),
                metadata: Metadata {
                    name: "hello".to_string(),
                    ..Metadata::default()
                },
            },
            ..Api::default()
        };
        let yaml = serde_yaml::to_string(&api).unwrap();
        assert!(yaml.contains("apiVersion: apigeeregistry/v1"));
        assert!(yaml.contains("kind: API"));
    }
}
