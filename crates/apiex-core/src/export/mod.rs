//! The product export pipeline.
//!
//! Correlates five independently fetched Apigee collections — products,
//! proxies, deployments, environments and environment groups — into one
//! registry document. The join chain: a product binds proxies by name,
//! proxies are deployed to environments, environments resolve to hostnames,
//! hostnames resolve to environment groups. Each product becomes an API
//! item; each (deployment, hostname) pair becomes a deployment entry on
//! every API bound to the deployed proxy.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use tracing::warn;

use crate::apigee::{ApigeeClient, ApigeeError, Deployment, Product, Proxy};
use crate::label::label;
use crate::registry::{
    Api, ApiData, ApiDeployment, ApiDeploymentData, Artifact, ExportDocument, Header, Metadata,
    Reference, ReferenceList, REGISTRY_V1,
};

/// Errors that abort an export. Resolution misses (unknown environment or
/// proxy) are not errors; they are logged and skipped.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Apigee fetch failed: {0}")]
    Fetch(#[from] ApigeeError),

    #[error("Failed to encode artifact payload: {0}")]
    Artifact(#[from] serde_yaml::Error),
}

/// Runs one product export against an Apigee organization.
pub struct Exporter<C: ApigeeClient> {
    client: C,
}

impl<C: ApigeeClient> Exporter<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Exports every API Product in the organization as a registry document.
    ///
    /// Single deterministic pass: products are transformed in fetch order,
    /// references in bound-proxy order, deployments in discovery order.
    /// Any fetch or serialization failure aborts with no partial output.
    pub async fn export(&self) -> Result<ExportDocument, ExportError> {
        let products = self.client.products().await?;

        let proxies = self.client.proxies().await?;
        let proxy_index = proxy_index(&proxies);

        let mut apis: Vec<Api> = Vec::new();
        // Reverse index consumed by deployment resolution: proxy name to
        // the positions of every API that bound it. Indices instead of
        // references so the Api vec stays mutable.
        let mut apis_by_proxy: HashMap<String, Vec<usize>> = HashMap::new();

        for listed in &products {
            // The listing endpoint omits operation configs.
            let product = self.client.product(&listed.name).await?;

            let idx = apis.len();
            apis.push(self.product_api(&product));

            let bound = bound_proxies(&product);
            if bound.is_empty() {
                continue;
            }

            let mut related = ReferenceList::default();
            let mut dependencies = ReferenceList::default();
            for proxy in &bound {
                apis_by_proxy.entry(proxy.clone()).or_default().push(idx);

                related.references.push(Reference {
                    id: format!("{}-{}-proxy", self.client.org(), proxy),
                    resource: format!(
                        "projects/{}/locations/global/apis/{}-{}-proxy",
                        self.client.org(),
                        self.client.org(),
                        proxy
                    ),
                    ..Reference::default()
                });

                dependencies.references.push(Reference {
                    id: proxy.clone(),
                    display_name: format!("{proxy} (Apigee)"),
                    uri: self
                        .client
                        .proxy_url(proxy_index.get(proxy.as_str()).copied()),
                    ..Reference::default()
                });
            }

            let api = &mut apis[idx];
            api.data
                .artifacts
                .push(reference_artifact("apihub-related", &related)?);
            api.data
                .artifacts
                .push(reference_artifact("apihub-dependencies", &dependencies)?);
        }

        self.add_deployments(&mut apis, &apis_by_proxy).await?;

        Ok(ExportDocument {
            api_version: REGISTRY_V1.to_string(),
            items: apis,
        })
    }

    /// Builds the API item for one product. Artifacts and deployments are
    /// attached later.
    fn product_api(&self, product: &Product) -> Api {
        let org = self.client.org();
        Api {
            header: Header {
                api_version: REGISTRY_V1.to_string(),
                kind: "API".to_string(),
                metadata: Metadata {
                    name: label(&product.name),
                    labels: BTreeMap::from([
                        ("apihub-kind".to_string(), "product".to_string()),
                        ("apihub-business-unit".to_string(), org.to_string()),
                        ("apihub-target-users".to_string(), "internal".to_string()),
                    ]),
                    annotations: BTreeMap::from([(
                        "apigee-product".to_string(),
                        format!("organizations/{}/apiproducts/{}", org, product.name),
                    )]),
                },
            },
            data: ApiData {
                display_name: product.name.clone(),
                description: format!("{} API Product for internal/admin users.", product.name),
                deployments: Vec::new(),
                artifacts: Vec::new(),
            },
        }
    }

    /// Resolves every deployment record against the environment map and the
    /// proxy reverse index, fanning out one deployment entry per
    /// (hostname, owning API) pair.
    ///
    /// No-op when no product bound any proxy; the environment and
    /// deployment listings are not fetched at all in that case.
    async fn add_deployments(
        &self,
        apis: &mut [Api],
        apis_by_proxy: &HashMap<String, Vec<usize>>,
    ) -> Result<(), ExportError> {
        if apis_by_proxy.is_empty() {
            return Ok(());
        }

        let env_map = self.client.env_map().await?;
        let deployments = self.client.deployments().await?;

        for deployment in &deployments {
            let Some(hostnames) = env_map.hostnames(&deployment.environment) else {
                warn!(
                    environment = %deployment.environment,
                    proxy = %deployment.api_proxy,
                    "failed to find hostnames for environment"
                );
                continue;
            };

            for hostname in hostnames {
                let owners = apis_by_proxy
                    .get(&deployment.api_proxy)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                if owners.is_empty() {
                    warn!(
                        proxy = %deployment.api_proxy,
                        environment = %deployment.environment,
                        "unknown product for deployment"
                    );
                    continue;
                }

                let envgroup = env_map.envgroup(hostname).unwrap_or_default();
                for &idx in owners {
                    apis[idx]
                        .data
                        .deployments
                        .push(self.api_deployment(deployment, hostname, envgroup));
                }
            }
        }
        Ok(())
    }

    fn api_deployment(
        &self,
        deployment: &Deployment,
        hostname: &str,
        envgroup: &str,
    ) -> ApiDeployment {
        let org = self.client.org();
        ApiDeployment {
            header: Header {
                api_version: REGISTRY_V1.to_string(),
                kind: "Deployment".to_string(),
                metadata: Metadata {
                    name: label(hostname),
                    labels: BTreeMap::new(),
                    annotations: BTreeMap::from([
                        (
                            "apigee-proxy-revision".to_string(),
                            format!(
                                "organizations/{}/apis/{}/revisions/{}",
                                org, deployment.api_proxy, deployment.revision
                            ),
                        ),
                        (
                            "apigee-environment".to_string(),
                            format!(
                                "organizations/{}/environments/{}",
                                org, deployment.environment
                            ),
                        ),
                        ("apigee-envgroup".to_string(), envgroup.to_string()),
                    ]),
                },
            },
            data: ApiDeploymentData {
                display_name: format!("{} ({})", deployment.environment, hostname),
                // TODO: should use the proxy base path instead of its name
                endpoint_uri: format!("https://{}/{}", hostname, deployment.api_proxy),
            },
        }
    }
}

/// Index from proxy name to proxy record. Last write wins on duplicate
/// names, which the management API does not produce.
fn proxy_index(proxies: &[Proxy]) -> HashMap<&str, &Proxy> {
    proxies.iter().map(|p| (p.name.as_str(), p)).collect()
}

/// The full set of proxies a product binds: the explicit proxy list plus
/// every operation config naming a source proxy. Order preserved,
/// duplicates kept.
fn bound_proxies(product: &Product) -> Vec<String> {
    let mut proxies = product.proxies.clone();
    if let Some(group) = &product.operation_group {
        for config in &group.operation_configs {
            if !config.api_source.is_empty() {
                proxies.push(config.api_source.clone());
            }
        }
    }
    proxies
}

/// Wraps a reference list as a named ReferenceList artifact. Fails only if
/// the payload cannot be encoded into the generic artifact data value.
fn reference_artifact(name: &str, references: &ReferenceList) -> Result<Artifact, ExportError> {
    Ok(Artifact {
        header: Header {
            api_version: REGISTRY_V1.to_string(),
            kind: "ReferenceList".to_string(),
            metadata: Metadata {
                name: name.to_string(),
                ..Metadata::default()
            },
        },
        data: serde_yaml::to_value(references)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apigee::{OperationConfig, OperationGroup};

    #[test]
    fn test_bound_proxies_explicit_only() {
        let product = Product {
            name: "p".to_string(),
            proxies: vec!["a".to_string(), "b".to_string()],
            operation_group: None,
        };
        assert_eq!(bound_proxies(&product), vec!["a", "b"]);
    }

    #[test]
    fn test_bound_proxies_includes_operation_sources() {
        let product = Product {
            name: "p".to_string(),
            proxies: vec!["a".to_string()],
            operation_group: Some(OperationGroup {
                operation_configs: vec![
                    OperationConfig {
                        api_source: "b".to_string(),
                    },
                    OperationConfig {
                        api_source: String::new(),
                    },
                ],
            }),
        };
        assert_eq!(bound_proxies(&product), vec!["a", "b"]);
    }

    #[test]
    fn test_bound_proxies_keeps_duplicates() {
        let product = Product {
            name: "p".to_string(),
            proxies: vec!["a".to_string()],
            operation_group: Some(OperationGroup {
                operation_configs: vec![OperationConfig {
                    api_source: "a".to_string(),
                }],
            }),
        };
        assert_eq!(bound_proxies(&product), vec!["a", "a"]);
    }

    #[test]
    fn test_proxy_index_last_write_wins() {
        let proxies = vec![
            Proxy {
                name: "a".to_string(),
            },
            Proxy {
                name: "a".to_string(),
            },
        ];
        let index = proxy_index(&proxies);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_reference_artifact_shape() {
        let list = ReferenceList {
            references: vec![Reference {
                id: "x".to_string(),
                ..Reference::default()
            }],
            ..ReferenceList::default()
        };
        let artifact = reference_artifact("apihub-related", &list).unwrap();
        assert_eq!(artifact.header.kind, "ReferenceList");
        assert_eq!(artifact.header.metadata.name, "apihub-related");
        let decoded: ReferenceList = serde_yaml::from_value(artifact.data).unwrap();
        assert_eq!(decoded.references.len(), 1);
    }
}
