use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ApigeeClient, ApigeeError, Deployment, EnvironmentMap, Product, Proxy};
use crate::config::{ApigeeConfig, DEFAULT_APIGEE_URL, DEFAULT_CONSOLE_URL};

/// Apigee management API client.
pub struct RestClient {
    org: String,
    base_url: String,
    console_url: String,
    token: String,
    client: Client,
}

impl RestClient {
    /// Creates a new client for the given organization and bearer token.
    pub fn new(org: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            base_url: DEFAULT_APIGEE_URL.to_string(),
            console_url: DEFAULT_CONSOLE_URL.to_string(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Creates a client from loaded configuration.
    pub fn from_config(org: impl Into<String>, config: &ApigeeConfig) -> Result<Self, ApigeeError> {
        let token = config.token_or_env().ok_or(ApigeeError::MissingToken)?;
        Ok(Self::new(org, token)
            .with_base_url(&config.base_url)
            .with_console_url(&config.console_url))
    }

    /// Sets the management API base URL (for emulators or regional endpoints).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the console base URL used for proxy dependency links.
    pub fn with_console_url(mut self, url: impl Into<String>) -> Self {
        self.console_url = url.into();
        self
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApigeeError> {
        let url = format!("{}/v1/organizations/{}/{}", self.base_url, self.org, path);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApigeeError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApigeeError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl ApigeeClient for RestClient {
    fn org(&self) -> &str {
        &self.org
    }

    async fn products(&self) -> Result<Vec<Product>, ApigeeError> {
        let list: ProductList = self.get("apiproducts").await?;
        Ok(list.api_product)
    }

    async fn product(&self, name: &str) -> Result<Product, ApigeeError> {
        self.get(&format!("apiproducts/{name}")).await
    }

    async fn proxies(&self) -> Result<Vec<Proxy>, ApigeeError> {
        let list: ProxyList = self.get("apis").await?;
        Ok(list.proxies)
    }

    async fn deployments(&self) -> Result<Vec<Deployment>, ApigeeError> {
        let list: DeploymentList = self.get("deployments").await?;
        Ok(list.deployments)
    }

    async fn env_map(&self) -> Result<EnvironmentMap, ApigeeError> {
        let groups: EnvgroupList = self.get("envgroups").await?;

        let mut map = EnvironmentMap::new();
        for group in &groups.environment_groups {
            let attachments: AttachmentList = self
                .get(&format!("envgroups/{}/attachments", group.name))
                .await?;
            let environments: Vec<String> = attachments
                .environment_group_attachments
                .into_iter()
                .map(|a| a.environment)
                .collect();
            let envgroup = format!("organizations/{}/envgroups/{}", self.org, group.name);
            map.insert_group(envgroup, &environments, &group.hostnames);
        }
        Ok(map)
    }

    fn proxy_url(&self, proxy: Option<&Proxy>) -> String {
        match proxy {
            Some(p) => format!(
                "{}/proxies/{}/overview?project={}",
                self.console_url, p.name, self.org
            ),
            None => String::new(),
        }
    }
}

// Listing envelopes. The management API wraps each collection in a
// single-field object.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ProductList {
    api_product: Vec<Product>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProxyList {
    proxies: Vec<Proxy>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DeploymentList {
    deployments: Vec<Deployment>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct EnvgroupList {
    environment_groups: Vec<Envgroup>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Envgroup {
    name: String,
    hostnames: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AttachmentList {
    environment_group_attachments: Vec<Attachment>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Attachment {
    environment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_url_known_proxy() {
        let client = RestClient::new("myorg", "token");
        let proxy = Proxy {
            name: "helloworld".to_string(),
        };
        assert_eq!(
            client.proxy_url(Some(&proxy)),
            "https://console.cloud.google.com/apigee/proxies/helloworld/overview?project=myorg"
        );
    }

    #[test]
    fn test_proxy_url_unknown_proxy_is_empty() {
        let client = RestClient::new("myorg", "token");
        assert_eq!(client.proxy_url(None), "");
    }

    #[test]
    fn test_product_list_envelope() {
        let json = r#"{"apiProduct": [{"name": "helloworld", "proxies": ["hello-v1"]}]}"#;
        let list: ProductList = serde_json::from_str(json).unwrap();
        assert_eq!(list.api_product.len(), 1);
        assert_eq!(list.api_product[0].name, "helloworld");
        assert_eq!(list.api_product[0].proxies, vec!["hello-v1"]);
    }

    #[test]
    fn test_deployment_envelope() {
        let json = r#"{"deployments": [{"apiProxy": "hello-v1", "environment": "test", "revision": "3"}]}"#;
        let list: DeploymentList = serde_json::from_str(json).unwrap();
        assert_eq!(list.deployments[0].api_proxy, "hello-v1");
        assert_eq!(list.deployments[0].revision, "3");
    }
}
