//! Analytics server client abstraction and the reqwest implementation.
//!
//! The trait covers every call the TUI makes. Mock mode never constructs
//! a client, so everything here assumes a live server.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;

use crate::domain::browse::{Collection, CollectionId, CollectionItem};
use crate::domain::dashboard::{CardId, DashCardId, DashboardId, Parameter, ParameterId};
use crate::infrastructure::api::types::{
    access_level, CollectionItemsDoc, DashboardDoc, DatabaseDoc, DatasetDoc, ParameterValuesDoc,
    PermissionsGraphDoc, PermissionsGroupDoc, PermissionsMatrix, PermissionsRow, PublicLinkDoc,
    User,
};

/// Transport failures classified by HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized - check the API key")]
    Unauthorized,
    #[error("not found: {path}")]
    NotFound { path: String },
    #[error("server returned {status} for {path}")]
    Status { status: u16, path: String },
}

/// Abstract analytics server client
///
/// This trait defines all the operations we need for the TUI,
/// abstracting over the HTTP transport.
#[async_trait::async_trait]
pub trait AnalyticsApi: Send + Sync + 'static {
    /// Probe the server and return its health status string
    async fn health(&self) -> Result<String>;

    /// Get the user the API key authenticates as
    async fn current_user(&self) -> Result<User>;

    /// List all collections visible to the current user
    async fn list_collections(&self) -> Result<Vec<Collection>>;

    /// List items in a collection (None = the root collection)
    async fn collection_items(&self, id: Option<CollectionId>) -> Result<Vec<CollectionItem>>;

    /// Fetch a dashboard with its card placements
    async fn fetch_dashboard(&self, id: DashboardId) -> Result<DashboardDoc>;

    /// Update dashboard attributes, returning the saved record
    async fn update_dashboard(
        &self,
        id: DashboardId,
        attributes: &serde_json::Map<String, Value>,
    ) -> Result<DashboardDoc>;

    /// Run one placement's card query with the applied filters
    async fn run_card_query(
        &self,
        dashboard_id: DashboardId,
        dashcard_id: DashCardId,
        card_id: CardId,
        parameters: Vec<Value>,
    ) -> Result<DatasetDoc>;

    /// Search a parameter's value list for typeahead
    async fn search_parameter_values(
        &self,
        dashboard_id: DashboardId,
        parameter_id: &ParameterId,
        query: &str,
    ) -> Result<ParameterValuesDoc>;

    /// Create a public link, returning its UUID
    async fn create_public_link(&self, id: DashboardId) -> Result<PublicLinkDoc>;

    /// Revoke a dashboard's public link
    async fn delete_public_link(&self, id: DashboardId) -> Result<()>;

    /// Assemble the group-by-database permissions view
    async fn permissions_matrix(&self) -> Result<PermissionsMatrix>;

    /// Read a server setting
    async fn read_setting(&self, key: &str) -> Result<Value>;

    /// Write a server setting
    async fn write_setting(&self, key: &str, value: Value) -> Result<()>;

    /// Get endpoint display name
    fn endpoint_name(&self) -> String;
}

/// Build the filter payload a card query expects. Only parameters with
/// an applied value are sent.
pub fn parameter_payload(
    parameters: &[Parameter],
    values: &BTreeMap<ParameterId, Value>,
) -> Vec<Value> {
    parameters
        .iter()
        .filter_map(|parameter| {
            let value = values.get(&parameter.id).filter(|v| !v.is_null())?;
            Some(json!({
                "id": parameter.id,
                "type": parameter.kind,
                "value": value,
            }))
        })
        .collect()
}

/// reqwest-backed client holding the base URL and optional API key.
pub struct HttpApi {
    client: reqwest::Client,
    base: Url,
    api_key: Option<String>,
}

/// Create a client from configuration
pub fn create_api(url: &str, api_key: Option<String>) -> Result<Box<dyn AnalyticsApi>> {
    Ok(Box::new(HttpApi::new(url, api_key)?))
}

impl HttpApi {
    pub fn new(url: &str, api_key: Option<String>) -> Result<Self> {
        let base = Url::parse(url).with_context(|| format!("invalid server URL: {url}"))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("glint/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base,
            api_key,
        })
    }

    /// Join path segments onto the base URL with proper encoding.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("server URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.api_key {
            Some(key) => builder.header("X-Api-Key", key),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response> {
        let response = builder.send().await.context("request failed")?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let path = response.url().path().to_string();
        let error = match status.as_u16() {
            401 | 403 => ApiError::Unauthorized,
            404 => ApiError::NotFound { path },
            code => ApiError::Status { status: code, path },
        };
        Err(error.into())
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        let response = self.send(self.request(Method::GET, url)).await?;
        response
            .json::<T>()
            .await
            .context("failed to decode response")
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &Value,
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        let response = self
            .send(self.request(method, url).json(body))
            .await?;
        response
            .json::<T>()
            .await
            .context("failed to decode response")
    }
}

/// `GET /api/database` responses are paged on recent servers and a bare
/// array on older ones.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum DatabaseListing {
    Paged { data: Vec<DatabaseDoc> },
    Plain(Vec<DatabaseDoc>),
}

impl DatabaseListing {
    fn into_databases(self) -> Vec<DatabaseDoc> {
        match self {
            DatabaseListing::Paged { data } => data,
            DatabaseListing::Plain(databases) => databases,
        }
    }
}

#[async_trait::async_trait]
impl AnalyticsApi for HttpApi {
    async fn health(&self) -> Result<String> {
        let doc: Value = self.get_json(&["api", "health"]).await?;
        Ok(doc
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("ok")
            .to_string())
    }

    async fn current_user(&self) -> Result<User> {
        self.get_json(&["api", "user", "current"]).await
    }

    async fn list_collections(&self) -> Result<Vec<Collection>> {
        self.get_json(&["api", "collection"]).await
    }

    async fn collection_items(&self, id: Option<CollectionId>) -> Result<Vec<CollectionItem>> {
        let id = match id {
            Some(id) => id.to_string(),
            None => "root".to_string(),
        };
        let doc: CollectionItemsDoc = self
            .get_json(&["api", "collection", &id, "items"])
            .await?;
        Ok(doc.into_items())
    }

    async fn fetch_dashboard(&self, id: DashboardId) -> Result<DashboardDoc> {
        self.get_json(&["api", "dashboard", &id.to_string()]).await
    }

    async fn update_dashboard(
        &self,
        id: DashboardId,
        attributes: &serde_json::Map<String, Value>,
    ) -> Result<DashboardDoc> {
        self.send_json(
            Method::PUT,
            &["api", "dashboard", &id.to_string()],
            &Value::Object(attributes.clone()),
        )
        .await
    }

    async fn run_card_query(
        &self,
        dashboard_id: DashboardId,
        dashcard_id: DashCardId,
        card_id: CardId,
        parameters: Vec<Value>,
    ) -> Result<DatasetDoc> {
        self.send_json(
            Method::POST,
            &[
                "api",
                "dashboard",
                &dashboard_id.to_string(),
                "dashcard",
                &dashcard_id.to_string(),
                "card",
                &card_id.to_string(),
                "query",
            ],
            &json!({ "parameters": parameters }),
        )
        .await
    }

    async fn search_parameter_values(
        &self,
        dashboard_id: DashboardId,
        parameter_id: &ParameterId,
        query: &str,
    ) -> Result<ParameterValuesDoc> {
        self.get_json(&[
            "api",
            "dashboard",
            &dashboard_id.to_string(),
            "params",
            parameter_id,
            "search",
            query,
        ])
        .await
    }

    async fn create_public_link(&self, id: DashboardId) -> Result<PublicLinkDoc> {
        self.send_json(
            Method::POST,
            &["api", "dashboard", &id.to_string(), "public_link"],
            &json!({}),
        )
        .await
    }

    async fn delete_public_link(&self, id: DashboardId) -> Result<()> {
        let url = self.endpoint(&["api", "dashboard", &id.to_string(), "public_link"])?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn permissions_matrix(&self) -> Result<PermissionsMatrix> {
        let graph: PermissionsGraphDoc = self.get_json(&["api", "permissions", "graph"]).await?;
        let groups: Vec<PermissionsGroupDoc> =
            self.get_json(&["api", "permissions", "group"]).await?;
        let listing: DatabaseListing = self.get_json(&["api", "database"]).await?;
        let mut databases = listing.into_databases();
        databases.sort_by_key(|database| database.id);

        let rows = groups
            .iter()
            .map(|group| {
                let grants = graph.groups.get(&group.id.to_string());
                let levels = databases
                    .iter()
                    .map(|database| {
                        let descriptor =
                            grants.and_then(|grants| grants.get(&database.id.to_string()));
                        access_level(descriptor)
                    })
                    .collect();
                PermissionsRow {
                    group: group.name.clone(),
                    levels,
                }
            })
            .collect();

        Ok(PermissionsMatrix {
            revision: graph.revision,
            databases: databases.into_iter().map(|database| database.name).collect(),
            rows,
        })
    }

    async fn read_setting(&self, key: &str) -> Result<Value> {
        self.get_json(&["api", "setting", key]).await
    }

    async fn write_setting(&self, key: &str, value: Value) -> Result<()> {
        let url = self.endpoint(&["api", "setting", key])?;
        self.send(self.request(Method::PUT, url).json(&json!({ "value": value })))
            .await?;
        Ok(())
    }

    fn endpoint_name(&self) -> String {
        self.base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameter(id: &str, kind: &str) -> Parameter {
        serde_json::from_value(json!({
            "id": id,
            "name": id,
            "slug": id,
            "type": kind,
        }))
        .unwrap()
    }

    #[test]
    fn test_parameter_payload_skips_unapplied() {
        let parameters = vec![
            parameter("state", "category"),
            parameter("date", "date/all-options"),
            parameter("plan", "string/="),
        ];
        let mut values = BTreeMap::new();
        values.insert("state".to_string(), json!("CA"));
        values.insert("plan".to_string(), Value::Null);

        let payload = parameter_payload(&parameters, &values);
        assert_eq!(payload.len(), 1, "missing and cleared values both drop out");
        assert_eq!(payload[0]["id"], "state");
        assert_eq!(payload[0]["type"], "category");
        assert_eq!(payload[0]["value"], "CA");
    }

    #[test]
    fn test_endpoint_joins_and_encodes_segments() {
        let api = HttpApi::new("http://localhost:3000/", None).unwrap();
        let url = api
            .endpoint(&["api", "dashboard", "7", "params", "p1", "search", "new york"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/dashboard/7/params/p1/search/new%20york"
        );
    }

    #[test]
    fn test_endpoint_respects_base_path() {
        let api = HttpApi::new("https://bi.example.com/analytics", None).unwrap();
        let url = api.endpoint(&["api", "health"]).unwrap();
        assert_eq!(url.as_str(), "https://bi.example.com/analytics/api/health");
    }
}
