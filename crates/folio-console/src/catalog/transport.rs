//! REST transport to the catalog backend
//!
//! Cookie-based session auth; JSON bodies; multipart for uploads. No
//! retries and no explicit per-request timeout beyond the client default.
//! Backend failure details are surfaced verbatim through
//! [`ConsoleError::from_backend_response`].

use crate::access::store::{MePermissions, PermissionsSource};
use crate::catalog::models::Page;
use crate::config::Config;
use crate::error::{ConsoleError, ConsoleResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Value of one active filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Free-text filter
    Text(String),

    /// Multi-select filter
    Selection(Vec<String>),
}

impl FilterValue {
    /// Whether the value carries nothing to filter on
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(text) => text.trim().is_empty(),
            FilterValue::Selection(options) => options.is_empty(),
        }
    }
}

/// Parameters of a paginated, filtered, sorted list request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    /// 1-based page number
    pub page: u32,

    /// Page size
    pub page_size: u32,

    /// Sort field, `None` for the backend default
    pub sort_field: Option<String>,

    /// Sort direction
    pub sort_ascending: bool,

    /// Clean filter object: no empty strings, no empty selections
    pub filters: BTreeMap<String, FilterValue>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
            sort_field: None,
            sort_ascending: true,
            filters: BTreeMap::new(),
        }
    }
}

impl ListParams {
    /// Query pairs for the list endpoint
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![("page".to_string(), self.page.to_string()), ("page_size".to_string(), self.page_size.to_string())];

        if let Some(field) = &self.sort_field {
            query.push(("sort".to_string(), field.clone()));
            query.push(("order".to_string(), if self.sort_ascending { "asc" } else { "desc" }.to_string()));
        }

        for (key, value) in &self.filters {
            match value {
                FilterValue::Text(text) => query.push((key.clone(), text.clone())),
                FilterValue::Selection(options) => query.push((key.clone(), options.join(","))),
            }
        }

        query
    }
}

/// Backend operations a data provider needs
#[async_trait]
pub trait EntityTransport: Send + Sync {
    /// Fetch one page of an entity collection
    async fn list(&self, path: &str, params: &ListParams) -> ConsoleResult<Page<Value>>;

    /// Create a record, returning the backend's representation
    async fn create(&self, path: &str, body: Value) -> ConsoleResult<Value>;

    /// Update a record, returning the backend's representation
    async fn update(&self, path: &str, id: i64, body: Value) -> ConsoleResult<Value>;

    /// Delete a record
    async fn delete(&self, path: &str, id: i64) -> ConsoleResult<()>;

    /// Upload a file, returning the stored metadata record
    async fn upload(&self, path: &str, field: &str, file_name: &str, bytes: Vec<u8>) -> ConsoleResult<Value>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
    api_base: String,
}

impl HttpTransport {
    /// Build a transport from the console configuration
    pub fn new(config: &Config) -> ConsoleResult<Self> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self {
            client,
            api_base: config.api_base_url(),
        })
    }

    fn collection_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_matches('/'))
    }

    fn record_url(&self, path: &str, id: i64) -> String {
        format!("{}/{}", self.collection_url(path), id)
    }

    async fn checked(response: reqwest::Response) -> ConsoleResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ConsoleError::from_backend_response(status.as_u16(), &body))
    }
}

#[async_trait]
impl EntityTransport for HttpTransport {
    async fn list(&self, path: &str, params: &ListParams) -> ConsoleResult<Page<Value>> {
        let response = self.client.get(self.collection_url(path)).query(&params.to_query()).send().await?;

        Ok(Self::checked(response).await?.json().await?)
    }

    async fn create(&self, path: &str, body: Value) -> ConsoleResult<Value> {
        let response = self.client.post(self.collection_url(path)).json(&body).send().await?;

        Ok(Self::checked(response).await?.json().await?)
    }

    async fn update(&self, path: &str, id: i64, body: Value) -> ConsoleResult<Value> {
        let response = self.client.put(self.record_url(path, id)).json(&body).send().await?;

        Ok(Self::checked(response).await?.json().await?)
    }

    async fn delete(&self, path: &str, id: i64) -> ConsoleResult<()> {
        let response = self.client.delete(self.record_url(path, id)).send().await?;

        Self::checked(response).await?;
        Ok(())
    }

    async fn upload(&self, path: &str, field: &str, file_name: &str, bytes: Vec<u8>) -> ConsoleResult<Value> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part(field.to_string(), part);

        let response = self.client.post(self.collection_url(path)).multipart(form).send().await?;

        Ok(Self::checked(response).await?.json().await?)
    }
}

#[async_trait]
impl PermissionsSource for HttpTransport {
    async fn me_permissions(&self) -> ConsoleResult<MePermissions> {
        let response = self.client.get(self.collection_url("users/me/permissions")).send().await?;

        Ok(Self::checked(response).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_building() {
        let mut params = ListParams {
            sort_field: Some("code".to_string()),
            sort_ascending: false,
            ..ListParams::default()
        };
        params.filters.insert("name".to_string(), FilterValue::Text("search".to_string()));
        params
            .filters
            .insert("categories".to_string(), FilterValue::Selection(vec!["web".to_string(), "ml".to_string()]));

        let query = params.to_query();

        assert!(query.contains(&("page".to_string(), "1".to_string())));
        assert!(query.contains(&("page_size".to_string(), "20".to_string())));
        assert!(query.contains(&("sort".to_string(), "code".to_string())));
        assert!(query.contains(&("order".to_string(), "desc".to_string())));
        assert!(query.contains(&("name".to_string(), "search".to_string())));
        assert!(query.contains(&("categories".to_string(), "web,ml".to_string())));
    }

    #[test]
    fn test_default_params_have_no_sort_pairs() {
        let query = ListParams::default().to_query();

        assert_eq!(query.len(), 2);
        assert!(!query.iter().any(|(k, _)| k == "sort" || k == "order"));
    }

    #[test]
    fn test_filter_value_emptiness() {
        assert!(FilterValue::Text("  ".to_string()).is_empty());
        assert!(FilterValue::Selection(vec![]).is_empty());
        assert!(!FilterValue::Text("x".to_string()).is_empty());
        assert!(!FilterValue::Selection(vec!["x".to_string()]).is_empty());
    }

    #[test]
    fn test_url_shapes() {
        let transport = HttpTransport::new(&Config::default()).unwrap();

        assert_eq!(transport.collection_url("projects"), "http://127.0.0.1:8000/api/projects");
        assert_eq!(transport.record_url("projects", 7), "http://127.0.0.1:8000/api/projects/7");
    }
}
