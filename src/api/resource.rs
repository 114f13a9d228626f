use super::error::ApiError;
use crate::traits::{HttpClient, HttpResponse, Method};
use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use url::Url;

const API_PATH: &str = "api/nutanix/v3/";

/// Page size used when listing entities by name
const LIST_LENGTH: u64 = 250;

/// Base URL plus HTTP client shared by every resource
#[derive(Clone)]
pub struct Connection {
    base_url: Url,
    client: Arc<dyn HttpClient>,
}

impl Connection {
    /// Connect to `https://<host>:<port>/api/nutanix/v3/`
    pub fn new(host: &str, port: u16, client: Arc<dyn HttpClient>) -> Result<Self> {
        let base_url = Url::parse(&format!("https://{}:{}/", host, port))
            .and_then(|url| url.join(API_PATH))
            .with_context(|| format!("Invalid server address {}:{}", host, port))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// API handle for one resource collection (e.g. `images`)
    pub fn resource(&self, name: &str) -> ResourceApi {
        ResourceApi {
            connection: self.clone(),
            name: name.to_string(),
        }
    }

    fn request(&self, method: Method, relative: &str, body: Option<&Value>) -> Result<Value> {
        let url = self
            .base_url
            .join(relative)
            .with_context(|| format!("Invalid API path {}", relative))?;

        let response = self.client.send(method, url.as_str(), body)?;
        Self::into_json(response)
    }

    fn into_json(response: HttpResponse) -> Result<Value> {
        if !response.is_success() {
            return Err(ApiError::from_response(&response).into());
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&response.body).context("Failed to parse API response")
    }
}

/// List/create/read operations on one REST resource collection
pub struct ResourceApi {
    connection: Connection,
    name: String,
}

impl ResourceApi {
    /// `POST <resource>/list`
    pub fn list(&self, payload: Option<&Value>) -> Result<Value> {
        let payload = payload.cloned().unwrap_or_else(|| json!({"length": LIST_LENGTH}));
        self.connection
            .request(Method::Post, &format!("{}/list", self.name), Some(&payload))
    }

    /// `POST <resource>`
    pub fn create(&self, payload: &Value) -> Result<Value> {
        self.connection.request(Method::Post, &self.name, Some(payload))
    }

    /// `GET <resource>/<id>`
    pub fn read(&self, id: &str) -> Result<Value> {
        self.connection
            .request(Method::Get, &format!("{}/{}", self.name, id), None)
    }

    /// Map `status.name` to `metadata.uuid` for every listed entity
    pub fn get_name_uuid_map(&self, payload: Option<&Value>) -> Result<BTreeMap<String, String>> {
        let response = self.list(payload)?;

        let entities = response
            .get("entities")
            .and_then(|e| e.as_array())
            .map(|e| e.as_slice())
            .unwrap_or_default();

        Ok(entities
            .iter()
            .filter_map(|entity| {
                let name = entity.pointer("/status/name")?.as_str()?;
                let uuid = entity.pointer("/metadata/uuid")?.as_str()?;
                Some((name.to_string(), uuid.to_string()))
            })
            .collect())
    }
}
