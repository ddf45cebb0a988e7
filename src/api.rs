// API client module: a small blocking HTTP client that talks to the
// widget registry server. It is intentionally synchronous; the console
// issues one request at a time and never needs to overlap them.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Simple API client holding a reqwest blocking client and the base URL
/// of the widget server.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Payload for POST and PUT: `{"model": "WidgetName"}`.
#[derive(Serialize, Deserialize, Debug)]
pub struct ModelPayload {
    pub model: String,
}

/// Response from GET /widget_models.
#[derive(Serialize, Deserialize, Debug)]
pub struct WidgetListing {
    pub widget_models: Vec<String>,
}

impl ApiClient {
    /// Create an ApiClient configured from the environment variable
    /// `WIDGET_API_URL`, or fall back to `http://127.0.0.1:5000`.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("WIDGET_API_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".into());
        Self::new(base_url)
    }

    /// Create an ApiClient against an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch every widget name currently registered.
    pub fn list(&self) -> Result<WidgetListing> {
        let url = format!("{}/widget_models", &self.base_url);
        let res = self
            .client
            .get(&url)
            .send()
            .context("Failed to send list request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("List failed: {} - {}", status, txt);
        }
        let listing: WidgetListing = res.json().context("Parsing widget listing json")?;
        Ok(listing)
    }

    /// Register a new widget by POSTing its name.
    pub fn create(&self, name: &str) -> Result<ModelPayload> {
        let url = format!("{}/widget_models", &self.base_url);
        let payload = ModelPayload {
            model: name.to_string(),
        };
        let res = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .context("Failed to send create request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Create failed: {} - {}", status, txt);
        }
        let created: ModelPayload = res.json().context("Parsing create response json")?;
        Ok(created)
    }

    /// Rename an existing widget via PUT on its current name.
    pub fn rename(&self, old: &str, new: &str) -> Result<ModelPayload> {
        let url = format!("{}/widget_models/{}", &self.base_url, old);
        let payload = ModelPayload {
            model: new.to_string(),
        };
        let res = self
            .client
            .put(&url)
            .json(&payload)
            .send()
            .context("Failed to send rename request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Rename failed: {} - {}", status, txt);
        }
        let renamed: ModelPayload = res.json().context("Parsing rename response json")?;
        Ok(renamed)
    }

    /// Delete one widget, or every widget when `name` is `"all"`.
    /// Returns the status code so the caller can word its own message;
    /// the server sends no body for deletes.
    pub fn delete(&self, name: &str) -> Result<StatusCode> {
        let url = format!("{}/widget_models/{}", &self.base_url, name);
        let res = self
            .client
            .delete(&url)
            .send()
            .context("Failed to send delete request")?;
        let status = res.status();
        if !status.is_success() {
            anyhow::bail!("Delete failed: {}", status);
        }
        Ok(status)
    }
}
