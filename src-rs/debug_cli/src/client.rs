use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};

use crate::models::{ConfigView, InferRequest, InferResponse};

pub struct HTTPClient {
    pub base_url: String,
    pub token: Option<String>,
    client: Client,
}

impl HTTPClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .map_err(|err| err.to_string())?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Router errors (400/502) still carry an `InferResponse` body.
    pub fn infer(&self, req: &InferRequest) -> Result<InferResponse, String> {
        let url = format!("{}/infer", self.base_url);
        let resp = self
            .authorize(self.client.post(url))
            .header(CONTENT_TYPE, "application/json")
            .json(req)
            .send()
            .map_err(|err| err.to_string())?;

        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        serde_json::from_str::<InferResponse>(&body)
            .map_err(|_| format!("http {}: {}", status.as_u16(), body))
    }

    pub fn config(&self) -> Result<ConfigView, String> {
        let url = format!("{}/config", self.base_url);
        let resp = self
            .authorize(self.client.get(url))
            .send()
            .map_err(|err| err.to_string())?;
        if resp.status().is_success() {
            resp.json::<ConfigView>().map_err(|err| err.to_string())
        } else {
            let status = resp.status();
            let body = resp.text().unwrap_or_default();
            Err(format!("http {}: {}", status.as_u16(), body))
        }
    }

    pub fn set_profile(&self, profile: &str) -> Result<String, String> {
        let url = format!("{}/config/profile", self.base_url);
        let resp = self
            .authorize(self.client.put(url))
            .json(&json!({"profile": profile}))
            .send()
            .map_err(|err| err.to_string())?;
        let status = resp.status();
        let value = resp.json::<Value>().map_err(|err| err.to_string())?;
        if status.is_success() {
            Ok(value["source"].as_str().unwrap_or(profile).to_string())
        } else {
            Err(value["error"].as_str().unwrap_or("request failed").to_string())
        }
    }

    pub fn health(&self) -> Result<Value, String> {
        let url = format!("{}/health", self.base_url);
        self.authorize(self.client.get(url))
            .send()
            .and_then(|resp| resp.json::<Value>())
            .map_err(|err| err.to_string())
    }
}
