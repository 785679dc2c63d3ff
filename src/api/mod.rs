// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

//! Client for the Autoaddress Eircode lookup API.
//!
//! See the [Autoaddress developer centre](https://www.autoaddress.ie/support/developer-centre/api)
//! for the shape of the returned documents.

pub mod response;
pub mod types;

use std::path::PathBuf;
use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::transaction_log;
use crate::version;

use types::{
    Country, Endpoint, FindAddressRequest, KEY_ADDRESS, KEY_ECAD_ID, KEY_KEY, KEY_LANGUAGE,
    KEY_POSTCODE, Language,
};

/// The current Autoaddress API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.autoaddress.ie/2.0";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct EircodeApi {
    client: Client,
    developer_key: String,
    base_url: Url,
    default_language: Option<Language>,
    default_country: Option<Country>,
    transaction_log: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct EircodeApiBuilder {
    developer_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    default_language: Option<Language>,
    default_country: Option<Country>,
    transaction_log: Option<PathBuf>,
}

impl EircodeApiBuilder {
    pub fn developer_key(mut self, key: impl Into<String>) -> Self {
        self.developer_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn default_language(mut self, language: Language) -> Self {
        self.default_language = Some(language);
        self
    }

    pub fn default_country(mut self, country: Country) -> Self {
        self.default_country = Some(country);
        self
    }

    /// Log this client's exchanges to the given JSON-lines file.
    ///
    /// Only affects the client being built. Without it, the client still
    /// writes to the process-wide log when [`transaction_log::start`] has
    /// been called.
    pub fn transaction_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.transaction_log = Some(path.into());
        self
    }

    pub fn build(self) -> Result<EircodeApi> {
        let developer_key = self
            .developer_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::Config("Developer key must not be empty".to_string()))?;

        let base_url = parse_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let client = Client::builder()
            .user_agent(version::user_agent())
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        if let Some(path) = &self.transaction_log {
            tracing::info!(path = %path.display(), "transaction log enabled");
        }

        Ok(EircodeApi {
            client,
            developer_key,
            base_url,
            default_language: self.default_language,
            default_country: self.default_country,
            transaction_log: self.transaction_log,
        })
    }
}

/// Parse a base URL, normalizing it so that endpoint paths join beneath it.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("Invalid base URL '{}'", raw)));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

impl EircodeApi {
    /// Create a client against the public API with default settings.
    pub fn new(developer_key: impl Into<String>) -> Result<Self> {
        Self::builder().developer_key(developer_key).build()
    }

    pub fn builder() -> EircodeApiBuilder {
        EircodeApiBuilder::default()
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Self::builder().developer_key(config.developer_key()?);
        if let Some(url) = &config.base_url {
            builder = builder.base_url(url.clone());
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(language) = config.language {
            builder = builder.default_language(language);
        }
        if let Some(country) = config.country {
            builder = builder.default_country(country);
        }
        if let Some(path) = &config.transaction_log {
            builder = builder.transaction_log(path.clone());
        }
        builder.build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the full request URL for an endpoint. The developer key is
    /// always the first query parameter.
    pub fn endpoint_url(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.join(endpoint.path())?;
        {
            let mut query = url.query_pairs_mut();
            query.clear();
            query.append_pair(KEY_KEY, &self.developer_key);
            for (k, v) in params {
                query.append_pair(k, v);
            }
        }
        Ok(url)
    }

    async fn send(&self, endpoint: Endpoint, params: Vec<(&'static str, String)>) -> Result<Value> {
        let url = self.endpoint_url(endpoint, &params)?;
        tracing::debug!(%endpoint, params = params.len(), "sending request");

        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        tracing::debug!(
            %endpoint,
            status = status.as_u16(),
            bytes = body.len(),
            "received response"
        );

        if self.transaction_log.is_some() || transaction_log::is_active() {
            let logged = serde_json::from_slice(&body)
                .unwrap_or_else(|_| serde_json::json!({ "raw": String::from_utf8_lossy(&body) }));
            match &self.transaction_log {
                Some(path) => transaction_log::log_to(path, &url, status.as_u16(), logged),
                None => transaction_log::log(&url, status.as_u16(), logged),
            }
        }

        let result = response::parse_body(status, &body);
        if let Err(err) = &result {
            tracing::warn!(%endpoint, error = %err, "request failed");
        }
        result
    }

    /// Find an address.
    ///
    /// When the request leaves language or country unset, the client
    /// defaults (if any) are used.
    pub async fn find_address(&self, request: &FindAddressRequest) -> Result<Value> {
        let mut request = request.clone();
        if request.language.is_none() {
            request.language = self.default_language;
        }
        if request.country.is_none() {
            request.country = self.default_country;
        }
        self.send(Endpoint::FindAddress, request.query_pairs())
            .await
    }

    /// Look up a postcode.
    pub async fn postcode_lookup(&self, postcode: &str) -> Result<Value> {
        self.send(
            Endpoint::PostcodeLookup,
            vec![(KEY_POSTCODE, postcode.to_string())],
        )
        .await
    }

    /// Verify an address against a postcode. The address is comma separated.
    pub async fn verify_address(
        &self,
        postcode: &str,
        address: &str,
        language: Option<Language>,
    ) -> Result<Value> {
        let mut params = vec![
            (KEY_POSTCODE, postcode.to_string()),
            (KEY_ADDRESS, address.to_string()),
        ];
        if let Some(language) = language.or(self.default_language) {
            params.push((KEY_LANGUAGE, language.as_str().to_string()));
        }
        self.send(Endpoint::VerifyAddress, params).await
    }

    /// Get the Eircode Address Database record for an ECAD id.
    pub async fn get_ecad_data(&self, ecad_id: &str) -> Result<Value> {
        self.send(Endpoint::GetEcadData, vec![(KEY_ECAD_ID, ecad_id.to_string())])
            .await
    }
}
