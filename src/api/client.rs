use crate::api::api_types::{ApiPokemon, ApiPokemonListResponse};
use crate::api::error::RemoteError;
use crate::api::PokeApi;
use crate::config::ApiConfig;
use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// PokeAPI HTTP client
#[derive(Clone)]
pub struct PokeApiClient {
  http: reqwest::Client,
  base: Url,
}

impl PokeApiClient {
  pub fn new(config: &ApiConfig) -> Result<Self> {
    // Without the trailing slash, joins would replace the last base segment
    let base = if config.base_url.ends_with('/') {
      config.base_url.clone()
    } else {
      format!("{}/", config.base_url)
    };
    let base =
      Url::parse(&base).map_err(|e| eyre!("Invalid API base URL {}: {}", config.base_url, e))?;

    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { http, base })
  }

  fn resolve(&self, path: &str) -> Result<Url, RemoteError> {
    self
      .base
      .join(path)
      .map_err(|e| RemoteError::Transport {
        message: format!("Invalid request path {}: {}", path, e),
        refused: false,
      })
  }

  async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RemoteError> {
    debug!("GET {}", url);

    let response = self
      .http
      .get(url)
      .send()
      .await
      .map_err(RemoteError::from_transport)?;

    let status = response.status();
    if !status.is_success() {
      return Err(RemoteError::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
      });
    }

    let body = response
      .bytes()
      .await
      .map_err(RemoteError::from_transport)?;

    // Invalid UTF-8 must fail decoding, not be patched into the payload
    let body = body.trim_ascii();
    if body.is_empty() || body == b"null" {
      return Err(RemoteError::EmptyBody {
        status: status.as_u16(),
      });
    }

    serde_json::from_slice(body).map_err(|e| RemoteError::Decode(e.to_string()))
  }
}

#[async_trait]
impl PokeApi for PokeApiClient {
  async fn fetch_page(
    &self,
    path: &str,
    limit: u32,
    offset: u32,
  ) -> Result<ApiPokemonListResponse, RemoteError> {
    let mut url = self.resolve(path)?;
    url
      .query_pairs_mut()
      .append_pair("limit", &limit.to_string())
      .append_pair("offset", &offset.to_string());

    self.get_json(url).await
  }

  async fn fetch_detail(&self, path: &str) -> Result<ApiPokemon, RemoteError> {
    let url = self.resolve(path)?;
    self.get_json(url).await
  }
}
