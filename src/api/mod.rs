//! PokeAPI access: wire types, domain types and the HTTP client.

pub mod api_types;
pub mod client;
pub mod error;
pub mod types;

use api_types::{ApiPokemon, ApiPokemonListResponse};
use async_trait::async_trait;
use error::RemoteError;

pub use client::PokeApiClient;

/// Remote source of Pokémon data.
///
/// Implementations are stateless; every call is one request.
#[async_trait]
pub trait PokeApi: Send + Sync {
  /// Fetch one page of the list resource at `path`.
  async fn fetch_page(
    &self,
    path: &str,
    limit: u32,
    offset: u32,
  ) -> Result<ApiPokemonListResponse, RemoteError>;

  /// Fetch the detail resource at `path`.
  async fn fetch_detail(&self, path: &str) -> Result<ApiPokemon, RemoteError>;
}

#[async_trait]
impl<T: PokeApi + ?Sized> PokeApi for std::sync::Arc<T> {
  async fn fetch_page(
    &self,
    path: &str,
    limit: u32,
    offset: u32,
  ) -> Result<ApiPokemonListResponse, RemoteError> {
    (**self).fetch_page(path, limit, offset).await
  }

  async fn fetch_detail(&self, path: &str) -> Result<ApiPokemon, RemoteError> {
    (**self).fetch_detail(path).await
  }
}
