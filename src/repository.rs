//! Offline-tolerant access to Pokémon data.
//!
//! The repository sits between callers and the remote API, merging network
//! results with local favourite state and falling back to cached data when
//! the network is unavailable.

use color_eyre::{eyre::eyre, Result};
use futures::{stream, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::api_types::{ApiNamedResource, ApiPokemonListResponse};
use crate::api::error::RemoteError;
use crate::api::types::{last_segment, DetailView, Page, PokemonSummary};
use crate::api::PokeApi;
use crate::cache::{ImageCache, SqliteStorage, TableWatch};
use crate::resource::Resource;

/// Artwork downloads in flight per page.
const ARTWORK_CONCURRENCY: usize = 4;

/// Counts of what a cache clear removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearedCache {
  pub pokemon: usize,
  pub images: usize,
}

pub struct Repository<A: PokeApi> {
  api: A,
  store: Arc<SqliteStorage>,
  images: ImageCache,
  /// Artwork URL with an `{id}` placeholder
  artwork_template: String,
}

impl<A: PokeApi> Repository<A> {
  pub fn new(
    api: A,
    store: Arc<SqliteStorage>,
    images: ImageCache,
    artwork_template: impl Into<String>,
  ) -> Self {
    Self {
      api,
      store,
      images,
      artwork_template: artwork_template.into(),
    }
  }

  /// Fetch one page of Pokémon.
  ///
  /// 1. Fetch the page from the network
  /// 2. On success, cache artwork, carry over favourite flags and upsert
  /// 3. On an empty body, report it
  /// 4. On any other failure of the first page, serve the cached first page
  ///
  /// Store failures while merging a fetched page are returned as `Err`.
  pub async fn fetch_page(&self, path: &str, limit: u32, offset: u32) -> Result<Resource<Page>> {
    let err = match self.api.fetch_page(path, limit, offset).await {
      Ok(response) => {
        let page = self.merge_page(response).await?;
        info!(
          "Fetched {} pokemon at offset {} (total {})",
          page.items.len(),
          offset,
          page.count
        );
        return Ok(Resource::network(page));
      }
      Err(err) => err,
    };

    if let RemoteError::EmptyBody { .. } = err {
      warn!("Empty page at offset {}", offset);
      return Ok((&err).into());
    }

    warn!("Failed to fetch page at offset {}: {}", offset, err);

    // Only the first page has a cached counterpart
    if offset == 0 {
      match self.cached_first_page(limit) {
        Ok(Some(page)) => {
          info!("Serving {} cached pokemon", page.items.len());
          return Ok(Resource::cached(page));
        }
        Ok(None) => debug!("No cached pokemon to fall back to"),
        Err(e) => warn!("Failed to read cached pokemon: {}", e),
      }
    }

    Ok((&err).into())
  }

  async fn merge_page(&self, response: ApiPokemonListResponse) -> Result<Page> {
    let mut seen = HashSet::new();
    let results: Vec<ApiNamedResource> = response
      .results
      .into_iter()
      .filter(|p| seen.insert(p.name.clone()))
      .collect();

    let image_paths: Vec<String> = stream::iter(&results)
      .map(|p| self.cache_artwork(p))
      .buffered(ARTWORK_CONCURRENCY)
      .collect()
      .await;

    let fetched: Vec<PokemonSummary> = results
      .into_iter()
      .zip(image_paths)
      .map(|(p, image_path)| PokemonSummary {
        name: p.name,
        url: p.url,
        image_path,
        is_favourite: false,
      })
      .collect();

    // The store carries over the user's flags in the same transaction
    let items = self.store.merge_all(&fetched)?;

    Ok(Page {
      count: response.count,
      next: response.next,
      previous: response.previous,
      items,
    })
  }

  /// Local artwork path for `pokemon`, empty when unavailable.
  async fn cache_artwork(&self, pokemon: &ApiNamedResource) -> String {
    let Some(url) = artwork_url(&self.artwork_template, &pokemon.url) else {
      debug!("No numeric id in {}", pokemon.url);
      return String::new();
    };

    self
      .images
      .materialize(&url, &pokemon.name)
      .await
      .map(|path| path.to_string_lossy().into_owned())
      .unwrap_or_default()
  }

  fn cached_first_page(&self, limit: u32) -> Result<Option<Page>> {
    let items = self.store.page(limit, 0)?;
    if items.is_empty() {
      return Ok(None);
    }

    Ok(Some(Page {
      count: items.len() as u32,
      next: None,
      previous: None,
      items,
    }))
  }

  /// Fetch the detail of the Pokémon named by the last segment of `path`.
  ///
  /// Cached details are returned as-is without touching the network.
  pub async fn fetch_detail(&self, path: &str) -> Result<Resource<DetailView>> {
    let name = last_segment(path)
      .ok_or_else(|| eyre!("No pokemon name in path '{}'", path))?
      .to_string();

    if let Some(view) = self.cached_detail(&name)? {
      debug!("Returning cached detail for {}", name);
      return Ok(Resource::cached(view));
    }

    match self.api.fetch_detail(path).await {
      Ok(pokemon) => {
        debug!("Fetched detail for {} (payload name {})", name, pokemon.name);
        let detail = pokemon.into_detail(&name);
        self.store.insert_detail(&detail)?;
        Ok(Resource::network(DetailView {
          detail,
          image_path: self.image_path_of(&name)?,
        }))
      }
      Err(err @ (RemoteError::Status { .. } | RemoteError::EmptyBody { .. })) => {
        warn!("Failed to fetch detail for {}: {}", name, err);
        Ok((&err).into())
      }
      Err(err) => {
        warn!("Failed to fetch detail for {}: {}", name, err);
        // Another task may have cached it meanwhile
        if let Some(view) = self.cached_detail(&name)? {
          return Ok(Resource::cached(view));
        }
        Ok((&err).into())
      }
    }
  }

  fn cached_detail(&self, name: &str) -> Result<Option<DetailView>> {
    let Some(detail) = self.store.get_detail(name)? else {
      return Ok(None);
    };
    Ok(Some(DetailView {
      detail,
      image_path: self.image_path_of(name)?,
    }))
  }

  fn image_path_of(&self, name: &str) -> Result<String> {
    Ok(
      self
        .store
        .get(name)?
        .map(|p| p.image_path)
        .unwrap_or_default(),
    )
  }

  /// Set or clear the favourite flag of `name`.
  pub fn set_favourite(&self, name: &str, is_favourite: bool) -> Result<()> {
    if !self.store.set_favourite(name, is_favourite)? {
      debug!("{} is not cached, favourite flag not stored", name);
    }
    Ok(())
  }

  /// Point lookup of a cached Pokémon.
  pub fn cached(&self, name: &str) -> Result<Option<PokemonSummary>> {
    self.store.get(name)
  }

  /// Subscribe to the favourites list.
  pub fn favourites(&self) -> FavouritesWatch {
    FavouritesWatch {
      inner: self.store.watch_favourites(),
    }
  }

  /// Drop every cached summary and image. Details are immutable and stay.
  pub async fn clear_cache(&self) -> Result<ClearedCache> {
    let pokemon = self.store.clear()?;
    let images = self.images.clear().await?;
    info!("Cleared {} cached pokemon and {} images", pokemon, images);
    Ok(ClearedCache { pokemon, images })
  }
}

/// Favourites as they change, ordered by name.
pub struct FavouritesWatch {
  inner: TableWatch<Vec<PokemonSummary>>,
}

impl FavouritesWatch {
  pub async fn next(&mut self) -> Option<Resource<Vec<PokemonSummary>>> {
    let snapshot = self.inner.next().await?;
    Some(match snapshot {
      Ok(favourites) => Resource::cached(favourites),
      Err(e) => Resource::storage_error(e.to_string()),
    })
  }
}

/// Artwork URL for the Pokémon whose resource lives at `source_url`.
///
/// The numeric id is the last path segment of the source URL.
pub fn artwork_url(template: &str, source_url: &str) -> Option<String> {
  let id: u32 = last_segment(source_url)?.parse().ok()?;
  Some(template.replace("{id}", &id.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::api_types::ApiPokemon;
  use crate::api::error::HttpCode;
  use crate::api::types::PokemonDetail;
  use crate::resource::ErrorKind;
  use async_trait::async_trait;
  use std::collections::VecDeque;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Mutex;
  use tempfile::TempDir;

  const BASE: &str = "https://pokeapi.co/api/v2/pokemon";

  /// Scripted API: pops one response per call, refuses the connection when
  /// the script runs out.
  #[derive(Default)]
  struct FakeApi {
    pages: Mutex<VecDeque<Result<ApiPokemonListResponse, RemoteError>>>,
    details: Mutex<VecDeque<Result<ApiPokemon, RemoteError>>>,
    page_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    /// Cached by "another task" right before the detail call fails
    racing_detail: Mutex<Option<(Arc<SqliteStorage>, PokemonDetail)>>,
  }

  fn refused() -> RemoteError {
    RemoteError::Transport {
      message: "tcp connect error: Connection refused (os error 111)".to_string(),
      refused: true,
    }
  }

  #[async_trait]
  impl PokeApi for FakeApi {
    async fn fetch_page(
      &self,
      _path: &str,
      _limit: u32,
      _offset: u32,
    ) -> Result<ApiPokemonListResponse, RemoteError> {
      self.page_calls.fetch_add(1, Ordering::SeqCst);
      self
        .pages
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(refused()))
    }

    async fn fetch_detail(&self, _path: &str) -> Result<ApiPokemon, RemoteError> {
      self.detail_calls.fetch_add(1, Ordering::SeqCst);
      if let Some((store, detail)) = self.racing_detail.lock().unwrap().take() {
        store.insert_detail(&detail).unwrap();
        return Err(refused());
      }
      self
        .details
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(refused()))
    }
  }

  impl FakeApi {
    fn push_page(&self, response: Result<ApiPokemonListResponse, RemoteError>) {
      self.pages.lock().unwrap().push_back(response);
    }

    fn push_detail(&self, response: Result<ApiPokemon, RemoteError>) {
      self.details.lock().unwrap().push_back(response);
    }
  }

  struct Fixture {
    api: Arc<FakeApi>,
    store: Arc<SqliteStorage>,
    repo: Repository<Arc<FakeApi>>,
    images: TempDir,
  }

  fn fixture() -> Fixture {
    fixture_with_store(Arc::new(SqliteStorage::open_in_memory().unwrap()))
  }

  fn fixture_with_store(store: Arc<SqliteStorage>) -> Fixture {
    let api = Arc::new(FakeApi::default());
    let images = tempfile::tempdir().unwrap();

    // Nothing listens on this port, so artwork downloads fail fast
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let repo = Repository::new(
      Arc::clone(&api),
      Arc::clone(&store),
      ImageCache::new(images.path().to_path_buf(), reqwest::Client::new()),
      format!("http://{}/{{id}}.png", addr),
    );
    Fixture {
      api,
      store,
      repo,
      images,
    }
  }

  fn list_response(names: &[(&str, u32)]) -> ApiPokemonListResponse {
    ApiPokemonListResponse {
      count: names.len() as u32,
      next: None,
      previous: None,
      results: names
        .iter()
        .map(|(name, id)| ApiNamedResource {
          name: name.to_string(),
          url: format!("{}/{}/", BASE, id),
        })
        .collect(),
    }
  }

  fn starters() -> ApiPokemonListResponse {
    list_response(&[("bulbasaur", 1), ("ivysaur", 2), ("venusaur", 3)])
  }

  fn summary(name: &str, is_favourite: bool) -> PokemonSummary {
    PokemonSummary {
      name: name.to_string(),
      url: format!("{}/{}/", BASE, name),
      image_path: String::new(),
      is_favourite,
    }
  }

  fn pikachu_payload() -> ApiPokemon {
    serde_json::from_str(
      r#"{"name":"pikachu","base_experience":112,"height":4,"weight":60,
          "abilities":[{"ability":{"name":"static","url":""}},{"ability":{"name":"lightning-rod","url":""}}]}"#,
    )
    .unwrap()
  }

  fn names(page: &Page) -> Vec<&str> {
    page.items.iter().map(|p| p.name.as_str()).collect()
  }

  #[tokio::test]
  async fn test_fetch_page_upserts_new_pokemon() {
    let f = fixture();
    f.api.push_page(Ok(starters()));

    let resource = f.repo.fetch_page("pokemon", 20, 0).await.unwrap();
    assert!(!resource.is_from_cache());
    let page = resource.data().unwrap();
    assert_eq!(page.count, 3);
    assert_eq!(names(page), vec!["bulbasaur", "ivysaur", "venusaur"]);
    assert!(page.items.iter().all(|p| !p.is_favourite));
    // Artwork host is unreachable, which is not an error
    assert!(page.items.iter().all(|p| p.image_path.is_empty()));

    assert_eq!(f.store.count().unwrap(), 3);
    assert_eq!(f.store.get("ivysaur").unwrap().as_ref(), Some(&page.items[1]));
  }

  #[tokio::test]
  async fn test_fetch_page_keeps_cursors() {
    let f = fixture();
    let mut response = starters();
    response.count = 1302;
    response.next = Some(format!("{}?offset=20&limit=20", BASE));
    f.api.push_page(Ok(response));

    let resource = f.repo.fetch_page("pokemon", 20, 0).await.unwrap();
    let page = resource.data().unwrap();
    assert_eq!(page.count, 1302);
    assert_eq!(page.next_offset(), Some(20));
    assert!(page.previous.is_none());
  }

  #[tokio::test]
  async fn test_favourite_survives_refetch() {
    let f = fixture();
    f.api.push_page(Ok(starters()));
    f.api.push_page(Ok(starters()));

    f.repo.fetch_page("pokemon", 20, 0).await.unwrap();
    f.repo.set_favourite("ivysaur", true).unwrap();

    let resource = f.repo.fetch_page("pokemon", 20, 0).await.unwrap();
    let page = resource.data().unwrap();
    let flags: Vec<bool> = page.items.iter().map(|p| p.is_favourite).collect();
    assert_eq!(flags, vec![false, true, false]);
    assert!(f.repo.cached("ivysaur").unwrap().unwrap().is_favourite);
  }

  #[tokio::test]
  async fn test_duplicate_names_collapse() {
    let f = fixture();
    f.api
      .push_page(Ok(list_response(&[("eevee", 133), ("eevee", 133), ("vaporeon", 134)])));

    let resource = f.repo.fetch_page("pokemon", 20, 0).await.unwrap();
    assert_eq!(names(resource.data().unwrap()), vec!["eevee", "vaporeon"]);
    assert_eq!(f.store.count().unwrap(), 2);
  }

  #[tokio::test]
  async fn test_cached_artwork_path_is_recorded() {
    let f = fixture();
    let artwork = f.images.path().join("pokemon_bulbasaur.png");
    std::fs::write(&artwork, b"png").unwrap();
    f.api.push_page(Ok(starters()));

    let resource = f.repo.fetch_page("pokemon", 20, 0).await.unwrap();
    let page = resource.data().unwrap();
    assert_eq!(page.items[0].image_path, artwork.to_string_lossy());
    assert!(page.items[1].image_path.is_empty());
  }

  #[tokio::test]
  async fn test_offline_first_page_served_from_cache() {
    let f = fixture();
    f.store
      .upsert_all(&[summary("venusaur", false), summary("bulbasaur", true)])
      .unwrap();

    let resource = f.repo.fetch_page("pokemon", 20, 0).await.unwrap();
    assert!(resource.is_from_cache());
    let page = resource.data().unwrap();
    assert_eq!(names(page), vec!["bulbasaur", "venusaur"]);
    assert_eq!(page.count, 2);
    assert!(page.next.is_none());
    assert!(page.previous.is_none());
    assert!(page.items[0].is_favourite);
  }

  #[tokio::test]
  async fn test_offline_first_page_respects_limit() {
    let f = fixture();
    f.store
      .upsert_all(&[
        summary("charmander", false),
        summary("bulbasaur", false),
        summary("squirtle", false),
      ])
      .unwrap();

    let resource = f.repo.fetch_page("pokemon", 2, 0).await.unwrap();
    assert_eq!(names(resource.data().unwrap()), vec!["bulbasaur", "charmander"]);
  }

  #[tokio::test]
  async fn test_offline_with_empty_cache_is_error() {
    let f = fixture();

    let resource = f.repo.fetch_page("pokemon", 20, 0).await.unwrap();
    match resource {
      Resource::Error {
        kind,
        code,
        message,
      } => {
        assert_eq!(kind, ErrorKind::RetryToConnect);
        assert_eq!(code, 1006);
        assert!(message.contains("Connection refused"));
      }
      other => panic!("unexpected resource: {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_server_error_on_first_page_falls_back() {
    let f = fixture();
    f.store.upsert(&summary("pikachu", false)).unwrap();
    f.api.push_page(Err(RemoteError::Status {
      status: 500,
      reason: "Internal Server Error".to_string(),
    }));

    let resource = f.repo.fetch_page("pokemon", 20, 0).await.unwrap();
    assert!(resource.is_from_cache());
  }

  #[tokio::test]
  async fn test_server_error_with_empty_cache_is_classified() {
    let f = fixture();
    f.api.push_page(Err(RemoteError::Status {
      status: 500,
      reason: "Internal Server Error".to_string(),
    }));

    let resource = f.repo.fetch_page("pokemon", 20, 0).await.unwrap();
    assert_eq!(resource.code(), Some(500));
    assert!(matches!(
      resource,
      Resource::Error {
        kind: ErrorKind::Http(HttpCode::ServerError),
        ..
      }
    ));
  }

  #[tokio::test]
  async fn test_undecodable_first_page_falls_back() {
    let f = fixture();
    f.store.upsert(&summary("pikachu", true)).unwrap();
    f.api
      .push_page(Err(RemoteError::Decode("expected value at line 1 column 1".to_string())));

    let resource = f.repo.fetch_page("pokemon", 20, 0).await.unwrap();
    assert!(resource.is_from_cache());
    assert_eq!(names(resource.data().unwrap()), vec!["pikachu"]);
  }

  #[tokio::test]
  async fn test_unreadable_cache_surfaces_network_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pokedex.db");
    let f = fixture_with_store(Arc::new(SqliteStorage::open(&path).unwrap()));
    f.store.upsert(&summary("pikachu", false)).unwrap();

    // Break the summary table behind the store's back
    rusqlite::Connection::open(&path)
      .unwrap()
      .execute_batch("DROP TABLE pokemon")
      .unwrap();
    assert!(f.store.page(20, 0).is_err());

    let resource = f.repo.fetch_page("pokemon", 20, 0).await.unwrap();
    match resource {
      Resource::Error {
        kind,
        code,
        message,
      } => {
        assert_eq!(kind, ErrorKind::RetryToConnect);
        assert_eq!(code, 1006);
        assert!(message.contains("Connection refused"), "message: {}", message);
      }
      other => panic!("unexpected resource: {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_not_found_past_first_page_ignores_cache() {
    let f = fixture();
    f.store.upsert(&summary("pikachu", false)).unwrap();
    f.api.push_page(Err(RemoteError::Status {
      status: 404,
      reason: "Not Found".to_string(),
    }));

    let resource = f.repo.fetch_page("pokemon", 20, 20).await.unwrap();
    assert_eq!(resource.code(), Some(404));
    assert!(matches!(
      resource,
      Resource::Error {
        kind: ErrorKind::Http(HttpCode::NotFound),
        ..
      }
    ));
  }

  #[tokio::test]
  async fn test_empty_body_is_reported_without_fallback() {
    let f = fixture();
    f.store.upsert(&summary("pikachu", false)).unwrap();
    f.api.push_page(Err(RemoteError::EmptyBody { status: 200 }));

    let resource = f.repo.fetch_page("pokemon", 20, 0).await.unwrap();
    assert!(matches!(
      resource,
      Resource::Error {
        kind: ErrorKind::EmptyBody,
        ..
      }
    ));
  }

  #[tokio::test]
  async fn test_detail_hits_network_once() {
    let f = fixture();
    f.api.push_detail(Ok(pikachu_payload()));

    let first = f.repo.fetch_detail("pokemon/pikachu").await.unwrap();
    assert!(!first.is_from_cache());
    let second = f.repo.fetch_detail("pokemon/pikachu").await.unwrap();
    assert!(second.is_from_cache());

    assert_eq!(f.api.detail_calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.data(), second.data());
    let detail = &second.data().unwrap().detail;
    assert_eq!(detail.abilities, vec!["static", "lightning-rod"]);
    assert_eq!(detail.base_experience, 112);
  }

  #[tokio::test]
  async fn test_detail_carries_summary_artwork() {
    let f = fixture();
    let mut pikachu = summary("pikachu", false);
    pikachu.image_path = "/images/pokemon_pikachu.png".to_string();
    f.store.upsert(&pikachu).unwrap();
    f.api.push_detail(Ok(pikachu_payload()));

    let resource = f.repo.fetch_detail("pokemon/pikachu/").await.unwrap();
    let view = resource.data().unwrap();
    assert_eq!(view.detail.name, "pikachu");
    assert_eq!(view.image_path, "/images/pokemon_pikachu.png");
  }

  #[tokio::test]
  async fn test_detail_not_found() {
    let f = fixture();
    f.api.push_detail(Err(RemoteError::Status {
      status: 404,
      reason: "Not Found".to_string(),
    }));

    let resource = f.repo.fetch_detail("pokemon/agumon").await.unwrap();
    assert_eq!(resource.code(), Some(404));
    assert!(f.store.get_detail("agumon").unwrap().is_none());
  }

  #[tokio::test]
  async fn test_detail_rechecks_cache_after_transport_failure() {
    let f = fixture();
    let detail = pikachu_payload().into_detail("pikachu");
    *f.api.racing_detail.lock().unwrap() = Some((Arc::clone(&f.store), detail.clone()));

    let resource = f.repo.fetch_detail("pokemon/pikachu").await.unwrap();
    assert!(resource.is_from_cache());
    assert_eq!(resource.data().unwrap().detail, detail);
  }

  #[tokio::test]
  async fn test_detail_transport_failure_without_cache() {
    let f = fixture();

    let resource = f.repo.fetch_detail("pokemon/pikachu").await.unwrap();
    assert_eq!(resource.code(), Some(1006));
  }

  #[tokio::test]
  async fn test_detail_path_without_name_is_rejected() {
    let f = fixture();
    assert!(f.repo.fetch_detail("/").await.is_err());
    assert_eq!(f.api.detail_calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn test_set_favourite_then_lookup() {
    let f = fixture();
    f.store.upsert(&summary("pikachu", false)).unwrap();

    f.repo.set_favourite("pikachu", true).unwrap();
    assert!(f.repo.cached("pikachu").unwrap().unwrap().is_favourite);

    // Not cached yet: nothing to flag, not an error
    f.repo.set_favourite("raichu", true).unwrap();
    assert!(f.repo.cached("raichu").unwrap().is_none());
  }

  #[tokio::test]
  async fn test_favourites_stream_follows_toggles() {
    let f = fixture();
    f.api.push_page(Ok(starters()));
    f.repo.fetch_page("pokemon", 20, 0).await.unwrap();

    let mut favourites = f.repo.favourites();
    let initial = favourites.next().await.unwrap();
    assert_eq!(initial.data().map(Vec::len), Some(0));

    f.repo.set_favourite("venusaur", true).unwrap();
    let updated = favourites.next().await.unwrap();
    let names: Vec<&str> = updated
      .data()
      .unwrap()
      .iter()
      .map(|p| p.name.as_str())
      .collect();
    assert_eq!(names, vec!["venusaur"]);
  }

  #[tokio::test]
  async fn test_clear_cache() {
    let f = fixture();
    std::fs::write(f.images.path().join("pokemon_bulbasaur.png"), b"png").unwrap();
    f.api.push_page(Ok(starters()));
    f.repo.fetch_page("pokemon", 20, 0).await.unwrap();

    let cleared = f.repo.clear_cache().await.unwrap();
    assert_eq!(
      cleared,
      ClearedCache {
        pokemon: 3,
        images: 1
      }
    );
    assert_eq!(f.store.count().unwrap(), 0);
  }

  #[test]
  fn test_artwork_url() {
    let template = "https://img.example/artwork/{id}.png";
    assert_eq!(
      artwork_url(template, "https://pokeapi.co/api/v2/pokemon/25/"),
      Some("https://img.example/artwork/25.png".to_string())
    );
    assert_eq!(artwork_url(template, "https://pokeapi.co/api/v2/pokemon/pikachu/"), None);
    assert_eq!(artwork_url(template, ""), None);
  }
}
