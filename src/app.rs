use crate::api::types::{DetailView, Page};
use crate::api::PokeApiClient;
use crate::cache::{ImageCache, SqliteStorage};
use crate::config::Config;
use crate::repository::Repository;
use crate::resource::Resource;
use color_eyre::{eyre::eyre, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Process-wide collaborators, built once at startup and torn down on exit.
pub struct App {
  config: Config,
  repository: Repository<PokeApiClient>,
}

impl App {
  pub fn new(config: Config) -> Result<Self> {
    let api = PokeApiClient::new(&config.api)?;

    let database_path = config.database_path()?;
    let store = Arc::new(SqliteStorage::open(&database_path)?);

    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.api.timeout_secs))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;
    let images = ImageCache::new(config.image_cache_dir()?, http);

    let repository = Repository::new(api, store, images, config.images.url_template.clone());

    info!(
      "Using {} with cache at {}",
      config.api.base_url,
      database_path.display()
    );

    Ok(Self { config, repository })
  }

  /// Print one page of Pokémon.
  pub async fn list(&self, offset: u32, limit: Option<u32>) -> Result<()> {
    let limit = limit.unwrap_or(self.config.api.page_size);

    let mut state: Resource<Page> = Resource::Loading;
    render_status(&state);

    state = self
      .repository
      .fetch_page(&self.config.api.list_path, limit, offset)
      .await?;
    render_status(&state);

    if let Some(page) = state.data() {
      for (i, pokemon) in page.items.iter().enumerate() {
        println!(
          "{:>5}  {} {:<24} {}",
          offset as usize + i + 1,
          if pokemon.is_favourite { "*" } else { " " },
          pokemon.name,
          pokemon.image_path
        );
      }
      println!("{} of {}", page.items.len(), page.count);
      if let Some(next) = page.next_offset() {
        println!("next: --offset {}", next);
      }
    }

    Ok(())
  }

  /// Print the detail of one Pokémon.
  pub async fn show(&self, name: &str) -> Result<()> {
    let path = format!("{}/{}", self.config.api.list_path.trim_end_matches('/'), name);

    let state = self.repository.fetch_detail(&path).await?;
    render_status(&state);

    if let Some(DetailView { detail, image_path }) = state.data() {
      println!("name:            {}", detail.name);
      println!("height:          {}", detail.height);
      println!("weight:          {}", detail.weight);
      println!("base experience: {}", detail.base_experience);
      println!("abilities:       {}", detail.abilities.join(", "));
      if !image_path.is_empty() {
        println!("artwork:         {}", image_path);
      }
    }

    Ok(())
  }

  /// Set or clear the favourite flag of a cached Pokémon.
  pub fn favourite(&self, name: &str, is_favourite: bool) -> Result<()> {
    self.repository.set_favourite(name, is_favourite)?;

    match self.repository.cached(name)? {
      Some(pokemon) if pokemon.is_favourite => println!("{} is a favourite", pokemon.name),
      Some(pokemon) => println!("{} is not a favourite", pokemon.name),
      None => println!("{} is not cached yet, list it first", name),
    }

    Ok(())
  }

  /// Print the favourites, and keep printing on every change if `follow`.
  pub async fn favourites(&self, follow: bool) -> Result<()> {
    let mut favourites = self.repository.favourites();

    let mut state = Resource::Initial;
    render_status(&state);

    loop {
      let next = tokio::select! {
        next = favourites.next() => next,
        _ = tokio::signal::ctrl_c() => None,
      };
      let Some(next) = next else {
        break;
      };
      state = next;

      render_status(&state);
      if let Some(list) = state.data() {
        if list.is_empty() {
          println!("(no favourites)");
        }
        for pokemon in list {
          println!("* {}", pokemon.name);
        }
      }

      if !follow {
        break;
      }
    }

    Ok(())
  }

  /// Remove cached summaries and artwork.
  pub async fn clear(&self) -> Result<()> {
    let cleared = self.repository.clear_cache().await?;
    println!(
      "Removed {} pokemon and {} images",
      cleared.pokemon, cleared.images
    );
    Ok(())
  }

  /// Release the database and HTTP clients.
  pub fn shutdown(self) {
    info!("Shutting down");
    drop(self.repository);
  }
}

/// Report non-data states on stderr so stdout stays parseable.
fn render_status<T>(state: &Resource<T>) {
  match state {
    Resource::Initial => {}
    Resource::Loading => eprintln!("Loading..."),
    Resource::Success {
      from_cache: true, ..
    } => eprintln!("Offline: showing cached data"),
    Resource::Success { .. } => {}
    Resource::Error { code, message, .. } => eprintln!("Error {}: {}", code, message),
  }
}
