//! On-disk cache of Pokémon artwork.

use color_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const FILE_PREFIX: &str = "pokemon_";

/// Downloads artwork once and serves it from disk afterwards.
#[derive(Clone)]
pub struct ImageCache {
  http: reqwest::Client,
  dir: PathBuf,
}

impl ImageCache {
  pub fn new(dir: PathBuf, http: reqwest::Client) -> Self {
    Self { http, dir }
  }

  /// Deterministic cache path for `key`.
  pub fn path_for(&self, key: &str) -> PathBuf {
    let file_name = format!("{}{}.png", FILE_PREFIX, key.to_lowercase().replace(' ', "_"));
    self.dir.join(file_name)
  }

  /// Make the image at `url` available locally under `key`.
  ///
  /// Returns the existing file without downloading when it is already
  /// cached. Any failure yields `None`.
  pub async fn materialize(&self, url: &str, key: &str) -> Option<PathBuf> {
    let path = self.path_for(key);
    if tokio::fs::try_exists(&path).await.unwrap_or(false) {
      return Some(path);
    }

    match self.download(url, &path).await {
      Ok(()) => {
        debug!("Cached artwork for {} at {}", key, path.display());
        Some(path)
      }
      Err(e) => {
        warn!("Failed to cache artwork for {}: {}", key, e);
        None
      }
    }
  }

  async fn download(&self, url: &str, path: &Path) -> Result<()> {
    let response = self
      .http
      .get(url)
      .send()
      .await
      .map_err(|e| eyre!("Failed to download {}: {}", url, e))?;

    let status = response.status();
    if !status.is_success() {
      return Err(eyre!("Failed to download {}: status {}", url, status));
    }

    let bytes = response
      .bytes()
      .await
      .map_err(|e| eyre!("Failed to read {}: {}", url, e))?;
    if bytes.is_empty() {
      return Err(eyre!("Empty image body from {}", url));
    }

    tokio::fs::create_dir_all(&self.dir)
      .await
      .map_err(|e| eyre!("Failed to create image cache directory: {}", e))?;

    // Each writer gets its own temp file, renamed into place when complete
    let dir = self.dir.clone();
    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<()> {
      use std::io::Write;

      let mut file = tempfile::NamedTempFile::new_in(&dir)
        .map_err(|e| eyre!("Failed to create temp file in {}: {}", dir.display(), e))?;
      file
        .write_all(&bytes)
        .map_err(|e| eyre!("Failed to write image for {}: {}", target.display(), e))?;
      file
        .persist(&target)
        .map_err(|e| eyre!("Failed to move image into {}: {}", target.display(), e))?;
      Ok(())
    })
    .await
    .map_err(|e| eyre!("Image write task failed: {}", e))??;

    Ok(())
  }

  /// Delete every cached image. Returns how many files were removed.
  pub async fn clear(&self) -> Result<usize> {
    let mut entries = match tokio::fs::read_dir(&self.dir).await {
      Ok(entries) => entries,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
      Err(e) => return Err(eyre!("Failed to read image cache directory: {}", e)),
    };

    let mut removed = 0;
    while let Some(entry) = entries
      .next_entry()
      .await
      .map_err(|e| eyre!("Failed to read image cache directory: {}", e))?
    {
      if entry.file_name().to_string_lossy().starts_with(FILE_PREFIX) {
        tokio::fs::remove_file(entry.path())
          .await
          .map_err(|e| eyre!("Failed to remove {}: {}", entry.path().display(), e))?;
        removed += 1;
      }
    }

    Ok(removed)
  }
}
