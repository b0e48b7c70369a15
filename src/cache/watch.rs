//! Observable table queries.

use color_eyre::Result;
use std::sync::Arc;
use tokio::sync::watch;

use super::storage::SqliteStorage;
use crate::api::types::PokemonSummary;

/// Re-runs a query every time the store commits a mutation.
///
/// The first call to [`TableWatch::next`] yields the current snapshot. Later
/// calls wait for the next commit; commits that land between two calls are
/// coalesced into one snapshot. Each subscriber owns its watch, so dropping
/// or recreating one does not affect the others.
pub struct TableWatch<T> {
  store: Arc<SqliteStorage>,
  changes: watch::Receiver<u64>,
  query: fn(&SqliteStorage) -> Result<T>,
  primed: bool,
}

impl<T> TableWatch<T> {
  pub fn new(store: Arc<SqliteStorage>, query: fn(&SqliteStorage) -> Result<T>) -> Self {
    let changes = store.subscribe();
    Self {
      store,
      changes,
      query,
      primed: false,
    }
  }

  /// Wait for the next snapshot. Returns `None` if the change feed closes.
  pub async fn next(&mut self) -> Option<Result<T>> {
    if self.primed {
      self.changes.changed().await.ok()?;
    } else {
      self.primed = true;
    }

    self.changes.borrow_and_update();
    Some((self.query)(&self.store))
  }
}

impl SqliteStorage {
  /// Watch every cached summary, ordered by name.
  pub fn watch_all(self: &Arc<Self>) -> TableWatch<Vec<PokemonSummary>> {
    TableWatch::new(Arc::clone(self), SqliteStorage::all)
  }

  /// Watch the favourite summaries, ordered by name.
  pub fn watch_favourites(self: &Arc<Self>) -> TableWatch<Vec<PokemonSummary>> {
    TableWatch::new(Arc::clone(self), SqliteStorage::favourites)
  }
}
