//! SQLite-backed store for Pokémon summaries and details.

use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use tokio::sync::watch;

use crate::api::types::{PokemonDetail, PokemonSummary};
use crate::db::Database;

/// SQLite-based storage.
pub struct SqliteStorage {
  db: Database,
}

const SUMMARY_COLUMNS: &str = "name, url, image_path, is_favourite";

impl SqliteStorage {
  /// Open (or create) the store at `path`.
  pub fn open(path: &Path) -> Result<Self> {
    Ok(Self {
      db: Database::open(path)?,
    })
  }

  #[cfg(test)]
  pub fn open_in_memory() -> Result<Self> {
    Ok(Self {
      db: Database::open_in_memory()?,
    })
  }

  /// Subscribe to committed mutations.
  pub fn subscribe(&self) -> watch::Receiver<u64> {
    self.db.subscribe()
  }

  /// Insert or replace many summaries in one transaction.
  pub fn upsert_all(&self, pokemon: &[PokemonSummary]) -> Result<()> {
    let mut conn = self.db.conn()?;

    let tx = conn
      .transaction()
      .map_err(|e| eyre!("Failed to begin transaction: {}", e))?;

    for p in pokemon {
      upsert_row(&tx, p)?;
    }

    tx.commit()
      .map_err(|e| eyre!("Failed to commit transaction: {}", e))?;
    drop(conn);

    self.db.notify_changed();
    Ok(())
  }

  /// Store a fetched page, keeping the favourite flag of rows already cached.
  ///
  /// Flags are read inside the write transaction, so a concurrent
  /// `set_favourite` is either seen here or applied after the commit.
  /// Returns the records as stored, in input order.
  pub fn merge_all(&self, pokemon: &[PokemonSummary]) -> Result<Vec<PokemonSummary>> {
    let mut conn = self.db.conn()?;

    let tx = conn
      .transaction()
      .map_err(|e| eyre!("Failed to begin transaction: {}", e))?;

    let mut stored = Vec::with_capacity(pokemon.len());
    for p in pokemon {
      let is_favourite: Option<bool> = tx
        .query_row(
          "SELECT is_favourite FROM pokemon WHERE name = ?",
          params![p.name],
          |row| row.get(0),
        )
        .optional()
        .map_err(|e| eyre!("Failed to look up {}: {}", p.name, e))?;

      let record = PokemonSummary {
        is_favourite: is_favourite.unwrap_or(false),
        ..p.clone()
      };
      upsert_row(&tx, &record)?;
      stored.push(record);
    }

    tx.commit()
      .map_err(|e| eyre!("Failed to commit transaction: {}", e))?;
    drop(conn);

    self.db.notify_changed();
    Ok(stored)
  }

  /// Insert or replace a single summary.
  pub fn upsert(&self, pokemon: &PokemonSummary) -> Result<()> {
    let conn = self.db.conn()?;
    upsert_row(&conn, pokemon)?;
    drop(conn);

    self.db.notify_changed();
    Ok(())
  }

  /// Overwrite an existing summary. Returns false if there was none.
  pub fn update(&self, pokemon: &PokemonSummary) -> Result<bool> {
    let conn = self.db.conn()?;
    let updated = conn
      .execute(
        "UPDATE pokemon SET url = ?, image_path = ?, is_favourite = ?, cached_at = datetime('now')
         WHERE name = ?",
        params![
          pokemon.url,
          pokemon.image_path,
          pokemon.is_favourite,
          pokemon.name
        ],
      )
      .map_err(|e| eyre!("Failed to update {}: {}", pokemon.name, e))?;
    drop(conn);

    if updated > 0 {
      self.db.notify_changed();
    }
    Ok(updated > 0)
  }

  /// All summaries ordered by name.
  pub fn all(&self) -> Result<Vec<PokemonSummary>> {
    self.query_summaries(
      &format!("SELECT {} FROM pokemon ORDER BY name ASC", SUMMARY_COLUMNS),
      [],
    )
  }

  /// Favourite summaries ordered by name.
  pub fn favourites(&self) -> Result<Vec<PokemonSummary>> {
    self.query_summaries(
      &format!(
        "SELECT {} FROM pokemon WHERE is_favourite = 1 ORDER BY name ASC",
        SUMMARY_COLUMNS
      ),
      [],
    )
  }

  /// One page of summaries ordered by name.
  pub fn page(&self, limit: u32, offset: u32) -> Result<Vec<PokemonSummary>> {
    self.query_summaries(
      &format!(
        "SELECT {} FROM pokemon ORDER BY name ASC LIMIT ? OFFSET ?",
        SUMMARY_COLUMNS
      ),
      params![limit, offset],
    )
  }

  /// Look up a summary by name.
  pub fn get(&self, name: &str) -> Result<Option<PokemonSummary>> {
    let conn = self.db.conn()?;
    conn
      .query_row(
        &format!("SELECT {} FROM pokemon WHERE name = ?", SUMMARY_COLUMNS),
        params![name],
        summary_from_row,
      )
      .optional()
      .map_err(|e| eyre!("Failed to look up {}: {}", name, e))
  }

  /// Number of cached summaries.
  pub fn count(&self) -> Result<u64> {
    let conn = self.db.conn()?;
    conn
      .query_row("SELECT COUNT(*) FROM pokemon", [], |row| row.get(0))
      .map_err(|e| eyre!("Failed to count cached pokemon: {}", e))
  }

  /// Set the favourite flag of `name`. Returns false if it is not cached.
  pub fn set_favourite(&self, name: &str, is_favourite: bool) -> Result<bool> {
    let conn = self.db.conn()?;
    let updated = conn
      .execute(
        "UPDATE pokemon SET is_favourite = ? WHERE name = ?",
        params![is_favourite, name],
      )
      .map_err(|e| eyre!("Failed to set favourite for {}: {}", name, e))?;
    drop(conn);

    if updated > 0 {
      self.db.notify_changed();
    }
    Ok(updated > 0)
  }

  /// Delete every summary. Details are kept.
  pub fn clear(&self) -> Result<usize> {
    let conn = self.db.conn()?;
    let deleted = conn
      .execute("DELETE FROM pokemon", [])
      .map_err(|e| eyre!("Failed to clear cached pokemon: {}", e))?;
    drop(conn);

    self.db.notify_changed();
    Ok(deleted)
  }

  /// Look up a cached detail record.
  pub fn get_detail(&self, name: &str) -> Result<Option<PokemonDetail>> {
    let conn = self.db.conn()?;
    let row: Option<(i64, i64, i64, String)> = conn
      .query_row(
        "SELECT weight, height, base_experience, abilities
         FROM pokemon_detail WHERE name = ?",
        params![name],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
      )
      .optional()
      .map_err(|e| eyre!("Failed to look up detail for {}: {}", name, e))?;

    let Some((weight, height, base_experience, abilities)) = row else {
      return Ok(None);
    };

    let abilities: Vec<String> = serde_json::from_str(&abilities)
      .map_err(|e| eyre!("Failed to deserialize abilities of {}: {}", name, e))?;

    Ok(Some(PokemonDetail {
      name: name.to_string(),
      weight,
      height,
      base_experience,
      abilities,
    }))
  }

  /// Store a detail record. An existing record for the same name is kept.
  pub fn insert_detail(&self, detail: &PokemonDetail) -> Result<()> {
    let abilities = serde_json::to_string(&detail.abilities)
      .map_err(|e| eyre!("Failed to serialize abilities: {}", e))?;

    let conn = self.db.conn()?;
    let inserted = conn
      .execute(
        "INSERT OR IGNORE INTO pokemon_detail (name, weight, height, base_experience, abilities, cached_at)
         VALUES (?, ?, ?, ?, ?, datetime('now'))",
        params![
          detail.name,
          detail.weight,
          detail.height,
          detail.base_experience,
          abilities
        ],
      )
      .map_err(|e| eyre!("Failed to store detail for {}: {}", detail.name, e))?;
    drop(conn);

    if inserted > 0 {
      self.db.notify_changed();
    }
    Ok(())
  }

  fn query_summaries<P: rusqlite::Params>(
    &self,
    sql: &str,
    params: P,
  ) -> Result<Vec<PokemonSummary>> {
    let conn = self.db.conn()?;
    let mut stmt = conn
      .prepare(sql)
      .map_err(|e| eyre!("Failed to prepare query: {}", e))?;

    let rows = stmt
      .query_map(params, summary_from_row)
      .map_err(|e| eyre!("Failed to query pokemon: {}", e))?
      .collect::<rusqlite::Result<Vec<_>>>()
      .map_err(|e| eyre!("Failed to read pokemon row: {}", e))?;

    Ok(rows)
  }
}

fn upsert_row(conn: &Connection, pokemon: &PokemonSummary) -> Result<()> {
  conn
    .execute(
      "INSERT OR REPLACE INTO pokemon (name, url, image_path, is_favourite, cached_at)
       VALUES (?, ?, ?, ?, datetime('now'))",
      params![
        pokemon.name,
        pokemon.url,
        pokemon.image_path,
        pokemon.is_favourite
      ],
    )
    .map_err(|e| eyre!("Failed to store {}: {}", pokemon.name, e))?;
  Ok(())
}

fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<PokemonSummary> {
  Ok(PokemonSummary {
    name: row.get(0)?,
    url: row.get(1)?,
    image_path: row.get(2)?,
    is_favourite: row.get(3)?,
  })
}
