//! Serde-deserializable types matching PokeAPI responses.
//!
//! These types are separate from domain types to allow clean deserialization
//! while keeping domain types focused on application needs.

use serde::Deserialize;

// ============================================================================
// Common nested field types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ApiNamedResource {
  pub name: String,
  #[serde(default)]
  pub url: String,
}

// ============================================================================
// List endpoint response
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPokemonListResponse {
  #[serde(default)]
  pub count: u32,
  pub next: Option<String>,
  pub previous: Option<String>,
  #[serde(default)]
  pub results: Vec<ApiNamedResource>,
}

// ============================================================================
// Detail endpoint response
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ApiAbilitySlot {
  pub ability: ApiNamedResource,
}

/// Pokémon payload. Sprites, moves, stats and the other nested fields are
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPokemon {
  pub name: String,
  #[serde(default)]
  pub abilities: Vec<ApiAbilitySlot>,
  #[serde(default)]
  pub base_experience: Option<i64>,
  #[serde(default)]
  pub height: i64,
  #[serde(default)]
  pub weight: i64,
}

// ============================================================================
// Conversions to domain types
// ============================================================================

use super::types::PokemonDetail;

impl ApiPokemon {
  /// Map to a detail record stored under `name`.
  pub fn into_detail(self, name: &str) -> PokemonDetail {
    PokemonDetail {
      name: name.to_string(),
      weight: self.weight,
      height: self.height,
      // Some forms have no base experience
      base_experience: self.base_experience.unwrap_or_default(),
      abilities: self
        .abilities
        .into_iter()
        .map(|slot| slot.ability.name)
        .collect(),
    }
  }
}
