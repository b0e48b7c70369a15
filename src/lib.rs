//! Offline-tolerant Pokédex client.
//!
//! Pages of Pokémon are fetched from PokeAPI, merged with the favourite flags
//! kept in a local SQLite cache, and served from that cache when the network
//! is unavailable.

pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod db;
pub mod repository;
pub mod resource;
