/// Schema for the local Pokédex cache.
pub const SCHEMA: &str = r#"
-- One row per Pokémon seen in a list page
CREATE TABLE IF NOT EXISTS pokemon (
    name TEXT PRIMARY KEY NOT NULL,
    url TEXT NOT NULL,
    image_path TEXT NOT NULL DEFAULT '',
    is_favourite INTEGER NOT NULL DEFAULT 0,
    cached_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_pokemon_favourite
    ON pokemon(is_favourite, name);

-- Detail records are written once and never updated
CREATE TABLE IF NOT EXISTS pokemon_detail (
    name TEXT PRIMARY KEY NOT NULL,
    weight INTEGER NOT NULL,
    height INTEGER NOT NULL,
    base_experience INTEGER NOT NULL,
    abilities TEXT NOT NULL,
    cached_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
