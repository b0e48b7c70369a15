use url::Url;

/// A Pokémon as shown in list views, merged with local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonSummary {
  pub name: String,
  /// Source URL of the detail resource
  pub url: String,
  /// Local path of the cached artwork, empty if none
  pub image_path: String,
  pub is_favourite: bool,
}

/// Detail record, immutable once cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonDetail {
  pub name: String,
  pub weight: i64,
  pub height: i64,
  pub base_experience: i64,
  pub abilities: Vec<String>,
}

/// Detail joined with the artwork path of the matching summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
  pub detail: PokemonDetail,
  pub image_path: String,
}

/// One page of a paginated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
  pub count: u32,
  pub next: Option<String>,
  pub previous: Option<String>,
  pub items: Vec<PokemonSummary>,
}

impl Page {
  /// Offset requested by the `next` cursor, if there is one.
  pub fn next_offset(&self) -> Option<u32> {
    let next = Url::parse(self.next.as_deref()?).ok()?;
    next
      .query_pairs()
      .find(|(key, _)| key == "offset")
      .and_then(|(_, value)| value.parse().ok())
  }
}

/// Last non-empty segment of a URL or path.
pub fn last_segment(path: &str) -> Option<&str> {
  path.split('/').filter(|s| !s.is_empty()).last()
}
