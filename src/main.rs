use clap::{Parser, Subcommand};
use color_eyre::Result;
use pokedex::{app::App, config};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse PokeAPI with an offline cache and favourites")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/pokedex/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List one page of Pokémon
  List {
    /// Zero-based position of the first entry
    #[arg(short, long, default_value_t = 0)]
    offset: u32,
    /// Page size (default: api.page_size from the config)
    #[arg(short, long)]
    limit: Option<u32>,
  },
  /// Show the details of a Pokémon
  Show { name: String },
  /// Mark a Pokémon as favourite
  Favourite {
    name: String,
    /// Remove the mark instead
    #[arg(long)]
    off: bool,
  },
  /// List favourites
  Favourites {
    /// Keep running and print the list on every change
    #[arg(short, long)]
    watch: bool,
  },
  /// Delete cached Pokémon and artwork
  Clear,
}

/// Log to stderr and to a daily file under the data directory.
///
/// Level comes from RUST_LOG (default: warn).
fn init_tracing() -> Option<WorkerGuard> {
  use tracing_subscriber::layer::SubscriberExt;
  use tracing_subscriber::util::SubscriberInitExt;

  let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

  let file_layer = config::data_dir()
    .ok()
    .map(|dir| dir.join("logs"))
    .filter(|dir| std::fs::create_dir_all(dir).is_ok())
    .map(|dir| {
      let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "pokedex"));
      let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .compact();
      (layer, guard)
    });

  let (file_layer, guard) = match file_layer {
    Some((layer, guard)) => (Some(layer), Some(guard)),
    None => (None, None),
  };

  tracing_subscriber::registry()
    .with(env_filter)
    .with(
      tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .compact(),
    )
    .with(file_layer)
    .try_init()
    .ok();

  guard
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;
  let _log_guard = init_tracing();

  let args = Args::parse();

  // Load configuration
  let config = config::Config::load(args.config.as_deref())?;

  let app = App::new(config)?;
  let result = match args.command {
    Command::List { offset, limit } => app.list(offset, limit).await,
    Command::Show { name } => app.show(&name).await,
    Command::Favourite { name, off } => app.favourite(&name, !off),
    Command::Favourites { watch } => app.favourites(watch).await,
    Command::Clear => app.clear().await,
  };
  app.shutdown();

  result
}
