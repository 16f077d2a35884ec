/// Tempo shuffle - drive a file-backed shuffle session from the terminal
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tempo_session::{FileStore, ShuffleSession, ShuffleSettings, StateStore, StaticCollection};
use tempo_shuffle::Direction;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tempo-shuffle")]
#[command(about = "Inspect and drive the persisted shuffle order", long_about = None)]
struct Cli {
    /// Settings file path (defaults to ./tempo.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Number of items in the loaded collection
    #[arg(short, long, global = true)]
    size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn shuffle on, replacing any stored order
    Enable {
        /// Index of the item currently playing
        #[arg(long)]
        current: Option<usize>,
        /// Override the configured chunk size
        #[arg(long)]
        chunk_size: Option<usize>,
    },
    /// Skip to the next item
    Next {
        /// Wrap around at the end
        #[arg(short, long)]
        repeat: bool,
    },
    /// Go back to the previous item
    Previous {
        /// Wrap around at the start
        #[arg(short, long)]
        repeat: bool,
    },
    /// Print the stored shuffle state
    Status,
    /// Turn shuffle off and clear stored state
    Disable,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tempo_session=info,tempo_shuffle=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => ShuffleSettings::load_from(path),
        None => ShuffleSettings::load(),
    }
    .context("Failed to load settings")?;
    tracing::debug!("State directory: {:?}", settings.state_dir);

    match cli.command {
        Commands::Enable {
            current,
            chunk_size,
        } => {
            if let Some(chunk_size) = chunk_size {
                settings.chunk_size = chunk_size;
            }
            let size = require_size(cli.size)?;
            tracing::info!(
                "Enabling shuffle for {} items (chunk size {})",
                size,
                settings.chunk_size
            );
            let player = StaticCollection::new(current, size);
            let session = ShuffleSession::enable(&player, open_store(&settings)?, &settings)?;
            print_index(session.current());
        }
        Commands::Next { repeat } => {
            let mut session = resume(cli.size, &settings)?;
            let index = session.next(repeat);
            if index.is_some() {
                session.on_item_started_playing(Direction::Forward, repeat);
            }
            print_index(index);
        }
        Commands::Previous { repeat } => {
            let mut session = resume(cli.size, &settings)?;
            let index = session.previous(repeat);
            if index.is_some() {
                session.on_item_started_playing(Direction::Backward, repeat);
            }
            print_index(index);
        }
        Commands::Status => {
            let session = resume(cli.size, &settings)?;
            let state = session.state();
            println!("collection size:    {}", state.collection_size());
            println!("chunk size:         {}", state.chunk_size());
            println!("pinned start index: {:?}", state.start_index());
            println!("cursor:             {}", state.cursor());
            println!("current index:      {:?}", session.current());
            println!(
                "materialized:       {}/{}",
                state.total_materialized(),
                state.collection_size()
            );
            println!("phase:              {}", state.phase());
            println!("ran off end:        {}", state.ran_off_end());
        }
        Commands::Disable => {
            let mut store = open_store(&settings)?;
            match cli.size {
                Some(size) => {
                    let player = StaticCollection::new(None, size);
                    if let Some(session) = ShuffleSession::resume(&player, store, &settings)? {
                        session.dispose()?;
                    }
                }
                None => store.remove(&settings.storage_key)?,
            }
            tracing::info!("Cleared shuffle state '{}'", settings.storage_key);
            println!("shuffle off");
        }
    }

    Ok(())
}

fn require_size(size: Option<usize>) -> anyhow::Result<usize> {
    size.context("--size is required (number of items in the collection)")
}

fn open_store(settings: &ShuffleSettings) -> anyhow::Result<FileStore> {
    FileStore::open(&settings.state_dir)
        .with_context(|| format!("Failed to open state directory {:?}", settings.state_dir))
}

fn resume(
    size: Option<usize>,
    settings: &ShuffleSettings,
) -> anyhow::Result<ShuffleSession<FileStore>> {
    let size = require_size(size)?;
    let player = StaticCollection::new(None, size);
    let session = ShuffleSession::resume(&player, open_store(settings)?, settings)?;
    if session.is_none() {
        tracing::warn!("No usable shuffle state for a collection of {} items", size);
    }
    session.context("No shuffle order stored for this collection (run `enable` first)")
}

fn print_index(index: Option<usize>) {
    match index {
        Some(index) => println!("{}", index),
        None => println!("end"),
    }
}
