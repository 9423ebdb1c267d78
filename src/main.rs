use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use encyclopedia::{api, config::WikiConfig, store::EntryStore};

#[derive(Parser)]
#[command(name = "encyclopedia")]
#[command(about = "A small flat-file wiki")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the wiki server
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port for HTTP
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding the `.md` entries
        #[arg(short, long)]
        entries: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "encyclopedia=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = match cli.command {
        Some(Commands::Serve {
            host,
            port,
            entries,
        }) => WikiConfig::from_env().with_overrides(host, port, entries),
        // Default: serve with environment settings
        None => WikiConfig::from_env(),
    };

    let store = match &config.entries_dir {
        Some(dir) => EntryStore::open(dir.clone())?,
        None => EntryStore::open_default()?,
    };
    tracing::info!("Serving entries from {}", store.root().display());

    api::serve(&config, store).await
}
