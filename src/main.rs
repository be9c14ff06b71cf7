//! CLI entry point for mdwiki

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mdwiki")]
#[command(version)]
#[command(about = "A small personal wiki server backed by Markdown files", long_about = None)]
struct Cli {
    /// Set the wiki directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new wiki
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Start the wiki server
    #[command(alias = "s")]
    Server {
        /// Port to listen on (overrides wiki.yml)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (overrides wiki.yml)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List stored pages
    List,

    /// Search page contents (case-sensitive substring)
    Search {
        /// Text to look for
        query: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdwiki=debug,tower_http=debug,info"
    } else {
        "mdwiki=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing wiki in {:?}", target_dir);
            mdwiki::commands::init::init_wiki(&target_dir)?;
            println!("Initialized wiki in {:?}", target_dir);
        }

        Commands::Server { port, ip } => {
            let wiki = mdwiki::Wiki::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| wiki.config.ip.clone());
            let port = port.unwrap_or(wiki.config.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            if let Err(e) = mdwiki::server::start(&wiki, &ip, port).await {
                tracing::error!("Server failed: {:#}", e);
                return Err(e);
            }
        }

        Commands::List => {
            let wiki = mdwiki::Wiki::new(&base_dir)?;
            mdwiki::commands::list::run(&wiki)?;
        }

        Commands::Search { query } => {
            let wiki = mdwiki::Wiki::new(&base_dir)?;
            mdwiki::commands::search::run(&wiki, &query)?;
        }

        Commands::Version => {
            println!("mdwiki version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
