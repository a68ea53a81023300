//! CLI entry point for headless-blog

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "headless-blog")]
#[command(version)]
#[command(about = "A blog site rendered from posts served by a headless CMS", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
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
    /// Write a default _config.yml and static assets
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Start the site server
    #[command(alias = "s")]
    Server {
        /// Port to listen on (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to server.ip)
        #[arg(short, long)]
        ip: Option<String>,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// List posts published in the CMS
    List,

    /// Show a single post by slug
    Show {
        /// Slug of the post
        slug: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "headless_blog=debug,info"
    } else {
        "headless_blog=info"
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
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            headless_blog::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::Server { port, ip, open } => {
            let blog = headless_blog::Blog::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| blog.config.server.ip.clone());
            let port = port.unwrap_or(blog.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            blog.serve(&ip, port, open).await?;
        }

        Commands::List => {
            let blog = headless_blog::Blog::new(&base_dir)?;
            blog.list().await?;
        }

        Commands::Show { slug } => {
            let blog = headless_blog::Blog::new(&base_dir)?;
            blog.show(&slug).await?;
        }

        Commands::Version => {
            println!("headless-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
