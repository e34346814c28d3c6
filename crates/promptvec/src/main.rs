use anyhow::Result;
use clap::{Parser, Subcommand};
use promptvec_common::{logger, AppConfig, StorageKind};
use std::path::{Path, PathBuf};

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
            return;
        }
    }

    dotenv::dotenv().ok();
}

#[derive(Parser)]
#[command(name = "promptvec")]
#[command(about = "PromptVec - vector store API with cosine similarity search", long_about = None)]
struct Cli {
    /// Configuration file (toml, json or yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log to the console only (no log file)
    #[arg(long, global = true)]
    console_log: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Database path
        #[arg(long)]
        db_path: Option<PathBuf>,

        /// Keep vector stores in memory only
        #[arg(long)]
        memory: bool,
    },
}

/// Load configuration, from an explicit file when given
fn load_config(config_file: Option<&Path>) -> Result<AppConfig> {
    let config = match config_file {
        Some(path) => AppConfig::load(Some(path))?,
        None => AppConfig::from_env()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env must be in place before the config layers read PROMPTVEC_* variables
    load_dotenv_from_project_root();

    let mut config = load_config(cli.config.as_deref())?;

    if let Some(Commands::Serve {
        host,
        port,
        db_path,
        memory,
    }) = cli.command
    {
        if let Some(host) = host {
            config.server_host = host;
        }
        if let Some(port) = port {
            config.server_port = port;
        }
        if let Some(db_path) = db_path {
            config.log_dir = db_path.join("log");
            config.db_base_path = db_path;
        }
        if memory {
            config.storage = StorageKind::Memory;
        }
    }

    config.validate()?;
    config.ensure_directories()?;

    if cli.console_log {
        logger::setup_console_logging(&config.log_level)?;
    } else {
        logger::setup_logging(&config)?;
    }

    tracing::info!("PromptVec starting...");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Storage: {:?}", config.storage);
    if config.storage == StorageKind::File {
        tracing::info!("  Store file: {}", config.store_file_path().display());
    }

    println!("Server listening on http://{}", config.server_bind_address());

    promptvec_server::start_server(config).await?;

    Ok(())
}
