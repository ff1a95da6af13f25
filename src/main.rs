mod cli;

use angle_catalog::{
    config,
    server::{self, auth},
};
use angle_catalog_db::pool::init_pool;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config::validate_config(&config)?;

    tracing::info!("Starting angle-catalog server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    let db_path = config.storage.database_path.to_string_lossy().into_owned();
    tracing::info!("Initializing database at {}", db_path);
    let db_pool = init_pool(&db_path).context("Failed to initialize database")?;

    tracing::info!("Storing uploads under {:?}", config.storage.uploads_dir);

    server::start_server(config, db_pool).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "angle_catalog=trace,angle_catalog_db=debug,angle_catalog_common=debug,tower_http=debug"
                .to_string()
        } else {
            "angle_catalog=info,angle_catalog_db=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("angle-catalog {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::GenerateApiKey => generate_api_key(),
    }
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_summary(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            println!("Default config:");
            print_summary(&config::Config::default());
        }
    }

    Ok(())
}

fn print_summary(config: &config::Config) {
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Auth enabled: {}", config.server.auth.enabled);
    println!("  Database: {:?}", config.storage.database_path);
    println!("  Uploads: {:?}", config.storage.uploads_dir);
    println!("  Max upload: {} bytes", config.storage.max_upload_bytes);
    println!("  Page size: {}", config.catalog.default_page_size);
    println!(
        "  Purge records on delete: {}",
        config.catalog.purge_records_on_delete
    );
}

fn generate_api_key() -> Result<()> {
    let key = auth::generate_api_key();
    println!("{}", key);
    Ok(())
}
