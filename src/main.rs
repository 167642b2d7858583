// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Luna Collection command line: serve the museum or browse it from a terminal

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use luna::assist::{AssistClient, GeminiClient};
use luna::catalog::{filter::filter, Catalog, Category};
use luna::config::AppConfig;
use luna::views::ViewRegistry;
use luna::{LunaError, Result};

/// Luna Collection - a digital museum with an AI curator
#[derive(Parser, Debug)]
#[command(name = "luna")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version)]
#[command(about = "Digital museum with an AI curator", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Output format for listings
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web UI and JSON API
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List the seed collection
    List {
        /// Category to show (ALL, PAINTING, WOOD_CARVING, ...)
        #[arg(short, long, default_value = "ALL")]
        category: Category,

        /// Free-text search over title and materials
        #[arg(short = 's', long)]
        search: Option<String>,
    },

    /// Ask the curator for a description of one artwork
    Describe {
        /// Artwork id
        id: String,
    },

    /// Talk to the curator about one artwork
    Chat {
        /// Artwork id
        id: String,
    },

    /// Show assist provider status
    Status,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Generate default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config.json")]
        output: PathBuf,
    },

    /// Validate configuration file
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if !cli.quiet {
        info!("Luna Collection v{}", env!("CARGO_PKG_VERSION"));
    }

    let config = AppConfig::load(&cli.config)?;

    match cli.command {
        Some(Commands::Serve { host, port }) => run_serve(config, host, port).await,
        Some(Commands::List { category, search }) => {
            run_list(category, search.as_deref().unwrap_or_default().trim(), &cli.format)
        }
        Some(Commands::Describe { id }) => run_describe(config, &id).await,
        Some(Commands::Chat { id }) => run_chat(config, &id).await,
        Some(Commands::Status) => run_status(config).await,
        Some(Commands::Config { action }) => run_config_command(config, action, &cli.config),
        None => run_serve(config, None, None).await,
    }
}

async fn run_serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.web.host = host;
    }
    if let Some(port) = port {
        config.web.port = port;
    }
    if config.assist.api_key().is_none() {
        warn!(
            "${} is not set; the curator will answer with fallback text",
            config.assist.api_key_env
        );
    }

    let assist = AssistClient::from_config(&config)?;
    luna::web::start_server(config, assist).await
}

fn run_list(category: Category, search: &str, format: &str) -> Result<()> {
    let catalog = Catalog::seeded();
    let visible = filter(catalog.iter(), category, search);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    println!("{} ({} works)", catalog.label(category), visible.len());
    for art in visible {
        println!(
            "  {:<8} {:<36} {:<22} {}",
            art.id,
            art.title,
            catalog.label(art.category),
            art.year
        );
    }
    Ok(())
}

fn find_seed(id: &str) -> Result<luna::catalog::Artwork> {
    Catalog::seeded()
        .get(id)
        .cloned()
        .ok_or_else(|| LunaError::NotFound(format!("artwork {}", id)))
}

async fn run_describe(config: AppConfig, id: &str) -> Result<()> {
    let artwork = find_seed(id)?;
    let assist = AssistClient::from_config(&config)?;

    println!("{} ({})\n", artwork.title, artwork.year);
    println!("{}", assist.generate_description(&artwork).await);
    Ok(())
}

/// Terminal conversation; one view for the whole session
async fn run_chat(config: AppConfig, id: &str) -> Result<()> {
    let artwork = find_seed(id)?;
    let views = ViewRegistry::new(AssistClient::from_config(&config)?);
    let view = views.open(&artwork)?;

    println!("Talking with the curator about \"{}\". Empty line to leave.\n", artwork.title);
    if let Some(greeting) = views.snapshot(&view)?.transcript.first() {
        println!("{}\n", greeting.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            break;
        }

        let reply = views.chat(&view, &line, &artwork).await?;
        println!("{}\n", reply.text);
    }

    views.close(&view)?;
    Ok(())
}

async fn run_status(config: AppConfig) -> Result<()> {
    let client = GeminiClient::new(&config.assist)?;

    println!("Luna Collection v{} Status", env!("CARGO_PKG_VERSION"));
    println!("==============================");

    match client.health_check().await {
        Ok(()) => println!("Provider: Reachable ({})", config.assist.base_url),
        Err(e) => println!("Provider: Error - {}", e),
    }

    match client.list_models().await {
        Ok(models) => {
            println!("\nAvailable models:");
            for m in &models {
                let marker = if m.ends_with(config.assist.model.as_str()) { "→" } else { " " };
                println!("  {} {}", marker, m);
            }
        }
        Err(e) => println!("  Error listing models: {}", e),
    }

    println!("\nConfiguration:");
    println!("  Model: {}", config.assist.model);
    println!("  Key variable: ${}", config.assist.api_key_env);
    println!("  Web UI: http://{}", config.bind_addr());

    Ok(())
}

fn run_config_command(config: AppConfig, action: ConfigCommands, config_path: &Path) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        ConfigCommands::Generate { output } => {
            AppConfig::default().save(&output)?;
            println!("Generated config at {:?}", output);
        }
        ConfigCommands::Validate => {
            println!("Configuration at {:?} is valid", config_path);
            println!("  Model: {}", config.assist.model);
            println!("  Museum: {}", config.prompts.museum_name);
            println!("  Bind: {}", config.bind_addr());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["luna"]).unwrap();
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_serve_command() {
        let cli = Cli::try_parse_from(["luna", "serve", "--port", "9000"]).unwrap();

        match cli.command {
            Some(Commands::Serve { port, host }) => {
                assert_eq!(port, Some(9000));
                assert!(host.is_none());
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_list_command() {
        let cli = Cli::try_parse_from([
            "luna", "list", "--category", "wood-carving", "-s", "oak", "--format", "json",
        ])
        .unwrap();

        assert_eq!(cli.format, "json");
        match cli.command {
            Some(Commands::List { category, search }) => {
                assert_eq!(category, Category::WoodCarving);
                assert_eq!(search.as_deref(), Some("oak"));
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["luna", "list", "--category", "sculpture"]).is_err());
    }

    #[test]
    fn test_find_seed() {
        assert_eq!(find_seed("ph-1").unwrap().title, "Neon Rain");
        assert!(matches!(find_seed("nope"), Err(LunaError::NotFound(_))));
    }
}
