//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod bio;
pub mod character_list;
pub mod say;


use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::catalog::{Catalog, CharacterId};
use crate::cli::bio::print_bio;
use crate::cli::character_list::list_characters;
use crate::cli::say::run_say;
use crate::core::app::{App, AppInitConfig};
use crate::core::config::Config;
use crate::core::route::Route;
use crate::core::transport::HttpTransport;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{init_debug_log, LoggingState};

#[derive(Parser)]
#[command(name = "rolechat", version)]
#[command(about = "A terminal roleplay chat client")]
#[command(
    long_about = "rolechat shows a grid of character cards; pick one, read its biography and \
start a roleplay. Every message is sent, with the conversation so far and the character's \
biography, to an inference endpoint that replies in character.\n\n\
Environment Variables:\n\
  ROLECHAT_ENDPOINT   Inference endpoint (default http://127.0.0.1:8787)\n\
  RUST_LOG            Filter for --debug-log output\n\n\
Controls:\n\
  Arrows/hjkl       Move between cards\n\
  Enter             Open a card, then start the roleplay\n\
  Enter             Send the message (Alt+Enter for a new line)\n\
  Up/Down/PgUp/PgDn Scroll the conversation\n\
  End               Jump to the latest message\n\
  Esc               Back to the character list\n\
  Ctrl+C            Quit"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Inference endpoint, overriding the config file and ROLECHAT_ENDPOINT
    #[arg(short = 'e', long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Character catalog (TOML) to use instead of the configured one
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Append the conversation transcript to this file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Write diagnostics to this file (filtered by RUST_LOG)
    #[arg(long, global = true, value_name = "FILE")]
    pub debug_log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive interface (default)
    Chat {
        /// Open this route, e.g. "/chat/2"
        #[arg(long, conflicts_with = "character")]
        route: Option<String>,
        /// Go straight to the chat with this character id
        #[arg(short = 'c', long)]
        character: Option<CharacterId>,
    },
    /// List the characters in the catalog
    Characters,
    /// Send one message to a character and print the reply
    Say {
        /// Character id
        #[arg(short = 'c', long)]
        character: CharacterId,
        /// Message text
        #[arg(trailing_var_arg = true, required = true)]
        prompt: Vec<String>,
    },
    /// Print the biography sent with every turn for a character
    Bio {
        /// Character id
        #[arg(short = 'c', long)]
        character: CharacterId,
    },
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Option<Vec<String>>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

impl Commands {
    fn default_chat() -> Self {
        Commands::Chat {
            route: None,
            character: None,
        }
    }
}

/// First screen for `rolechat chat`.
pub(crate) fn initial_route(route: Option<&str>, character: Option<CharacterId>) -> Route {
    match (route, character) {
        (Some(route), _) => Route::parse(route),
        (None, Some(id)) => Route::chat(id),
        (None, None) => Route::Catalog,
    }
}

pub(crate) fn load_catalog(args: &Args, config: &Config) -> Result<Catalog, Box<dyn Error>> {
    let path = args.catalog.as_deref().or(config.catalog.as_deref());
    Ok(Catalog::load(path)?)
}

pub(crate) fn build_transport(args: &Args, config: &Config) -> Result<HttpTransport, Box<dyn Error>> {
    let endpoint = config.resolve_endpoint(args.endpoint.as_deref());
    Ok(HttpTransport::new(endpoint, config.request_timeout())?)
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}

fn load_catalog_or_exit(args: &Args, config: &Config) -> Catalog {
    match load_catalog(args, config) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    if let Err(e) = init_debug_log(args.debug_log.as_deref()) {
        eprintln!("❌ Cannot open debug log: {e}");
        std::process::exit(1);
    }

    tokio::runtime::Runtime::new()?.block_on(async_main(args))
}

async fn async_main(mut args: Args) -> Result<(), Box<dyn Error>> {
    let command = args.command.take().unwrap_or_else(Commands::default_chat);

    match command {
        Commands::Chat { route, character } => {
            let config = load_config();
            let catalog = load_catalog_or_exit(&args, &config);
            let transport = build_transport(&args, &config)?;
            let transcript = match LoggingState::new(args.log.clone()) {
                Ok(logging) => logging,
                Err(e) => {
                    eprintln!("❌ Cannot open log file: {e}");
                    std::process::exit(1);
                }
            };

            if let Some(path) = transcript.file_path() {
                tracing::info!(path = %path.display(), "writing transcript");
            }
            tracing::info!(endpoint = transport.endpoint(), "starting interactive session");
            let app = App::new(AppInitConfig {
                catalog,
                grid_columns: config.grid_columns(),
                scroll_threshold: config.scroll_threshold(),
                transcript,
            });
            run_chat(
                app,
                Arc::new(transport),
                initial_route(route.as_deref(), character),
            )
            .await
        }
        Commands::Characters => {
            let config = load_config();
            let catalog = load_catalog_or_exit(&args, &config);
            list_characters(&catalog);
            Ok(())
        }
        Commands::Say { character, prompt } => {
            let config = load_config();
            let catalog = load_catalog_or_exit(&args, &config);
            let transport = build_transport(&args, &config)?;
            run_say(&catalog, character, &prompt.join(" "), &transport).await
        }
        Commands::Bio { character } => {
            let config = load_config();
            let catalog = load_catalog_or_exit(&args, &config);
            print_bio(&catalog, character)
        }
        Commands::Set { key, value } => {
            let mut config = load_config();
            let value = value.map(|parts| parts.join(" ")).unwrap_or_default();
            if value.trim().is_empty() {
                config.print_all();
                return Ok(());
            }
            if let Err(e) = config.set_value(&key, &value) {
                eprintln!("❌ {e}");
                std::process::exit(1);
            }
            config.save()?;
            println!("✅ Set {key} to: {}", value.trim());
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = load_config();
            if let Err(e) = config.unset_value(&key) {
                eprintln!("❌ {e}");
                std::process::exit(1);
            }
            config.save()?;
            println!("✅ Unset {key}");
            Ok(())
        }
    }
}
