//! CardVault command line.
//!
//! # Usage
//!
//! ```bash
//! # Log in against the local fixed-password check
//! AUTH_PASSWORD=pikachu cardvault --local-auth login ash --password pikachu
//!
//! # Browse and star
//! cardvault search charizard
//! cardvault show base1-4
//! cardvault star base1-4
//! cardvault favorites
//!
//! cardvault logout
//! ```
//!
//! Session and favorites live in the platform data directory unless
//! `--data-dir` is given. `RUST_LOG=debug` shows request and storage logs.

mod display;

use anyhow::{Context, Result, bail};
use cardvault_catalog::validation::{INVALID_CARD_ID, validate_card_id};
use cardvault_catalog::{
    BrowseAction, BrowseEnvironment, BrowseReducer, BrowseState, CardCatalog, CardId,
    CatalogClient, CatalogConfig,
};
use cardvault_core::environment::SystemClock;
use cardvault_runtime::Store;
use cardvault_session::{
    AuthConfig, AuthError, Authenticator, Credentials, FixedPasswordAuthenticator,
    HttpAuthenticator, SessionState, Vault,
};
use cardvault_storage::{FileBackend, KeyValueBackend};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const ORIGIN: &str = "localhost";
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

type BrowseStore = Store<
    BrowseState,
    BrowseAction,
    BrowseEnvironment<CatalogClient, SystemClock>,
    BrowseReducer<CatalogClient, SystemClock>,
>;

#[derive(Debug, Parser)]
#[command(name = "cardvault")]
#[command(about = "Browse Pokémon cards and keep a list of favorites", long_about = None)]
struct Cli {
    /// Directory holding the session and favorites file
    #[arg(long, global = true, env = "CARDVAULT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Card catalog base URL
    #[arg(long, global = true, env = "CARDVAULT_CATALOG_URL")]
    catalog_url: Option<String>,

    /// Login endpoint URL
    #[arg(long, global = true, env = "CARDVAULT_AUTH_URL")]
    auth_url: Option<String>,

    /// Check the password locally against AUTH_PASSWORD instead of calling the login endpoint
    #[arg(long, global = true)]
    local_auth: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and remember the session
    Login {
        /// Username
        username: String,
        /// Password
        #[arg(long, env = "CARDVAULT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and forget favorites
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Search cards by name; no term lists all Pokémon
    Search {
        /// Name to search for
        term: Option<String>,
        /// 1-based page
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List cards of one type
    ByType {
        /// Card type, e.g. Fire
        card_type: String,
    },
    /// List cards for a national Pokédex number
    Pokedex {
        /// Pokédex number
        number: u32,
    },
    /// Show one card
    Show {
        /// Card id, e.g. base1-4
        id: String,
    },
    /// Star or unstar a card
    Star {
        /// Card id, e.g. base1-4
        id: String,
    },
    /// List starred cards
    Favorites,
}

impl Command {
    /// Whether the command is only available to a logged-in user.
    const fn needs_session(&self) -> bool {
        !matches!(self, Self::Login { .. } | Self::Logout | Self::Whoami)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, "Starting");

    let backend = match &cli.data_dir {
        Some(dir) => FileBackend::open(dir.clone(), ORIGIN),
        None => FileBackend::default_location(ORIGIN).context("resolving data directory")?,
    };
    tracing::debug!(path = %backend.path().display(), "Using storage file");
    let mut vault = Vault::open(backend);

    if cli.command.needs_session() {
        require_session(&vault)?;
    }

    match cli.command {
        Command::Login {
            ref username,
            ref password,
        } => {
            let credentials = Credentials::new(username.as_str(), password.as_str());
            let username = if cli.local_auth {
                login(&mut vault, &FixedPasswordAuthenticator::from_env(), &credentials).await?
            } else {
                let config = cli
                    .auth_url
                    .clone()
                    .map_or_else(AuthConfig::default, AuthConfig::new)
                    .with_timeout(Duration::from_secs(cli.timeout_secs));
                login(&mut vault, &HttpAuthenticator::new(config)?, &credentials).await?
            };
            println!("Logged in as {username}");
        },
        Command::Logout => {
            vault.logout();
            println!("Logged out");
        },
        Command::Whoami => match vault.state() {
            SessionState::LoggedIn { username } => println!("{username}"),
            SessionState::LoggedOut => println!("Not logged in"),
        },
        Command::Search { ref term, page } => {
            let store = browse_store(&cli)?;
            let state = dispatch(
                &store,
                BrowseAction::FetchCards {
                    term: term.clone(),
                    page,
                },
            )
            .await?;
            if let Some(error) = state.error {
                bail!(error);
            }
            display::print_listing(&state.cards, vault.favorites());
        },
        Command::ByType { ref card_type } => {
            let client = catalog_client(&cli)?;
            let page_size = client.config().page_size;
            let page = client
                .fetch_by_type(card_type, page_size)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            display::print_listing(&page.data, vault.favorites());
        },
        Command::Pokedex { number } => {
            let client = catalog_client(&cli)?;
            let page = client
                .fetch_by_pokedex_number(number)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            display::print_listing(&page.data, vault.favorites());
        },
        Command::Show { ref id } => {
            let store = browse_store(&cli)?;
            let state = dispatch(&store, BrowseAction::FetchCardDetails(CardId::new(id.as_str())))
                .await?;
            match state.selected {
                Some(card) => display::print_card(&card, vault.favorites()),
                None => bail!(state.error.unwrap_or_else(|| "Card not found".to_string())),
            }
        },
        Command::Star { ref id } => {
            if !validate_card_id(id) {
                bail!(INVALID_CARD_ID);
            }
            let starred = vault
                .toggle_favorite(CardId::new(id.as_str()))
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            if starred {
                println!("★ {id}");
            } else {
                println!("☆ {id}");
            }
        },
        Command::Favorites => display::print_favorites(vault.favorites()),
    }

    Ok(())
}

fn require_session<B: KeyValueBackend>(vault: &Vault<B>) -> Result<()> {
    if vault.state().is_logged_in() {
        Ok(())
    } else {
        bail!(AuthError::NotLoggedIn.user_message())
    }
}

async fn login<A: Authenticator>(
    vault: &mut Vault<FileBackend>,
    authenticator: &A,
    credentials: &Credentials,
) -> Result<String> {
    vault.login(authenticator, credentials).await.map_err(|e| {
        tracing::debug!(error = %e, "Login failed");
        anyhow::anyhow!(e.user_message())
    })
}

fn catalog_client(cli: &Cli) -> Result<CatalogClient> {
    let config = cli
        .catalog_url
        .clone()
        .map_or_else(CatalogConfig::default, CatalogConfig::new)
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    Ok(CatalogClient::new(config)?)
}

fn browse_store(cli: &Cli) -> Result<BrowseStore> {
    let client = catalog_client(cli)?;
    let page_size = client.config().page_size;
    let environment = BrowseEnvironment::new(Arc::new(client), SystemClock, page_size);
    Ok(Store::new(
        BrowseState::default(),
        BrowseReducer::new(),
        environment,
    ))
}

/// Send `action`, wait for its effects to be reduced, and return the final state.
async fn dispatch(store: &BrowseStore, action: BrowseAction) -> Result<BrowseState> {
    let mut handle = store.send(action).await?;
    handle.wait().await;
    store.shutdown(SHUTDOWN_TIMEOUT).await?;
    Ok(store.state(BrowseState::clone).await)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use cardvault_storage::{MemoryBackend, keys};
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "cardvault",
            "search",
            "pikachu",
            "--page",
            "2",
            "--data-dir",
            "/tmp/vault",
            "--local-auth",
        ])
        .unwrap();

        assert!(cli.local_auth);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/vault")));
        assert!(matches!(
            cli.command,
            Command::Search { ref term, page: 2 } if term.as_deref() == Some("pikachu")
        ));
    }

    #[test]
    fn only_session_commands_are_open_to_everyone() {
        let open = ["login ash --password pikachu", "logout", "whoami"];
        let gated = [
            "search",
            "by-type Fire",
            "pokedex 6",
            "show base1-4",
            "star base1-4",
            "favorites",
        ];

        let parse = |args: &str| {
            Cli::try_parse_from(["cardvault"].into_iter().chain(args.split(' '))).unwrap()
        };

        for args in open {
            assert!(!parse(args).command.needs_session(), "{args}");
        }
        for args in gated {
            assert!(parse(args).command.needs_session(), "{args}");
        }
    }

    #[test]
    fn browsing_requires_a_session() {
        let backend = MemoryBackend::new();
        let error = require_session(&Vault::open(backend.clone())).unwrap_err();
        assert_eq!(error.to_string(), "Please log in first");

        backend.set_item(keys::IS_LOGGED_IN, "\"true\"").unwrap();
        backend.set_item(keys::USERNAME, "\"ash\"").unwrap();
        assert!(require_session(&Vault::open(backend)).is_ok());
    }
}
