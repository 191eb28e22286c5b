//! FingerPay terminal client
//!
//! Enrolls a card with the tokenization backend, keeps the recovery token
//! in a local store, and recovers the card on demand.

mod clipboard;
mod terminal;

use clap::{Parser, Subcommand};
use clipboard::{CommandClipboard, Osc52Surface};
use fingerpay_client::{BackendClient, ClientConfig};
use fingerpay_core::{Pin, Presenter};
use fingerpay_service::{CopyFailurePolicy, RecoverAction, UiPort, Workflow};
use fingerpay_storage::{FileStore, TokenStore};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use terminal::{Piped, SecretInput, TerminalUi, Tty};
use tracing::info;

#[derive(Parser)]
#[command(name = "fingerpay")]
#[command(about = "Card tokenization client", long_about = None)]
struct Cli {
    /// Directory holding the local store
    #[arg(long, env = "FINGERPAY_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Backend request timeout in seconds
    #[arg(long, env = "FINGERPAY_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or change the backend URL
    Endpoint {
        #[command(subcommand)]
        action: EndpointAction,
    },

    /// Enroll a card and store its recovery token
    Enroll,

    /// Recover the enrolled card
    Recover {
        /// Copy the full card number to the clipboard
        #[arg(long)]
        copy: bool,

        /// Still show the masked card when the copy fails
        #[arg(long, requires = "copy")]
        reveal_on_copy_failure: bool,
    },

    /// Forget the stored recovery token
    Forget,

    /// Unlock a session, read the card for autofill, then lock
    SessionDemo {
        /// Session lifetime in seconds
        #[arg(long)]
        ttl_seconds: Option<u64>,
    },
}

#[derive(Subcommand)]
enum EndpointAction {
    /// Print the stored backend URL
    Show,
    /// Store a new backend URL
    Set {
        /// Backend base URL
        url: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let file_store = match &cli.data_dir {
        Some(dir) => FileStore::in_dir(dir),
        None => FileStore::open_default()?,
    };
    info!("Using store {}", file_store.path().display());
    let store = TokenStore::new(file_store);

    match cli.command {
        Commands::Endpoint { action } => match action {
            EndpointAction::Show => {
                println!("{}", store.get_endpoint().await?);
            }
            EndpointAction::Set { url } => {
                store.set_endpoint(&url).await?;
                println!("Backend URL saved");
            }
        },
        Commands::Forget => {
            store.clear_token().await?;
            println!("Stored K token removed");
        }
        Commands::Enroll => {
            let ui = Arc::new(TerminalUi::new());
            ui.prompt_enroll(secret_input().as_mut())?;
            let workflow = workflow(store, ui, cli.timeout_secs, CopyFailurePolicy::Abort)?;
            workflow.submit_enroll().await?;
        }
        Commands::Recover {
            copy,
            reveal_on_copy_failure,
        } => {
            let action = if copy {
                RecoverAction::Copy
            } else {
                RecoverAction::Reveal
            };
            let policy = if reveal_on_copy_failure {
                CopyFailurePolicy::RevealMasked
            } else {
                CopyFailurePolicy::Abort
            };

            let ui = Arc::new(TerminalUi::new());
            ui.prompt_recover(secret_input().as_mut(), action)?;
            let workflow = workflow(store, ui, cli.timeout_secs, policy)?;
            workflow.submit_recover().await?;
        }
        Commands::SessionDemo { ttl_seconds } => {
            let pin = secret_input().read_secret("PIN")?;
            let ui = Arc::new(TerminalUi::new());
            let workflow = workflow(store, ui, cli.timeout_secs, CopyFailurePolicy::Abort)?;

            let mut session = workflow
                .open_session(&Pin::new(pin.as_str()), ttl_seconds.map(Duration::from_secs))
                .await?;
            let card = session.card_for_autofill()?;
            println!("Autofill card: {}", fingerpay_core::mask(&card));
            session.lock();
            println!("Session locked");
        }
    }

    Ok(())
}

/// Hidden terminal prompts, or plain lines when stdin is piped
fn secret_input() -> Box<dyn SecretInput> {
    if std::io::stdin().is_terminal() {
        Box::new(Tty)
    } else {
        Box::new(Piped(std::io::stdin().lock()))
    }
}

fn workflow(
    store: TokenStore<FileStore>,
    ui: Arc<TerminalUi>,
    timeout_secs: Option<u64>,
    policy: CopyFailurePolicy,
) -> anyhow::Result<Workflow<FileStore>> {
    let config = ClientConfig {
        request_timeout_secs: timeout_secs,
        ..Default::default()
    };
    // The endpoint is read from the store on every submission.
    let client = BackendClient::with_config("", &config)?;
    let presenter = Presenter::new(Arc::new(CommandClipboard), Arc::new(Osc52Surface::new()));

    Ok(Workflow::new(store, client, presenter, ui as Arc<dyn UiPort>).with_copy_failure_policy(policy))
}
