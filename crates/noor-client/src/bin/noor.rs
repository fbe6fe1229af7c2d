//! `noor` -- submit entries and browse the archive from a terminal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use noor_client::{
    view, ClientConfig, HttpRemoteStore, RemoteEndpoints, Scope, SyncCoordinator, SyncError,
    ViewerRole,
};
use noor_shared::{SubmissionDraft, SubmissionKind};
use noor_store::Database;

#[derive(Parser, Debug)]
#[command(name = "noor", version, about = "Noor submission client")]
struct Cli {
    /// Remote store endpoint (overrides NOOR_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// SQLite database path (overrides NOOR_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new text or drawing entry
    Submit(SubmitArgs),
    /// Published entries, remote first
    Archive,
    /// Every entry with status and contact, remote first
    Admin,
    /// Published entries from the local store only
    Local,
}

#[derive(clap::Args, Debug)]
struct SubmitArgs {
    #[arg(long = "type", default_value = "text")]
    kind: SubmissionKind,

    /// Text markup, or a data:image URL for drawings
    #[arg(long, conflicts_with = "content_file", required_unless_present = "content_file")]
    content: Option<String>,

    /// Read the content from a file instead
    #[arg(long)]
    content_file: Option<PathBuf>,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, default_value = "")]
    name: String,

    /// Show a generated pseudonym instead of the name
    #[arg(long)]
    anonymous: bool,

    /// Allow the entry on the public archive
    #[arg(long)]
    display: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    noor_client::init_tracing();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(endpoint) = cli.endpoint.as_deref() {
        config.endpoints = RemoteEndpoints::single(endpoint);
    }
    if let Some(db) = cli.db {
        config.db_path = Some(db);
    }
    info!(
        remote = !config.endpoints.is_empty(),
        db = ?config.db_path,
        "Loaded configuration"
    );

    let database = match &config.db_path {
        Some(path) => Database::open_at(path),
        None => Database::new(),
    }
    .context("failed to open local database")?;

    let remote = Arc::new(HttpRemoteStore::new(config.endpoints.clone()));
    let sync = SyncCoordinator::new(database, remote);

    match cli.command {
        Command::Submit(args) => submit(&sync, args).await?,
        Command::Archive => print_cards(&sync.list_submissions(Scope::Published).await, ViewerRole::Public),
        Command::Admin => print_cards(&sync.list_submissions(Scope::All).await, ViewerRole::Admin),
        Command::Local => print_cards(&sync.local_submissions(Scope::Published), ViewerRole::Public),
    }

    Ok(())
}

async fn submit(sync: &SyncCoordinator<Database>, args: SubmitArgs) -> Result<()> {
    let content = match (args.content, args.content_file) {
        (Some(content), _) => content,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => String::new(),
    };

    let draft = SubmissionDraft {
        email: args.email,
        name: args.name,
        anonymous: args.anonymous,
        display: args.display,
        kind: args.kind,
        content,
    };

    let receipt = match sync.record_submission(draft) {
        Ok(receipt) => receipt,
        Err(SyncError::Validation(e)) => {
            anyhow::bail!("Please provide something to submit: {e}");
        }
        Err(e) => return Err(e.into()),
    };

    println!("Thank you for your submission!");
    if receipt.submission.is_anonymous() {
        println!("Your pseudonym: {}", receipt.submission.pseudonym());
    }

    // a short-lived process would otherwise abandon the delivery
    receipt.wait_for_delivery().await;
    Ok(())
}

fn print_cards(submissions: &[noor_shared::Submission], role: ViewerRole) {
    if submissions.is_empty() {
        println!("No submissions yet.");
        return;
    }
    for card in view::cards(submissions, role) {
        println!("{card}\n");
    }
}
