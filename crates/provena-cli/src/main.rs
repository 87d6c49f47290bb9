//! # provena CLI Entry Point
//!
//! Assembles subcommands, loads the JSON state file, dispatches to the
//! handler modules, and persists the resulting snapshot.

use std::path::PathBuf;

use clap::Parser;

use provena_core::WallClock;
use provena_ledger::Ledger;

/// Provena — custody-chain provenance ledger.
///
/// Tracks physical goods through manufacture, checkpoints, custody
/// transfers, certifications, and recalls against a JSON state file.
#[derive(Parser, Debug)]
#[command(name = "provena", version, about)]
struct Cli {
    /// Path to the ledger state file.
    #[arg(
        long,
        env = "PROVENA_STATE",
        default_value = "provena-ledger.json",
        global = true
    )]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Product registry: register, ship, recall, show, verify.
    Product(provena_cli::product::ProductArgs),
    /// Checkpoint ledger: add and show waypoints.
    Checkpoint(provena_cli::checkpoint::CheckpointArgs),
    /// Custody transfers: initiate, accept, reject, cancel, show.
    Transfer(provena_cli::transfer::TransferArgs),
    /// Verifier authorization: authorize, deauthorize, check.
    Verifier(provena_cli::verifier::VerifierArgs),
    /// Certifications: add, revoke, check, show.
    Cert(provena_cli::certification::CertificationArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let store = provena_cli::state::load(&cli.state)?;
    let ledger = Ledger::with_store(store, WallClock);

    match cli.command {
        Commands::Product(args) => provena_cli::product::run(&ledger, args)?,
        Commands::Checkpoint(args) => provena_cli::checkpoint::run(&ledger, args)?,
        Commands::Transfer(args) => provena_cli::transfer::run(&ledger, args)?,
        Commands::Verifier(args) => provena_cli::verifier::run(&ledger, args)?,
        Commands::Cert(args) => provena_cli::certification::run(&ledger, args)?,
    }

    provena_cli::state::save(&cli.state, &ledger.snapshot())?;
    Ok(())
}
