use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use suins_core::{Network, PackageInfo, Slot};
use suins_tools::{
    logging, Config, DayOneSetup, SetupError, SetupOutcome, SetupTransaction, SuiRpcClient,
};
use tracing::error;

#[derive(Parser)]
#[command(name = "suins")]
#[command(about = "SuiNS tools for deployment metadata and day-one setup transactions")]
struct Cli {
    /// Network to target (mainnet/testnet); overrides SUINS_NETWORK and suins.toml
    #[arg(short, long, global = true)]
    network: Option<Network>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the transaction registering the day-one Display
    Display,
    /// Build the transaction creating the day-one transfer policy, if missing
    TransferPolicy,
    /// Build one transaction with both setup steps
    Setup,
    /// Show the deployment registry for a network
    Registry {
        /// Print as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Check configuration
    Config {
        /// Exit with an error if the configuration is invalid
        #[arg(short, long)]
        validate: bool,
        /// Print as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn print_transaction(tx: &SetupTransaction) -> Result<()> {
    let ptb = tx.build().context("failed to lower setup transaction")?;
    println!("{}", ptb.to_json()?);
    Ok(())
}

fn print_registry(info: &PackageInfo) {
    println!("SuiNS deployment on {}", info.network);
    for (field, slot) in info.addresses() {
        match slot {
            Slot::Assigned(addr) => println!("  {field:<34} {addr}"),
            Slot::Pending => println!("  {field:<34} (pending)"),
        }
    }
    if info.discord.is_none() {
        println!("  {:<34} (not deployed)", "discord");
    }
}

/// Report for the policy step of `suins setup`.
///
/// A failed lookup only drops the policy step and the display stays. Registry
/// errors are configuration bugs and abort the command.
fn policy_report(result: Result<SetupOutcome, SetupError>) -> Result<Value> {
    match result {
        Ok(outcome) => Ok(json!(outcome)),
        Err(SetupError::Remote(err)) => {
            error!(error = %err, "transfer policy step aborted");
            Ok(json!({ "outcome": "failed", "error": err.to_string() }))
        }
        Err(err) => Err(err.into()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::load_for(cli.network) {
        Ok(config) => config,
        Err(err) => {
            if let Commands::Config { validate: true, .. } = cli.command {
                eprintln!("Configuration invalid: {err}");
                std::process::exit(1);
            }
            return Err(err).context("failed to load configuration");
        }
    };
    logging::init(config.debug)?;

    let setup = DayOneSetup::for_network(config.network);

    match cli.command {
        Commands::Display => {
            let mut tx = SetupTransaction::new();
            setup.create_display(&mut tx)?;
            print_transaction(&tx)
        }
        Commands::TransferPolicy => {
            let client = SuiRpcClient::from_config(&config)?;
            let mut tx = SetupTransaction::new();
            match setup.create_transfer_policy(&mut tx, &client).await? {
                SetupOutcome::Created => print_transaction(&tx),
                outcome @ SetupOutcome::Skipped { .. } => {
                    println!("{}", serde_json::to_string_pretty(&outcome)?);
                    Ok(())
                }
            }
        }
        Commands::Setup => {
            let client = SuiRpcClient::from_config(&config)?;
            let mut tx = SetupTransaction::new();
            setup.create_display(&mut tx)?;

            let policy = policy_report(setup.create_transfer_policy(&mut tx, &client).await)?;

            let ptb = tx.build().context("failed to lower setup transaction")?;
            let report = json!({
                "network": config.network,
                "transfer_policy": policy,
                "transaction": ptb,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Commands::Registry { json } => {
            let info = PackageInfo::resolve(config.network);
            if json {
                let report = json!({
                    "package": info,
                    "pending": info.placeholders(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_registry(info);
            }
            Ok(())
        }
        Commands::Config { validate, json } => {
            if json {
                println!("{}", config.to_json()?);
            } else {
                config.print_summary();
            }
            if validate {
                println!("Configuration is valid");
            }
            Ok(())
        }
    }
}
