//! Mintgate CLI Application

mod cli;

use clap::Parser as _;
use cli::{ClaimCommands, Cli, Commands, ConfigCommands, VerifyCommands};
use mintgate_sdk::commands::{
    allowlist_configuration_schema, build_allowlist_configuration, claim_status,
    generate_claim_proof, submit_claim, verify_claim_proof,
};

fn init_tracing() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_target(false)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize tracing: {:?}", e))?;

    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> eyre::Result<()> {
    // Load .env file (fails silently if not found)
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let cli = Cli::parse();

    let res = match cli.command {
        Commands::Config { command } => match command {
            ConfigCommands::Build { args } => {
                let tree_out = args.tree_output();
                build_allowlist_configuration(
                    (&args).into(),
                    args.identities,
                    args.config_out,
                    tree_out,
                )
                .await
            }
            ConfigCommands::Schema => allowlist_configuration_schema(),
        },
        Commands::Claim { command } => match command {
            ClaimCommands::Prove { args } => match args.membership_source() {
                Ok(source) => {
                    generate_claim_proof(args.identity, source, args.config, args.proof_out).await
                }
                Err(e) => Err(e),
            },
            ClaimCommands::Submit { args } => {
                submit_claim(args.proof_in, args.config, args.ledger)
                    .await
                    .map(|_| ())
            }
            ClaimCommands::Status { args } => {
                claim_status(args.identity, args.identities, args.ledger, args.config)
                    .await
                    .map(|_| ())
            }
        },
        Commands::Verify { command } => match command {
            VerifyCommands::Proof { args } => verify_claim_proof(args.proof_in, args.config).await,
        },
    };

    if let Err(e) = res {
        tracing::error!("Error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
