mod cmd;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ghchecks",
    about = "Synthesize the deployment template for the GitHub CI/CD checks lambda",
    version,
    propagate_version = true
)]
struct Cli {
    /// Shared app config, also read by the lambda at runtime
    #[arg(long, global = true, default_value = "lambda/app/config.yaml")]
    config: PathBuf,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the environment, validate the config, and write the template
    Synth {
        /// Where to write the template ("-" for stdout)
        #[arg(long, default_value = "template.json")]
        out: PathBuf,

        /// Deployment account (default: AWS_ACCOUNT env var)
        #[arg(long, env = "AWS_ACCOUNT", hide_env_values = true)]
        account: Option<String>,

        /// Deployment region (default: AWS_REGION env var, then us-east-1)
        #[arg(long, env = "AWS_REGION")]
        region: Option<String>,
    },

    /// Validate the shared config without synthesizing
    Validate,

    /// Show the trigger schedule and its next firings
    Schedule {
        /// How many upcoming firings to list
        #[arg(long, default_value = "5")]
        count: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Synth {
            out,
            account,
            region,
        } => cmd::synth::run(&cli.config, &out, account, region, cli.json),
        Commands::Validate => cmd::validate::run(&cli.config, cli.json),
        Commands::Schedule { count } => cmd::schedule::run(count, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
