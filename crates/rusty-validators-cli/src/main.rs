mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rusty_validators::{Activator, HostContext, PluginRegistry};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rusty-validators")]
#[command(version, about = "Form field validator plugins", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./rusty-validators.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered plugins
    List,

    /// Print the property schema of a validator
    Schema {
        /// Validator class name, e.g. MandatoryValidator
        class_name: String,
    },

    /// Validate a submission against a form definition
    Validate {
        /// Form definition (JSON)
        #[arg(short, long)]
        form: PathBuf,

        /// Submitted values (JSON)
        #[arg(short, long)]
        submission: PathBuf,
    },
}

fn init_logging(level: &str) {
    // stdout carries command output, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = commands::load_config(cli.config.as_deref())?;
    init_logging(&config.logging.level);

    let registry = Arc::new(PluginRegistry::new());
    let activator = Activator::start(&registry);
    let host = HostContext::new(registry.clone(), config);

    let outcome = match cli.command {
        Commands::List => commands::list::execute(&host).map(|()| ExitCode::SUCCESS),
        Commands::Schema { class_name } => {
            commands::schema::execute(&host, &class_name).map(|()| ExitCode::SUCCESS)
        }
        Commands::Validate { form, submission } => {
            commands::validate::execute(&host, &form, &submission).map(|valid| {
                if valid {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            })
        }
    };

    activator.stop(&registry);
    outcome
}
