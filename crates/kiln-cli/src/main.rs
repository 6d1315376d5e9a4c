mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kiln")]
#[command(version, about = "Kiln CLI - inspect and test application routes", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "kiln.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every declared route
    Routes {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which route answers a request
    Match {
        /// HTTP method (GET, POST, ...)
        method: String,

        /// Request path, e.g. /users/42
        path: String,
    },

    /// Build the URL of a named route
    Url {
        /// Route name
        name: String,

        /// Parameters as key=value pairs
        params: Vec<String>,
    },

    /// Compile every route pattern and report the ones that fail
    Compile {
        /// Print the compiled regex of every route
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    // RUST_LOG=kiln_router=trace shows every candidate route
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    match cli.command {
        Commands::Routes { json } => {
            commands::routes::execute(&cli.config, json)?;
        }
        Commands::Match { method, path } => {
            commands::matching::execute(&cli.config, &method, &path)?;
        }
        Commands::Url { name, params } => {
            commands::url::execute(&cli.config, &name, &params)?;
        }
        Commands::Compile { verbose } => {
            commands::compile::execute(&cli.config, verbose)?;
        }
    }

    Ok(())
}
