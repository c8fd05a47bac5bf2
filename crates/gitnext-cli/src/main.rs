mod cmd_advise;
mod cmd_config;
mod cmd_rules;
mod render;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "git-next",
    version,
    about = "Git advice that doesn't lie",
    long_about = "Analyzes the repository state and suggests the least harmful next git command.\n\
                  Exits with status 1 when any advice is active."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,

    #[command(flatten)]
    advise: cmd_advise::AdviseArgs,

    /// Configuration file (default: .git-next.yaml, then ~/.config/git-next/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// List the rule catalog
    Rules {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect the resolved configuration
    Config {
        #[command(subcommand)]
        cmd: cmd_config::ConfigCmd,
    },
}

/// Log to stderr so stdout stays machine-readable. `GIT_NEXT_LOG` takes
/// `EnvFilter` directives and defaults to `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("GIT_NEXT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;
    let config = cli.config.as_deref();

    match cli.cmd {
        None => cmd_advise::execute(&cwd, config, &cli.advise),
        Some(Command::Rules { json }) => {
            cmd_rules::execute(&cwd, config, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Config { cmd }) => {
            cmd_config::run(cmd, &cwd, config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
