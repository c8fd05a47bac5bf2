use crate::render;
use anyhow::Context;
use clap::Args;
use gitnext_collect::{collect, CollectSettings};
use gitnext_config::Config;
use gitnext_core::{Snapshot, Summary};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

// ── CLI Schema ──

#[derive(Args, Debug, Default)]
pub struct AdviseArgs {
    /// Show suppressed advice too
    #[arg(short, long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long, conflicts_with = "compact")]
    pub json: bool,

    /// One-line summary of active rule ids
    #[arg(long)]
    pub compact: bool,

    /// Print the collected repository state to stderr first
    #[arg(long)]
    pub debug: bool,

    /// Read the repository state from a JSON file instead of git (`-` for stdin)
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,
}

// ── Command Implementation ──

/// `git-next [--all] [--json|--compact] [--debug] [--snapshot FILE]`
pub fn execute(cwd: &Path, config_path: Option<&Path>, args: &AdviseArgs) -> anyhow::Result<ExitCode> {
    advise(cwd, config_path, args).map(ExitCode::from)
}

/// Print the advice and return the exit status.
fn advise(cwd: &Path, config_path: Option<&Path>, args: &AdviseArgs) -> anyhow::Result<u8> {
    let (config, source) = Config::load(config_path, cwd)?;
    tracing::debug!(%source, "configuration");

    let snapshot = match &args.snapshot {
        Some(path) => read_snapshot(path)?,
        None => {
            let settings = CollectSettings::from_config(&config)?;
            collect(cwd, &settings)?
        }
    };

    if args.debug {
        eprintln!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    let advice = config.advisor().advise(&snapshot);

    let output = if args.json {
        render::format_json(&advice)?
    } else if args.compact {
        render::format_compact(&advice)
    } else {
        render::format_human(&advice, &snapshot, args.all)
    };
    println!("{}", output.trim_end());

    Ok(exit_status(&Summary::of(&advice)))
}

/// 1 while any advice is active.
fn exit_status(summary: &Summary) -> u8 {
    u8::from(!summary.is_clean())
}

fn read_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading snapshot from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    parse_snapshot(&content)
}

fn parse_snapshot(json: &str) -> anyhow::Result<Snapshot> {
    serde_json::from_str(json).context("invalid snapshot JSON")
}
