use clap::Subcommand;
use gitnext_config::Config;
use std::path::Path;

// ── CLI Schema ──

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Print the resolved configuration as YAML
    Show,
    /// Print which configuration file is in use
    Path,
}

// ── Dispatch ──

pub fn run(cmd: ConfigCmd, cwd: &Path, config_path: Option<&Path>) -> anyhow::Result<()> {
    let (config, source) = Config::load(config_path, cwd)?;
    match cmd {
        ConfigCmd::Show => print!("{}", config.to_yaml()?),
        ConfigCmd::Path => println!("{source}"),
    }
    Ok(())
}
