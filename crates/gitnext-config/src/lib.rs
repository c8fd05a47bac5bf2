//! Configuration for git-next.
//!
//! Lookup order: an explicit `--config` path, then `.git-next.yaml` in the
//! working directory, then `~/.config/git-next/config.yaml`, then built-in
//! defaults. Whatever is found is merged with the defaults before use.

mod error;
mod protected;

pub use error::ConfigError;
pub use protected::ProtectedBranches;

use gitnext_core::catalog::{DEFAULT_REBASE_MIN_COMMITS, DEFAULT_SOFT_RESET_MAX_COMMITS};
use gitnext_core::settings::ParamStore;
use gitnext_core::{
    Advisor, ParamValue, RuleCatalog, RuleSettings, SuppressionResolver, SuppressionTable,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".git-next.yaml";

pub const DEFAULT_PROTECTED_BRANCHES: [&str; 4] = ["main", "master", "develop", "production"];

/// Age in days after which a feature branch counts as long-lived.
pub const DEFAULT_BRANCH_MAX_DAYS: u32 = 14;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub protected_branches: Vec<String>,
    pub rules: RulesConfig,
    pub suppression: SuppressionConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub disabled: Vec<String>,
    pub parameters: ParamStore,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuppressionConfig {
    /// Extra suppression entries: command key → keys it suppresses.
    pub custom: BTreeMap<String, Vec<String>>,
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => f.write_str("(defaults)"),
        }
    }
}

impl Config {
    /// Built-in configuration.
    pub fn defaults() -> Self {
        let mut config = Config {
            protected_branches: DEFAULT_PROTECTED_BRANCHES.map(String::from).to_vec(),
            ..Default::default()
        };
        config.fill_default_parameters();
        config
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist and parse. Discovered files that fail to
    /// load are skipped with a warning.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<(Config, ConfigSource), ConfigError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            let config = Self::from_file(path)?;
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }

        let mut candidates = vec![cwd.join(LOCAL_CONFIG_FILE)];
        candidates.extend(user_config_path());
        Ok(Self::discover(&candidates))
    }

    /// First candidate that exists and loads, or the defaults.
    fn discover(candidates: &[PathBuf]) -> (Config, ConfigSource) {
        for path in candidates.iter().filter(|p| p.is_file()) {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "config loaded");
                    return (config, ConfigSource::File(path.clone()));
                }
                Err(e) => tracing::warn!("skipping config: {e}"),
            }
        }
        (Self::defaults(), ConfigSource::Defaults)
    }

    /// Read one YAML file and merge it with the defaults.
    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse YAML and merge with the defaults. An empty document is the
    /// default configuration.
    pub fn from_yaml(yaml: &str) -> Result<Config, serde_yaml::Error> {
        let mut config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.merge_with_defaults();
        Ok(config)
    }

    /// Fill anything left unset with its default.
    pub fn merge_with_defaults(&mut self) {
        if self.protected_branches.is_empty() {
            self.protected_branches = DEFAULT_PROTECTED_BRANCHES.map(String::from).to_vec();
        }
        self.fill_default_parameters();
    }

    fn fill_default_parameters(&mut self) {
        let defaults = [
            ("R020", "max_commits", DEFAULT_SOFT_RESET_MAX_COMMITS),
            ("R022", "min_commits", DEFAULT_REBASE_MIN_COMMITS),
            ("R048", "max_days", DEFAULT_BRANCH_MAX_DAYS),
        ];
        for (rule, name, value) in defaults {
            self.rules
                .parameters
                .entry(rule.to_string())
                .or_default()
                .entry(name.to_string())
                .or_insert(ParamValue::Int(i64::from(value)));
        }
    }

    /// The settings the rule catalog is built from.
    pub fn rule_settings(&self) -> RuleSettings {
        RuleSettings {
            protected_branches: self.protected_branches.clone(),
            disabled: self.rules.disabled.iter().cloned().collect(),
            parameters: self.rules.parameters.clone(),
        }
    }

    /// The standard suppression table plus any custom entries.
    pub fn suppression_table(&self) -> SuppressionTable {
        SuppressionTable::standard().extend(
            self.suppression
                .custom
                .iter()
                .map(|(key, targets)| (key, targets.iter().collect::<Vec<_>>())),
        )
    }

    /// Catalog and resolver built from this configuration.
    pub fn advisor(&self) -> Advisor {
        Advisor::new(
            RuleCatalog::new(&self.rule_settings()),
            SuppressionResolver::new(self.suppression_table()),
        )
    }

    pub fn protected(&self) -> Result<ProtectedBranches, ConfigError> {
        ProtectedBranches::new(self.protected_branches.as_slice())
    }

    /// Feature branch age threshold, in days.
    pub fn branch_max_days(&self) -> u32 {
        self.rule_settings()
            .count_param("R048", "max_days", DEFAULT_BRANCH_MAX_DAYS)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// `~/.config/git-next/config.yaml`, when a home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("git-next").join("config.yaml"))
}
