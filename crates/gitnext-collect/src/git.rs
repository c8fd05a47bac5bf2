use crate::error::CollectError;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Read-only git invocations rooted at one repository.
pub(crate) struct Git<'a> {
    repo: &'a Path,
}

impl<'a> Git<'a> {
    pub(crate) fn new(repo: &'a Path) -> Self {
        Self { repo }
    }

    fn output(&self, args: &[&str]) -> Result<Output, CollectError> {
        tracing::debug!(args = %args.join(" "), "git");
        let output = Command::new("git")
            .args(args)
            .current_dir(self.repo)
            // Stable English output, and no index refresh writes.
            .env("LC_ALL", "C")
            .env("GIT_OPTIONAL_LOCKS", "0")
            .output()?;
        Ok(output)
    }

    /// Stdout of a command that must succeed.
    pub(crate) fn run(&self, args: &[&str]) -> Result<String, CollectError> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(CollectError::Git {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Stdout, or `None` when the command fails for any reason.
    pub(crate) fn try_run(&self, args: &[&str]) -> Option<String> {
        match self.run(args) {
            Ok(out) => Some(out),
            Err(e) => {
                tracing::debug!("ignored: {e}");
                None
            }
        }
    }

    /// Trimmed stdout, `None` on failure or empty output.
    pub(crate) fn line(&self, args: &[&str]) -> Option<String> {
        self.try_run(args)
            .map(|out| out.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub(crate) fn succeeds(&self, args: &[&str]) -> bool {
        self.output(args).is_ok_and(|o| o.status.success())
    }

    /// Stdout and stderr together, whatever the exit status.
    pub(crate) fn combined(&self, args: &[&str]) -> Option<String> {
        let output = self.output(args).ok()?;
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Some(text)
    }

    /// Absolute path of the `.git` directory.
    pub(crate) fn git_dir(&self) -> Result<PathBuf, CollectError> {
        let out = self
            .run(&["rev-parse", "--absolute-git-dir"])
            .map_err(|e| match e {
                CollectError::Git { .. } => CollectError::NotARepository {
                    path: self.repo.to_path_buf(),
                },
                other => other,
            })?;
        Ok(PathBuf::from(out.trim()))
    }

    pub(crate) fn repo(&self) -> &Path {
        self.repo
    }
}
