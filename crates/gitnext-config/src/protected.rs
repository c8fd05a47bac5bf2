use crate::error::ConfigError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Matcher over the configured protected branch names.
///
/// Entries are glob patterns; a plain name only matches itself. `*` does not
/// cross `/`, so `release/*` matches `release/1.2` but not `release/1.2/hotfix`.
#[derive(Debug, Clone)]
pub struct ProtectedBranches {
    patterns: Vec<String>,
    set: GlobSet,
}

impl ProtectedBranches {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|source| ConfigError::InvalidPattern {
            pattern: patterns
                .iter()
                .map(|p| p.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
            source,
        })?;

        Ok(Self {
            patterns: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
            set,
        })
    }

    pub fn matches(&self, branch: &str) -> bool {
        !branch.is_empty() && self.set.is_match(branch)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_match_exactly() {
        let protected = ProtectedBranches::new(&["main", "develop"]).unwrap();
        assert!(protected.matches("main"));
        assert!(protected.matches("develop"));
        assert!(!protected.matches("main2"));
        assert!(!protected.matches("feature/main"));
        assert!(!protected.matches(""));
    }

    #[test]
    fn globs_stay_within_one_segment() {
        let protected = ProtectedBranches::new(&["release/*"]).unwrap();
        assert!(protected.matches("release/1.2"));
        assert!(!protected.matches("release/1.2/hotfix"));
        assert!(!protected.matches("release"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = ProtectedBranches::new(&["main", "feat/[oops"]).unwrap_err();
        match err {
            ConfigError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "feat/[oops"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_list_matches_nothing() {
        let protected = ProtectedBranches::new::<&str>(&[]).unwrap();
        assert!(!protected.matches("main"));
        assert!(protected.patterns().is_empty());
    }
}
