//! Pure parsers for git command output.

use gitnext_config::ProtectedBranches;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static BRANCH_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^## (?P<head>.+?)(?:\.\.\.(?P<upstream>\S+))?(?: \[(?P<track>[^\]]*)\])?$").unwrap()
});
static AHEAD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"ahead (\d+)").unwrap());
static BEHIND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"behind (\d+)").unwrap());

/// File counts from `git status --porcelain`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkingTree {
    pub staged: u32,
    pub modified: u32,
    pub untracked: u32,
}

impl WorkingTree {
    pub fn is_dirty(&self) -> bool {
        self.staged > 0 || self.modified > 0 || self.untracked > 0
    }
}

/// Count staged, unstaged-modified and untracked entries. Branch header
/// lines and ignored entries are skipped.
pub fn parse_porcelain_status(output: &str) -> WorkingTree {
    let mut tree = WorkingTree::default();
    for line in output.lines() {
        if line.starts_with("## ") {
            continue;
        }
        let mut chars = line.chars();
        let (Some(index), Some(worktree)) = (chars.next(), chars.next()) else {
            continue;
        };
        match (index, worktree) {
            ('?', '?') => tree.untracked += 1,
            ('!', '!') => {}
            _ => {
                if index != ' ' {
                    tree.staged += 1;
                }
                if matches!(worktree, 'M' | 'D') {
                    tree.modified += 1;
                }
            }
        }
    }
    tree
}

/// The `## ...` line of `git status --porcelain --branch`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchHeader {
    /// `None` when HEAD is detached.
    pub branch: Option<String>,
    pub upstream: Option<String>,
    pub ahead: u32,
    pub behind: u32,
    /// The configured upstream no longer exists.
    pub gone: bool,
}

pub fn parse_branch_header(line: &str) -> Option<BranchHeader> {
    let caps = BRANCH_HEADER.captures(line.trim_end())?;
    let head = &caps["head"];

    let branch = if head.starts_with("HEAD (no branch)") {
        None
    } else if let Some(name) = head
        .strip_prefix("No commits yet on ")
        .or_else(|| head.strip_prefix("Initial commit on "))
    {
        Some(name.to_string())
    } else {
        Some(head.to_string())
    };

    let track = caps.name("track").map(|m| m.as_str()).unwrap_or_default();
    let count = |re: &Regex| {
        re.captures(track)
            .and_then(|c| c[1].parse().ok())
            .unwrap_or(0)
    };

    Some(BranchHeader {
        branch,
        upstream: caps.name("upstream").map(|m| m.as_str().to_string()),
        ahead: count(&AHEAD),
        behind: count(&BEHIND),
        gone: track == "gone",
    })
}

/// Branch names from `git branch --merged`, minus the current branch and
/// protected ones.
pub fn parse_merged_branches(
    output: &str,
    current: Option<&str>,
    protected: &ProtectedBranches,
) -> Vec<String> {
    output
        .lines()
        .filter_map(branch_list_name)
        .filter(|name| Some(*name) != current && !protected.matches(name))
        .map(String::from)
        .collect()
}

/// Branches whose upstream is marked `: gone]` in `git branch -vv`.
pub fn parse_gone_branches(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.contains(": gone]"))
        .filter_map(branch_list_name)
        .map(String::from)
        .collect()
}

/// Name column of a `git branch` listing line (`* main`, `  feat/x  abc123 ...`).
fn branch_list_name(line: &str) -> Option<&str> {
    let line = line.trim_start();
    let line = line
        .strip_prefix('*')
        .or_else(|| line.strip_prefix('+'))
        .unwrap_or(line);
    let name = line.split_whitespace().next()?;
    // `(HEAD detached at abc123)` is not a branch.
    (!name.starts_with('(')).then_some(name)
}

/// One line of `git submodule status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleEntry {
    /// ` ` in sync, `+` checkout differs from the recorded commit,
    /// `-` not initialized, `U` conflicted.
    pub state: char,
    pub path: String,
}

pub fn parse_submodule_status(output: &str) -> Vec<SubmoduleEntry> {
    output
        .lines()
        .filter_map(|line| {
            let state = line.chars().next()?;
            let mut fields = line[state.len_utf8()..].split_whitespace();
            let _sha = fields.next()?;
            let path = fields.next()?;
            Some(SubmoduleEntry {
                state,
                path: path.to_string(),
            })
        })
        .collect()
}

/// Tag name → object id, from `git show-ref --tags` or
/// `git ls-remote --tags`. Peeled `^{}` entries are skipped.
pub fn parse_tag_refs(output: &str) -> BTreeMap<String, String> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let oid = fields.next()?;
            let name = fields.next()?.strip_prefix("refs/tags/")?;
            if name.ends_with("^{}") {
                return None;
            }
            Some((name.to_string(), oid.to_string()))
        })
        .collect()
}

/// `<name> <unix-time>` pairs, as printed by
/// `git for-each-ref --format='%(refname:short) %(committerdate:unix)'`.
pub fn parse_ref_times(output: &str) -> Vec<(String, i64)> {
    output
        .lines()
        .filter_map(|line| {
            let (name, ts) = line.trim().rsplit_once(' ')?;
            Some((name.to_string(), ts.parse().ok()?))
        })
        .collect()
}

/// One unix timestamp per line; unparsable lines are dropped.
pub fn parse_timestamps(output: &str) -> Vec<i64> {
    output
        .lines()
        .filter_map(|line| line.trim().parse().ok())
        .collect()
}
