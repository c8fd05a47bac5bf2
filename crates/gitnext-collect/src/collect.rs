use crate::error::CollectError;
use crate::git::Git;
use crate::heuristics;
use crate::parse::{self, BranchHeader, SubmoduleEntry};
use gitnext_config::{Config, ConfigError, ProtectedBranches};
use gitnext_core::Snapshot;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// Files above this size are checked for binary content.
const LARGE_FILE_BYTES: u64 = 1024 * 1024;
/// `.git` size above which the repository counts as heavy.
const REPO_SIZE_WARN_MB: u64 = 100;
/// Branches untouched for longer than this are inactive.
const INACTIVE_BRANCH_DAYS: u32 = 90;
const STASH_COUNT_WARN: u32 = 3;
const STASH_STALE_DAYS: u32 = 7;

/// Inputs the collector takes from configuration.
#[derive(Debug, Clone)]
pub struct CollectSettings {
    pub protected: ProtectedBranches,
    /// Age in days past which a feature branch is long-lived.
    pub branch_max_days: u32,
}

impl CollectSettings {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            protected: config.protected()?,
            branch_max_days: config.branch_max_days(),
        })
    }
}

/// Read the state of the repository containing `repo`.
///
/// Only the repository check and `git status` are required to succeed. Every
/// other fact is best effort: when git cannot tell, the field keeps its
/// default.
pub fn collect(repo: &Path, settings: &CollectSettings) -> Result<Snapshot, CollectError> {
    let git = Git::new(repo);
    let git_dir = git.git_dir()?;
    let mut collector = Collector {
        git,
        git_dir,
        settings,
        now: OffsetDateTime::now_utc(),
        branch: None,
        snap: Snapshot::default(),
    };
    collector.run()?;
    Ok(collector.snap)
}

struct TagDivergence {
    /// Some tag points elsewhere on `origin`.
    rewritten: bool,
    /// Tags `origin` does not have.
    missing: Vec<String>,
}

struct Collector<'a> {
    git: Git<'a>,
    git_dir: PathBuf,
    settings: &'a CollectSettings,
    now: OffsetDateTime,
    branch: Option<String>,
    snap: Snapshot,
}

impl Collector<'_> {
    fn run(&mut self) -> Result<(), CollectError> {
        self.working_tree()?;
        self.head();
        self.push_state();
        self.operations();
        self.branch_health();
        self.stash();

        let tags = self.tag_divergence();
        let submodules = self.submodules();
        self.dangerous(tags.as_ref(), &submodules);
        self.integrity(submodules);
        self.workflow();
        self.suggestions(tags);
        self.informational();
        Ok(())
    }

    fn subject(&self) -> Option<String> {
        self.git.line(&["log", "-1", "--format=%s"])
    }

    fn reflog(&self, count: usize) -> Vec<String> {
        let n = format!("-{count}");
        self.git
            .try_run(&["reflog", n.as_str(), "--format=%gs"])
            .map(|out| out.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Some remote-tracking branch contains `rev`.
    fn on_remote(&self, rev: &str) -> bool {
        self.git
            .line(&["branch", "-r", "--contains", rev])
            .is_some()
    }

    /// The tip before the last rebase was published and is no longer in
    /// the history of HEAD.
    fn published_tip_dropped(&self) -> bool {
        self.git.succeeds(&["rev-parse", "--verify", "-q", "ORIG_HEAD"])
            && self.on_remote("ORIG_HEAD")
            && !self.git.succeeds(&["merge-base", "--is-ancestor", "ORIG_HEAD", "HEAD"])
    }

    // ── Working tree and branch ─────────────────────────────────────

    fn working_tree(&mut self) -> Result<(), CollectError> {
        let out = self.git.run(&["status", "--porcelain", "--branch"])?;
        let tree = parse::parse_porcelain_status(&out);
        let header = out
            .lines()
            .next()
            .and_then(parse::parse_branch_header)
            .unwrap_or_default();

        let s = &mut self.snap;
        s.staged_files = tree.staged;
        s.modified_files = tree.modified;
        s.untracked_files = tree.untracked;
        s.dirty = tree.is_dirty();
        s.ahead = header.ahead;
        s.behind = header.behind;

        let BranchHeader {
            branch,
            upstream,
            gone,
            ..
        } = header;
        if gone {
            if let Some(name) = branch.as_ref() {
                s.gone_branches.push(name.clone());
            }
        }
        s.no_upstream = upstream.is_none();
        self.branch = branch;
        Ok(())
    }

    fn head(&mut self) {
        let detached = !self.git.succeeds(&["symbolic-ref", "-q", "HEAD"]);
        self.snap.on_detached_head = detached;
        if detached {
            self.branch = None;
        }
        self.snap.on_protected_branch = self
            .branch
            .as_deref()
            .is_some_and(|b| self.settings.protected.matches(b));
    }

    fn push_state(&mut self) {
        if self.snap.on_detached_head {
            self.snap.no_upstream = false;
            return;
        }
        if self.snap.no_upstream || !self.git.succeeds(&["rev-parse", "--verify", "-q", "@{u}"]) {
            return;
        }
        self.snap.commit_count_since_push = self
            .git
            .line(&["rev-list", "--count", "@{u}..HEAD"])
            .and_then(|n| n.parse().ok())
            .unwrap_or(0);
        // Only matters while there are changes that could be folded into it.
        let pending = self.snap.staged_files > 0 || self.snap.modified_files > 0;
        self.snap.last_commit_pushed = pending && self.on_remote("HEAD");
    }

    fn operations(&mut self) {
        let dir = &self.git_dir;
        self.snap.merge_in_progress = dir.join("MERGE_HEAD").is_file();
        self.snap.rebase_in_progress =
            dir.join("rebase-merge").is_dir() || dir.join("rebase-apply").is_dir();
        self.snap.cherry_pick_in_progress = dir.join("CHERRY_PICK_HEAD").is_file();
    }

    fn branch_health(&mut self) {
        if self.snap.on_detached_head {
            return;
        }
        if let Some(out) = self.git.try_run(&["branch", "--merged"]) {
            self.snap.merged_branches =
                parse::parse_merged_branches(&out, self.branch.as_deref(), &self.settings.protected);
        }
        if let Some(out) = self.git.try_run(&["branch", "-vv"]) {
            for name in parse::parse_gone_branches(&out) {
                if !self.snap.gone_branches.contains(&name) {
                    self.snap.gone_branches.push(name);
                }
            }
        }
    }

    fn stash(&mut self) {
        let stamps = self
            .git
            .try_run(&["stash", "list", "--format=%ct"])
            .map(|out| parse::parse_timestamps(&out))
            .unwrap_or_default();
        let count = u32::try_from(stamps.len()).unwrap_or(u32::MAX);
        self.snap.has_stash = count > 0;
        self.snap.stash_count = count;
        if let Some(oldest) = stamps.iter().min() {
            self.snap.oldest_stash_age_days =
                heuristics::age_days(*oldest, self.now).unwrap_or(0);
        }

        if count > STASH_COUNT_WARN {
            let newest_age = stamps
                .iter()
                .max()
                .and_then(|ts| heuristics::age_days(*ts, self.now));
            self.snap.stash_stack_growing = newest_age.is_some_and(|d| d > STASH_STALE_DAYS);
        }
    }

    // ── Dangerous ───────────────────────────────────────────────────

    fn dangerous(&mut self, tags: Option<&TagDivergence>, submodules: &[SubmoduleEntry]) {
        let reflog = self.reflog(10);

        if self.snap.on_protected_branch {
            // The commit replaced by the last rewrite was already published.
            let rewritten = reflog.first().is_some_and(|s| heuristics::reflog_shows_rewrite(s));
            self.snap.force_push_to_shared =
                rewritten && self.on_remote("HEAD@{1}") && !self.on_remote("HEAD");

            self.snap.reset_on_protected_branch = reflog
                .iter()
                .take(5)
                .any(|s| heuristics::reflog_shows_reset(s));
        }

        // A rebase or filter-branch rewrote commits the upstream already has.
        self.snap.accidental_history_rewrite = self.snap.ahead > 0
            && self.snap.behind > 0
            && reflog
                .iter()
                .any(|s| s.contains("rebase") || s.contains("filter-branch"))
            && self.published_tip_dropped();

        self.snap.rewritten_published_tags = tags.is_some_and(|t| t.rewritten);
        self.snap.submodule_rewrite_no_update = submodules.iter().any(|m| m.state == '+');
    }

    /// Local tags compared with `origin`. `None` without local tags or
    /// without a reachable `origin`.
    fn tag_divergence(&self) -> Option<TagDivergence> {
        let local = parse::parse_tag_refs(&self.git.try_run(&["show-ref", "--tags"])?);
        if local.is_empty() {
            return None;
        }
        let remote = parse::parse_tag_refs(&self.git.try_run(&["ls-remote", "--tags", "origin"])?);

        let mut rewritten = false;
        let mut missing = Vec::new();
        for (name, oid) in &local {
            match remote.get(name) {
                Some(remote_oid) if remote_oid != oid => rewritten = true,
                Some(_) => {}
                None => missing.push(name.clone()),
            }
        }
        Some(TagDivergence { rewritten, missing })
    }

    fn submodules(&self) -> Vec<SubmoduleEntry> {
        if !self.git.repo().join(".gitmodules").is_file() {
            return Vec::new();
        }
        self.git
            .try_run(&["submodule", "status"])
            .map(|out| parse::parse_submodule_status(&out))
            .unwrap_or_default()
    }

    // ── Integrity ───────────────────────────────────────────────────

    fn integrity(&mut self, submodules: Vec<SubmoduleEntry>) {
        let toplevel = self
            .git
            .line(&["rev-parse", "--show-toplevel"])
            .map(PathBuf::from);

        if let Some(root) = toplevel.as_deref() {
            self.snap.conflicted_files = self.conflicted_staged(root);
            self.snap.conflicted_files_staged = !self.snap.conflicted_files.is_empty();

            self.snap.large_binary_files = self.large_binaries(root);
            self.snap.large_binaries_without_lfs = !self.snap.large_binary_files.is_empty();
        }

        self.snap.line_ending_conflict = self
            .git
            .combined(&["status"])
            .is_some_and(|text| heuristics::has_line_ending_warning(&text));

        for module in submodules.into_iter().filter(|m| m.state == ' ') {
            let path = self.git.repo().join(&module.path);
            let detached = !Git::new(&path).succeeds(&["symbolic-ref", "-q", "HEAD"]);
            if detached {
                self.snap.submodule_detached_head = true;
                self.snap.submodule_name = module.path;
                break;
            }
        }

        if self.git_dir.join("shallow").is_file() {
            self.snap.shallow_clone_history_ops = self
                .reflog(5)
                .iter()
                .any(|s| heuristics::reflog_shows_history_op(s));
        }
    }

    fn staged_paths(&self, filter: &str) -> Vec<String> {
        self.git
            .try_run(&["diff", "--cached", "--name-only", filter])
            .map(|out| out.lines().filter(|l| !l.is_empty()).map(String::from).collect())
            .unwrap_or_default()
    }

    fn conflicted_staged(&self, root: &Path) -> Vec<String> {
        self.staged_paths("--diff-filter=ACMR")
            .into_iter()
            .filter(|file| {
                fs::read(root.join(file))
                    .is_ok_and(|bytes| heuristics::has_conflict_markers(&String::from_utf8_lossy(&bytes)))
            })
            .collect()
    }

    fn large_binaries(&self, root: &Path) -> Vec<String> {
        self.staged_paths("--diff-filter=AM")
            .into_iter()
            .filter(|file| {
                let path = root.join(file);
                let large = fs::metadata(&path).is_ok_and(|m| m.len() > LARGE_FILE_BYTES);
                large && sniff_binary(&path) && !self.lfs_tracked(file)
            })
            .collect()
    }

    fn lfs_tracked(&self, file: &str) -> bool {
        self.git
            .line(&["check-attr", "filter", "--", file])
            .is_some_and(|out| out.ends_with(": filter: lfs"))
    }

    // ── Workflow ────────────────────────────────────────────────────

    fn workflow(&mut self) {
        let subject = self.subject();
        self.snap.has_merge_commits = self
            .git
            .line(&["log", "--merges", "--oneline", "-n", "10"])
            .is_some();

        if self.snap.on_protected_branch {
            self.snap.work_on_protected_branch = self.snap.ahead > 0
                && subject.as_deref().is_some_and(|s| !heuristics::is_merge_subject(s));

            if let Some(s) = subject.as_deref().filter(|s| heuristics::is_wip_subject(s)) {
                self.snap.wip_commit_on_shared = true;
                self.snap.wip_commit_message = s.to_string();
            }
        } else {
            if !self.snap.on_detached_head {
                self.long_lived_branch();
            }
            self.snap.rebase_instead_of_merge = self
                .git
                .line(&["log", "-1", "--format=%p"])
                .is_some_and(|parents| parents.split_whitespace().count() > 1);
        }

        if self.snap.ahead > 0 {
            let noisy = self
                .git
                .try_run(&["log", "--format=%s", "@{u}..HEAD"])
                .and_then(|out| heuristics::squash_candidates(out.lines()));
            if let Some(count) = noisy {
                self.snap.squash_recommended = true;
                self.snap.noisy_commit_count = count;
            }
        }
    }

    fn long_lived_branch(&mut self) {
        if self.branch.is_none() || self.snap.behind == 0 {
            return;
        }
        // Fork point against the first protected branch present on origin.
        let Some(base) = self
            .settings
            .protected
            .patterns()
            .iter()
            .filter(|p| !p.contains(['*', '?', '[', '{']))
            .find_map(|p| {
                let upstream = format!("origin/{p}");
                self.git.line(&["merge-base", "HEAD", upstream.as_str()])
            })
        else {
            return;
        };
        let age = self
            .git
            .line(&["log", "-1", "--format=%ct", base.as_str()])
            .and_then(|ts| ts.parse().ok())
            .and_then(|ts| heuristics::age_days(ts, self.now));

        if let Some(days) = age.filter(|d| *d > self.settings.branch_max_days) {
            self.snap.long_lived_feature_branch = true;
            self.snap.feature_branch_age_days = days;
        }
    }

    // ── Suggestions ─────────────────────────────────────────────────

    fn suggestions(&mut self, tags: Option<TagDivergence>) {
        if self.snap.staged_files > 0 || self.snap.ahead > 0 {
            if let Some(subject) = self.subject() {
                self.snap.poor_commit_message = heuristics::is_poor_subject(&subject);
                self.snap.last_commit_message = subject;
            }
        }

        if self.snap.ahead >= 2 && self.snap.staged_files > 0 {
            let stamps = self
                .git
                .try_run(&["log", "-2", "--format=%ct"])
                .map(|out| parse::parse_timestamps(&out))
                .unwrap_or_default();
            if let &[newer, older] = stamps.as_slice() {
                self.snap.amend_suggested = heuristics::within_amend_window(newer, older);
            }
        }

        if let Some(tags) = tags {
            self.snap.unpushed_local_tags = !tags.missing.is_empty();
            self.snap.unpushed_tags = tags.missing;
        }
    }

    // ── Informational ───────────────────────────────────────────────

    fn informational(&mut self) {
        let size_mb = dir_size(&self.git_dir) / 1024 / 1024;
        self.snap.repo_size_mb = size_mb;
        self.snap.repo_size_growing_fast = size_mb > REPO_SIZE_WARN_MB;

        if let Some(out) = self.git.try_run(&[
            "for-each-ref",
            "--format=%(refname:short) %(committerdate:unix)",
            "refs/heads",
        ]) {
            self.snap.inactive_branches = parse::parse_ref_times(&out)
                .into_iter()
                .filter(|(name, _)| Some(name.as_str()) != self.branch.as_deref())
                .filter(|(_, ts)| {
                    heuristics::age_days(*ts, self.now).is_some_and(|d| d > INACTIVE_BRANCH_DAYS)
                })
                .map(|(name, _)| name)
                .collect();
        }

        self.snap.on_detached_head_clean = self.snap.on_detached_head && !self.snap.dirty;
    }
}

fn sniff_binary(path: &Path) -> bool {
    let mut head = [0u8; heuristics::BINARY_SNIFF_BYTES];
    let Ok(mut file) = fs::File::open(path) else {
        return false;
    };
    let n = file.read(&mut head).unwrap_or(0);
    heuristics::looks_binary(&head[..n])
}

/// Total size of the files under `dir`; unreadable entries count as 0.
fn dir_size(dir: &Path) -> u64 {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .map(|entry| match entry.file_type() {
            Ok(t) if t.is_dir() => dir_size(&entry.path()),
            Ok(t) if t.is_file() => entry.metadata().map(|m| m.len()).unwrap_or(0),
            _ => 0,
        })
        .sum()
}
