use serde::{Deserialize, Serialize};

/// Point-in-time facts about a repository.
///
/// Every field is computed independently by the collector. Cross-field logic
/// (e.g. "behind and clean") belongs in rule predicates, never here. All
/// fields default to false/zero/empty, so a partial JSON document is a valid
/// snapshot and a missing fact reads as "condition false".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    // ── Working tree ──
    pub dirty: bool,
    pub staged_files: u32,
    pub modified_files: u32,
    pub untracked_files: u32,

    // ── Remote relationship ──
    pub ahead: u32,
    pub behind: u32,
    pub no_upstream: bool,
    pub last_commit_pushed: bool,
    pub commit_count_since_push: u32,

    // ── Branch classification ──
    pub on_protected_branch: bool,
    pub on_detached_head: bool,
    /// Detached HEAD with a clean working tree.
    pub on_detached_head_clean: bool,

    // ── In-progress operations ──
    pub merge_in_progress: bool,
    pub rebase_in_progress: bool,
    pub cherry_pick_in_progress: bool,

    // ── History shape ──
    pub has_merge_commits: bool,

    // ── Hygiene sets (discovery order) ──
    pub merged_branches: Vec<String>,
    pub gone_branches: Vec<String>,
    pub inactive_branches: Vec<String>,

    // ── Danger flags ──
    pub force_push_to_shared: bool,
    pub rewritten_published_tags: bool,
    pub reset_on_protected_branch: bool,
    pub submodule_rewrite_no_update: bool,
    pub accidental_history_rewrite: bool,

    // ── Integrity ──
    pub conflicted_files_staged: bool,
    pub conflicted_files: Vec<String>,
    pub large_binaries_without_lfs: bool,
    pub large_binary_files: Vec<String>,
    pub line_ending_conflict: bool,
    pub submodule_detached_head: bool,
    pub submodule_name: String,
    pub shallow_clone_history_ops: bool,

    // ── Workflow ──
    pub work_on_protected_branch: bool,
    pub long_lived_feature_branch: bool,
    pub feature_branch_age_days: u32,
    pub squash_recommended: bool,
    pub noisy_commit_count: u32,
    pub wip_commit_on_shared: bool,
    pub wip_commit_message: String,
    pub rebase_instead_of_merge: bool,

    // ── Low severity ──
    pub poor_commit_message: bool,
    pub last_commit_message: String,
    pub amend_suggested: bool,
    pub unpushed_local_tags: bool,
    pub unpushed_tags: Vec<String>,
    pub has_stash: bool,
    pub stash_stack_growing: bool,
    pub stash_count: u32,
    pub oldest_stash_age_days: u32,
    pub repo_size_growing_fast: bool,
    pub repo_size_mb: u64,
}
