//! Priority 30–59: everyday hygiene. The only tier with tunable thresholds.

use crate::rule::RuleDefinition;
use crate::settings::RuleSettings;

/// Default upper bound of unpushed commits for a soft reset (R020).
pub const DEFAULT_SOFT_RESET_MAX_COMMITS: u32 = 3;
/// Default lower bound of unpushed commits for interactive rebase (R022).
pub const DEFAULT_REBASE_MIN_COMMITS: u32 = 4;

pub(super) fn rules(settings: &RuleSettings) -> Vec<RuleDefinition> {
    let max_commits =
        settings.count_param("R020", "max_commits", DEFAULT_SOFT_RESET_MAX_COMMITS);
    let min_commits = settings.count_param("R022", "min_commits", DEFAULT_REBASE_MIN_COMMITS);

    vec![
        RuleDefinition::new(
            "R047",
            58,
            "git checkout -b feature/<name>",
            "Work on main instead of feature branch - you skipped the whole process part",
            |s| s.work_on_protected_branch,
        ),
        RuleDefinition::new(
            "R048",
            56,
            "git merge main (or rebase)",
            "Long-lived feature branch - merge debt accumulating interest",
            |s| s.long_lived_feature_branch,
        ),
        RuleDefinition::new(
            "R005",
            55,
            "git pull",
            "Behind remote and clean - pull updates",
            |s| s.behind > 0 && !s.dirty,
        ),
        RuleDefinition::new(
            "R049",
            52,
            "git rebase -i HEAD~N",
            "Squash recommended before merge - many noisy commits",
            |s| s.squash_recommended,
        ),
        RuleDefinition::new(
            "R050",
            51,
            "git commit --amend",
            "WIP commit on shared branch - this is not your personal notebook",
            |s| s.wip_commit_on_shared,
        ),
        RuleDefinition::new(
            "R051",
            50,
            "git rebase main",
            "Rebase recommended instead of merge - keep linear history",
            |s| s.rebase_instead_of_merge,
        ),
        RuleDefinition::new(
            "R004",
            50,
            "git push",
            "Local commits ready to push",
            |s| s.ahead > 0 && s.behind == 0 && !s.dirty,
        ),
        RuleDefinition::new(
            "R030",
            48,
            "git pull --ff-only",
            "Can fast-forward - safe to pull",
            |s| s.behind > 0 && s.ahead == 0 && !s.dirty,
        ),
        RuleDefinition::new(
            "R020",
            45,
            "git reset --soft HEAD~N",
            "Local commits can be soft reset",
            move |s| {
                !s.last_commit_pushed
                    && s.commit_count_since_push > 0
                    && s.commit_count_since_push <= max_commits
            },
        ),
        RuleDefinition::new(
            "R022",
            42,
            "git rebase -i HEAD~N",
            "Too many local commits - use interactive rebase",
            move |s| !s.last_commit_pushed && s.commit_count_since_push >= min_commits,
        ),
        RuleDefinition::new(
            "R003",
            38,
            "git commit",
            "Staged files waiting for commit",
            |s| s.staged_files > 0,
        ),
        RuleDefinition::new(
            "R002",
            35,
            "git add <files> && git commit",
            "Modified files not staged",
            |s| s.modified_files > 0 && s.staged_files == 0,
        ),
    ]
}
