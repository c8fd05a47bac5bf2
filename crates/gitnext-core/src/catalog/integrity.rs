//! Priority 60–89: the repository itself is in a questionable shape.

use super::diverged;
use crate::rule::RuleDefinition;

pub(super) fn rules() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition::new(
            "R042",
            89,
            "# Remove conflict markers from files before committing",
            "Conflicted files staged - if <<<<<<< is in the diff, stop pretending",
            |s| s.conflicted_files_staged,
        ),
        RuleDefinition::new(
            "R043",
            85,
            "git lfs track <pattern> && git add .gitattributes",
            "Binary files changed without LFS - Git is not a landfill",
            |s| s.large_binaries_without_lfs,
        ),
        RuleDefinition::new(
            "R044",
            82,
            "git config core.autocrlf true (or false)",
            "Line ending normalization conflict - someone's editor declared war",
            |s| s.line_ending_conflict,
        ),
        RuleDefinition::new(
            "R045",
            81,
            "cd <submodule> && git checkout <branch>",
            "Submodule detached HEAD - time capsule mode engaged",
            |s| s.submodule_detached_head,
        ),
        RuleDefinition::new(
            "R046",
            80,
            "git fetch --unshallow",
            "Shallow clone doing history ops - Git will lie to you politely",
            |s| s.shallow_clone_history_ops,
        ),
        RuleDefinition::new(
            "R006",
            80,
            "git rebase origin/<branch> OR git merge origin/<branch>",
            "Branch has diverged - need to sync",
            diverged,
        ),
        RuleDefinition::new(
            "R034",
            75,
            "git branch --set-upstream-to=origin/<branch>",
            "No upstream configured for current branch",
            |s| s.no_upstream && !s.on_detached_head,
        ),
        RuleDefinition::new(
            "R031",
            70,
            "git rebase origin/<branch>",
            "Feature branch diverged - rebase to keep linear history",
            |s| diverged(s) && !s.on_protected_branch,
        ),
        RuleDefinition::new(
            "R035",
            65,
            "git branch -d <branch>",
            "Merged branches ready for cleanup",
            |s| !s.merged_branches.is_empty(),
        ),
        RuleDefinition::new(
            "R036",
            62,
            "git branch -d <branch>",
            "Gone remote branches - local cleanup needed",
            |s| !s.gone_branches.is_empty(),
        ),
        RuleDefinition::new(
            "R033",
            60,
            "git merge origin/<branch>",
            "Existing merge commits detected - continue with merge",
            |s| s.has_merge_commits && s.behind > 0,
        ),
    ]
}
