//! Priority 90 and above: the next command would hurt someone else.

use super::diverged;
use crate::rule::RuleDefinition;
use crate::snapshot::Snapshot;

pub(super) fn rules() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition::new(
            "R037",
            100,
            "# DO NOT git push --force on shared branches!",
            "Force-push to shared branch - this is how trust dies",
            |s| s.force_push_to_shared,
        ),
        RuleDefinition::new(
            "R038",
            100,
            "# DO NOT rewrite published tags!",
            "Rewrite published tags - releases are now folklore",
            |s| s.rewritten_published_tags,
        ),
        RuleDefinition::new(
            "R039",
            100,
            "# DO NOT reset on protected branches!",
            "Reset on protected branch - muscle memory is not a justification",
            |s| s.reset_on_protected_branch,
        ),
        RuleDefinition::new(
            "R040",
            100,
            "git submodule update --remote",
            "Submodule pointer rewrite without update - builds will fail creatively",
            |s| s.submodule_rewrite_no_update,
        ),
        RuleDefinition::new(
            "R041",
            100,
            "# Accidental history rewrite detected - you don't get to pretend this was fine",
            "Rebase or filter-branch after commits pulled by others",
            |s| s.accidental_history_rewrite,
        ),
        // Beats any reset suggestion: published history gets reverted.
        RuleDefinition::new(
            "R021",
            100,
            "git revert HEAD",
            "Last commit was pushed - use revert instead of reset",
            |s| s.last_commit_pushed,
        ),
        RuleDefinition::new(
            "R009",
            98,
            "git merge --continue OR git merge --abort",
            "Merge in progress - complete or abort",
            |s| s.merge_in_progress,
        ),
        RuleDefinition::new(
            "R010",
            97,
            "git rebase --continue OR git rebase --abort",
            "Rebase in progress - complete or abort",
            |s| s.rebase_in_progress,
        ),
        RuleDefinition::new(
            "R011",
            96,
            "git cherry-pick --continue OR git cherry-pick --abort",
            "Cherry-pick in progress - complete or abort",
            |s| s.cherry_pick_in_progress,
        ),
        RuleDefinition::new(
            "R001",
            95,
            "git checkout <branch>",
            "Detached HEAD detected - checkout a branch",
            |s| s.on_detached_head,
        ),
        RuleDefinition::new(
            "R032",
            90,
            "git merge origin/<branch>",
            "Diverged on protected branch - merge instead of rebase",
            diverged_on_protected,
        ),
    ]
}

fn diverged_on_protected(s: &Snapshot) -> bool {
    diverged(s) && s.on_protected_branch
}
