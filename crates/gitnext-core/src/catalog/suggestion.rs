//! Priority 10–29: mild suggestions.

use crate::rule::RuleDefinition;

pub(super) fn rules() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition::new(
            "R052",
            25,
            "git commit --amend",
            "Commit message quality warning - Git logs are for humans, allegedly",
            |s| s.poor_commit_message,
        ),
        RuleDefinition::new(
            "R053",
            23,
            "git commit --amend",
            "Amend last commit suggested - you knew this already",
            |s| s.amend_suggested,
        ),
        RuleDefinition::new(
            "R054",
            21,
            "git push --tags",
            "Unpushed local tags - Schrödinger's release",
            |s| s.unpushed_local_tags,
        ),
        RuleDefinition::new(
            "R007",
            20,
            "git add <files>",
            "Untracked files present",
            |s| s.untracked_files > 0,
        ),
        RuleDefinition::new(
            "R055",
            18,
            "git stash pop OR git stash clear",
            "Stash stack growing - you're hoarding unfinished thoughts",
            |s| s.stash_stack_growing,
        ),
        RuleDefinition::new(
            "R008",
            15,
            "git stash pop",
            "Stash exists - consider applying",
            |s| s.has_stash,
        ),
    ]
}
