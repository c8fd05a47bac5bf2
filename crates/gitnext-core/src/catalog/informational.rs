use crate::rule::RuleDefinition;

pub(super) fn rules() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition::new(
            "R056",
            9,
            "git gc --aggressive",
            "Repo size growing unusually fast - just so you're aware",
            |s| s.repo_size_growing_fast,
        ),
        RuleDefinition::new(
            "R057",
            8,
            "git branch -d <branch>",
            "Inactive branches detected - archaeology opportunity",
            |s| !s.inactive_branches.is_empty(),
        ),
        RuleDefinition::new(
            "R058",
            5,
            "git checkout <branch>",
            "Detached HEAD but clean - nothing wrong, just vibes",
            |s| s.on_detached_head_clean,
        ),
    ]
}
