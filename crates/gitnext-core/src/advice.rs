use crate::rule::{RuleDefinition, Tier};
use serde::Serialize;

/// Placeholders that may appear in a command template. Consumers resolve them
/// before executing anything.
pub mod placeholder {
    pub const BRANCH: &str = "<branch>";
    pub const FILES: &str = "<files>";
    pub const PATTERN: &str = "<pattern>";
    pub const SUBMODULE: &str = "<submodule>";
    pub const NAME: &str = "<name>";
    pub const COMMIT_COUNT: &str = "HEAD~N";

    pub const ALL: [&str; 6] = [BRANCH, FILES, PATTERN, SUBMODULE, NAME, COMMIT_COUNT];
}

/// Separator between alternative commands in a template.
pub const ALTERNATIVE_SEPARATOR: &str = " OR ";

/// A triggered rule, before or after suppression.
///
/// Rule id, command, description and priority are fixed at creation. Only the
/// suppression resolver may flip `suppressed` and fill in `reason`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    rule_id: String,
    command: String,
    description: String,
    priority: u32,
    suppressed: bool,
    reason: String,
}

impl Advice {
    pub fn from_rule(rule: &RuleDefinition) -> Self {
        Self {
            rule_id: rule.id.to_string(),
            command: rule.command.to_string(),
            description: rule.description.to_string(),
            priority: rule.priority,
            suppressed: false,
            reason: String::new(),
        }
    }

    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn tier(&self) -> Tier {
        Tier::from_priority(self.priority)
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn is_active(&self) -> bool {
        !self.suppressed
    }

    /// Suppression reason; empty while active.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Alternative commands offered by the template, in order.
    pub fn alternatives(&self) -> Vec<&str> {
        self.command
            .split(ALTERNATIVE_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Placeholders present in the command template.
    pub fn placeholders(&self) -> Vec<&'static str> {
        placeholder::ALL
            .into_iter()
            .filter(|p| self.command.contains(p))
            .collect()
    }

    pub(crate) fn suppress(&mut self, reason: String) {
        self.suppressed = true;
        self.reason = reason;
    }
}

/// Counts over a resolved advice list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub active: usize,
    pub suppressed: usize,
}

impl Summary {
    pub fn of(advice: &[Advice]) -> Self {
        let suppressed = advice.iter().filter(|a| a.is_suppressed()).count();
        Self {
            total: advice.len(),
            active: advice.len() - suppressed,
            suppressed,
        }
    }

    /// No active advice. An empty list and an all-suppressed list are both clean.
    pub fn is_clean(&self) -> bool {
        self.active == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advice(command: &'static str) -> Advice {
        Advice::from_rule(&RuleDefinition::new("T001", 40, command, "test", |_| true))
    }

    #[test]
    fn new_advice_is_active() {
        let a = advice("git push");
        assert!(a.is_active());
        assert_eq!(a.reason(), "");
        assert_eq!(a.priority(), 40);
        assert_eq!(a.tier(), Tier::Workflow);
    }

    #[test]
    fn suppress_keeps_identity() {
        let mut a = advice("git push");
        let before = (
            a.rule_id().to_string(),
            a.command().to_string(),
            a.description().to_string(),
            a.priority(),
        );
        a.suppress("Suppressed by merge --continue (priority 98)".into());
        assert!(a.is_suppressed());
        assert_eq!(
            before,
            (
                a.rule_id().to_string(),
                a.command().to_string(),
                a.description().to_string(),
                a.priority(),
            )
        );
    }

    #[test]
    fn alternatives_split_on_or() {
        let a = advice("git merge --continue OR git merge --abort");
        assert_eq!(a.alternatives(), vec!["git merge --continue", "git merge --abort"]);
        assert_eq!(advice("git push").alternatives(), vec!["git push"]);
    }

    #[test]
    fn placeholders_detected() {
        let a = advice("cd <submodule> && git checkout <branch>");
        assert_eq!(a.placeholders(), vec!["<branch>", "<submodule>"]);
        assert_eq!(advice("git reset --soft HEAD~N").placeholders(), vec!["HEAD~N"]);
        assert!(advice("git push").placeholders().is_empty());
    }

    #[test]
    fn summary_counts() {
        let mut suppressed = advice("git pull");
        suppressed.suppress("x".into());
        let list = vec![advice("git push"), suppressed];
        let summary = Summary::of(&list);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.active, 1);
        assert_eq!(summary.suppressed, 1);
        assert!(!summary.is_clean());
    }

    #[test]
    fn empty_and_all_suppressed_are_clean() {
        assert!(Summary::of(&[]).is_clean());
        let mut a = advice("git pull");
        a.suppress("x".into());
        assert!(Summary::of(&[a]).is_clean());
    }
}
