use crate::advice::Advice;
use crate::catalog::RuleCatalog;
use crate::snapshot::Snapshot;

/// Runs every enabled rule against a snapshot.
pub struct Evaluator<'a> {
    catalog: &'a RuleCatalog,
}

impl<'a> Evaluator<'a> {
    pub fn new(catalog: &'a RuleCatalog) -> Self {
        Self { catalog }
    }

    /// Triggered rules as advice, highest priority first.
    ///
    /// Equal priorities keep catalog enumeration order: the list is built in
    /// that order and `sort_by_key` is stable.
    pub fn evaluate(&self, snapshot: &Snapshot) -> Vec<Advice> {
        let mut advice: Vec<Advice> = self
            .catalog
            .enabled()
            .filter(|rule| rule.matches(snapshot))
            .inspect(|rule| {
                tracing::debug!(rule = rule.id, priority = rule.priority, "rule triggered");
            })
            .map(Advice::from_rule)
            .collect();

        advice.sort_by_key(|a| std::cmp::Reverse(a.priority()));
        advice
    }
}
