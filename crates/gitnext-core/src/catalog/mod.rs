//! The rule catalog: every candidate rule, in a fixed enumeration order.
//!
//! Rules are grouped by tier (dangerous, integrity, workflow, suggestion,
//! informational) and keep their declaration order within a tier. That order
//! is the tie-break for equal priorities, so changing it changes output.

mod dangerous;
mod informational;
mod integrity;
mod suggestion;
mod workflow;

pub use workflow::{DEFAULT_REBASE_MIN_COMMITS, DEFAULT_SOFT_RESET_MAX_COMMITS};

use crate::rule::{RuleDefinition, Tier};
use crate::settings::RuleSettings;
use crate::snapshot::Snapshot;
use std::collections::BTreeSet;

/// Ahead of and behind the upstream at the same time.
fn diverged(s: &Snapshot) -> bool {
    s.ahead > 0 && s.behind > 0
}

/// Immutable, ordered set of rule definitions with parameters already bound.
#[derive(Debug)]
pub struct RuleCatalog {
    rules: Vec<RuleDefinition>,
    disabled: BTreeSet<String>,
}

impl RuleCatalog {
    /// Build the catalog, reading every configurable parameter exactly once.
    pub fn new(settings: &RuleSettings) -> Self {
        let mut rules = dangerous::rules();
        rules.extend(integrity::rules());
        rules.extend(workflow::rules(settings));
        rules.extend(suggestion::rules());
        rules.extend(informational::rules());

        Self {
            rules,
            disabled: settings.disabled.clone(),
        }
    }

    /// All rules in enumeration order, disabled ones included.
    pub fn rules(&self) -> &[RuleDefinition] {
        &self.rules
    }

    /// Rules that take part in evaluation, in enumeration order.
    pub fn enabled(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.rules.iter().filter(|r| !self.is_disabled(r.id))
    }

    pub fn is_disabled(&self, rule_id: &str) -> bool {
        self.disabled.contains(rule_id)
    }

    pub fn get(&self, rule_id: &str) -> Option<&RuleDefinition> {
        self.rules.iter().find(|r| r.id == rule_id)
    }

    pub fn tier(&self, tier: Tier) -> impl Iterator<Item = &RuleDefinition> {
        self.rules.iter().filter(move |r| r.tier() == tier)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::new(&RuleSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let catalog = RuleCatalog::default();
        let mut seen = HashSet::new();
        for rule in catalog.rules() {
            assert!(seen.insert(rule.id), "duplicate rule id {}", rule.id);
        }
        assert_eq!(catalog.len(), 43);
    }

    #[test]
    fn enumeration_follows_tier_order() {
        let catalog = RuleCatalog::default();
        let tiers: Vec<Tier> = catalog.rules().iter().map(|r| r.tier()).collect();
        let mut sorted = tiers.clone();
        sorted.sort();
        assert_eq!(tiers, sorted, "rules declared outside their tier block");
    }

    #[test]
    fn every_tier_is_populated() {
        let catalog = RuleCatalog::default();
        for tier in Tier::ALL {
            assert!(catalog.tier(tier).next().is_some(), "{tier} is empty");
        }
    }

    #[test]
    fn declaration_order_within_tier() {
        let catalog = RuleCatalog::default();
        let dangerous: Vec<&str> = catalog.tier(Tier::Dangerous).map(|r| r.id).collect();
        assert_eq!(&dangerous[..3], &["R037", "R038", "R039"]);
        let workflow: Vec<&str> = catalog.tier(Tier::Workflow).map(|r| r.id).collect();
        let r051 = workflow.iter().position(|id| *id == "R051").unwrap();
        let r004 = workflow.iter().position(|id| *id == "R004").unwrap();
        assert!(r051 < r004);
    }

    #[test]
    fn disabled_rules_are_not_enabled() {
        let settings = RuleSettings {
            disabled: ["R008".to_string(), "R999".to_string()].into(),
            ..Default::default()
        };
        let catalog = RuleCatalog::new(&settings);
        assert!(catalog.is_disabled("R008"));
        assert!(catalog.enabled().all(|r| r.id != "R008"));
        // Unknown ids are ignored.
        assert_eq!(catalog.enabled().count(), catalog.len() - 1);
        assert!(catalog.get("R008").is_some());
    }

    #[test]
    fn soft_reset_threshold_is_bound_at_construction() {
        let snap = Snapshot {
            commit_count_since_push: 5,
            ..Default::default()
        };

        let default_catalog = RuleCatalog::default();
        assert!(!default_catalog.get("R020").unwrap().matches(&snap));
        assert!(default_catalog.get("R022").unwrap().matches(&snap));

        let mut settings = RuleSettings::default();
        settings.set_param("R020", "max_commits", 5);
        settings.set_param("R022", "min_commits", 6);
        let tuned = RuleCatalog::new(&settings);
        // Mutating settings after construction has no effect.
        settings.set_param("R020", "max_commits", 1);
        assert!(tuned.get("R020").unwrap().matches(&snap));
        assert!(!tuned.get("R022").unwrap().matches(&snap));
    }

    #[test]
    fn soft_reset_needs_unpushed_commits() {
        let catalog = RuleCatalog::default();
        let r020 = catalog.get("R020").unwrap();
        assert!(!r020.matches(&Snapshot::default()));
        assert!(r020.matches(&Snapshot {
            commit_count_since_push: 3,
            ..Default::default()
        }));
        assert!(!r020.matches(&Snapshot {
            commit_count_since_push: 2,
            last_commit_pushed: true,
            ..Default::default()
        }));
    }

    #[test]
    fn protected_branch_splits_merge_and_rebase() {
        let catalog = RuleCatalog::default();
        let feature = Snapshot {
            ahead: 1,
            behind: 1,
            ..Default::default()
        };
        let protected = Snapshot {
            on_protected_branch: true,
            ..feature.clone()
        };
        assert!(catalog.get("R031").unwrap().matches(&feature));
        assert!(!catalog.get("R032").unwrap().matches(&feature));
        assert!(catalog.get("R032").unwrap().matches(&protected));
        assert!(!catalog.get("R031").unwrap().matches(&protected));
    }

    #[test]
    fn divergence_needs_both_directions() {
        let mut snap = Snapshot {
            ahead: 1,
            ..Default::default()
        };
        assert!(!diverged(&snap));
        snap.behind = 3;
        assert!(diverged(&snap));
        snap.ahead = 0;
        assert!(!diverged(&snap));
    }

    #[test]
    fn no_upstream_ignored_when_detached() {
        let catalog = RuleCatalog::default();
        let r034 = catalog.get("R034").unwrap();
        assert!(r034.matches(&Snapshot {
            no_upstream: true,
            ..Default::default()
        }));
        assert!(!r034.matches(&Snapshot {
            no_upstream: true,
            on_detached_head: true,
            ..Default::default()
        }));
    }

    #[test]
    fn empty_snapshot_matches_nothing() {
        let catalog = RuleCatalog::default();
        let snap = Snapshot::default();
        let fired: Vec<&str> = catalog
            .rules()
            .iter()
            .filter(|r| r.matches(&snap))
            .map(|r| r.id)
            .collect();
        assert!(fired.is_empty(), "fired on empty snapshot: {fired:?}");
    }
}
