use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule predicate. Closed over any resolved parameters at catalog build time.
pub type Predicate = Box<dyn Fn(&Snapshot) -> bool + Send + Sync>;

/// Severity band a rule belongs to, implied by its priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// 90 and above: put the keyboard down.
    Dangerous,
    /// 60–89.
    Integrity,
    /// 30–59.
    Workflow,
    /// 10–29.
    Suggestion,
    /// Below 10.
    Informational,
}

impl Tier {
    /// Enumeration order of the catalog.
    pub const ALL: [Tier; 5] = [
        Tier::Dangerous,
        Tier::Integrity,
        Tier::Workflow,
        Tier::Suggestion,
        Tier::Informational,
    ];

    pub fn from_priority(priority: u32) -> Self {
        match priority {
            90.. => Tier::Dangerous,
            60..=89 => Tier::Integrity,
            30..=59 => Tier::Workflow,
            10..=29 => Tier::Suggestion,
            _ => Tier::Informational,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Dangerous => "dangerous",
            Tier::Integrity => "integrity",
            Tier::Workflow => "workflow",
            Tier::Suggestion => "suggestion",
            Tier::Informational => "informational",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, prioritized predicate paired with a suggested command.
pub struct RuleDefinition {
    pub id: &'static str,
    pub command: &'static str,
    pub description: &'static str,
    pub priority: u32,
    check: Predicate,
}

impl RuleDefinition {
    pub fn new(
        id: &'static str,
        priority: u32,
        command: &'static str,
        description: &'static str,
        check: impl Fn(&Snapshot) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            command,
            description,
            priority,
            check: Box::new(check),
        }
    }

    pub fn tier(&self) -> Tier {
        Tier::from_priority(self.priority)
    }

    /// Whether the rule fires for this snapshot.
    pub fn matches(&self, snapshot: &Snapshot) -> bool {
        (self.check)(snapshot)
    }
}

impl fmt::Debug for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDefinition")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}
