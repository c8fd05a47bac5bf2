//! Command suppression.
//!
//! A higher-priority active command can make a lower-priority one moot or
//! dangerous. The relationships live in a [`SuppressionTable`] keyed by
//! command key (see [`command_key`]); the [`SuppressionResolver`] applies the
//! table to an already-sorted advice list.

use crate::advice::{Advice, ALTERNATIVE_SEPARATOR};
use std::collections::{BTreeMap, BTreeSet};

/// Commands that are unsafe while a merge, rebase or cherry-pick is unresolved.
const ORDINARY_COMMANDS: [&str; 7] = [
    "merge", "rebase", "reset", "commit", "pull", "push", "checkout",
];

/// Continuation keys, each of which blocks every ordinary command.
const CONTINUATIONS: [&str; 6] = [
    "merge --continue",
    "merge --abort",
    "rebase --continue",
    "rebase --abort",
    "cherry-pick --continue",
    "cherry-pick --abort",
];

/// Immutable map from a command key to the keys it suppresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionTable {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl SuppressionTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for key in CONTINUATIONS {
            table.insert(key, ORDINARY_COMMANDS);
        }
        // Reverting makes the reset pointless.
        table.insert("revert", ["reset"]);
        table.insert("merge", ["rebase"]);
        table.insert("rebase", ["pull"]);
        // Resetting discards what a commit would record.
        table.insert("reset", ["commit"]);
        table
    }

    /// Add entries, unioning with any targets the key already has.
    pub fn extend<K, V, I>(mut self, entries: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, Vec<V>)>,
    {
        for (key, targets) in entries {
            self.insert(key.as_ref(), targets.iter().map(|t| t.as_ref()));
        }
        self
    }

    fn insert<'s>(&mut self, key: &str, targets: impl IntoIterator<Item = &'s str>) {
        let set = self.entries.entry(normalize_key(key)).or_default();
        set.extend(targets.into_iter().map(normalize_key));
    }

    /// Keys suppressed by `key`, if it suppresses anything.
    pub fn targets(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(key)
    }

    pub fn suppresses(&self, key: &str, target: &str) -> bool {
        self.targets(key).is_some_and(|set| set.contains(target))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collapse internal whitespace so `"merge  --continue"` and
/// `"merge --continue"` are the same key.
fn normalize_key(key: &str) -> String {
    key.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical command key of a command template.
///
/// The last command of an `&&` chain and the first of an `OR` list stand for
/// the whole template. The key is the git subcommand, plus a directly
/// following `--continue`/`--abort`. Templates that are not git invocations
/// (warnings written as `# ...`) have no key.
pub fn command_key(template: &str) -> Option<String> {
    let mut cmd = template;
    if let Some((_, last)) = cmd.rsplit_once("&&") {
        cmd = last;
    }
    if let Some((first, _)) = cmd.split_once(ALTERNATIVE_SEPARATOR) {
        cmd = first;
    }

    let mut tokens = cmd.split_whitespace();
    if tokens.next()? != "git" {
        return None;
    }
    let verb = tokens.next()?;
    match tokens.next() {
        Some(flag @ ("--continue" | "--abort")) => Some(format!("{verb} {flag}")),
        _ => Some(verb.to_string()),
    }
}

/// Applies a suppression table to priority-ordered advice.
#[derive(Debug, Clone)]
pub struct SuppressionResolver {
    table: SuppressionTable,
}

impl SuppressionResolver {
    pub fn new(table: SuppressionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SuppressionTable {
        &self.table
    }

    /// Mark advice made moot by an earlier, still-active entry.
    ///
    /// Single left-to-right pass. An entry that is already suppressed never
    /// suppresses anything and is never revived, so the first active
    /// suppressor wins and running the pass again changes nothing.
    pub fn resolve(&self, mut advice: Vec<Advice>) -> Vec<Advice> {
        let keys: Vec<Option<String>> = advice.iter().map(|a| command_key(a.command())).collect();

        for i in 0..advice.len() {
            if advice[i].is_suppressed() {
                continue;
            }
            let Some(key) = keys[i].as_deref() else {
                continue;
            };
            let Some(targets) = self.table.targets(key) else {
                continue;
            };
            let priority = advice[i].priority();

            for j in (i + 1)..advice.len() {
                if advice[j].is_suppressed() {
                    continue;
                }
                let hit = keys[j].as_deref().is_some_and(|k| targets.contains(k));
                if hit {
                    tracing::debug!(
                        suppressor = advice[i].rule_id(),
                        suppressed = advice[j].rule_id(),
                        key,
                        "advice suppressed"
                    );
                    advice[j].suppress(format!("Suppressed by {key} (priority {priority})"));
                }
            }
        }

        advice
    }
}

impl Default for SuppressionResolver {
    fn default() -> Self {
        Self::new(SuppressionTable::standard())
    }
}
