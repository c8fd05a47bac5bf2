use crate::advice::Advice;
use crate::catalog::RuleCatalog;
use crate::evaluate::Evaluator;
use crate::settings::RuleSettings;
use crate::snapshot::Snapshot;
use crate::suppress::{SuppressionResolver, SuppressionTable};

/// A built catalog paired with a suppression resolver.
///
/// Holds no per-run state; one advisor can serve any number of snapshots.
#[derive(Debug)]
pub struct Advisor {
    catalog: RuleCatalog,
    resolver: SuppressionResolver,
}

impl Advisor {
    pub fn new(catalog: RuleCatalog, resolver: SuppressionResolver) -> Self {
        Self { catalog, resolver }
    }

    /// Catalog from `settings`, standard suppression table.
    pub fn from_settings(settings: &RuleSettings) -> Self {
        Self::new(
            RuleCatalog::new(settings),
            SuppressionResolver::new(SuppressionTable::standard()),
        )
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn resolver(&self) -> &SuppressionResolver {
        &self.resolver
    }

    /// Evaluate, sort, then suppress.
    pub fn advise(&self, snapshot: &Snapshot) -> Vec<Advice> {
        let raw = Evaluator::new(&self.catalog).evaluate(snapshot);
        self.resolver.resolve(raw)
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::from_settings(&RuleSettings::default())
    }
}
