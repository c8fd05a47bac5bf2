pub mod advice;
pub mod advisor;
pub mod catalog;
pub mod evaluate;
pub mod rule;
pub mod settings;
pub mod snapshot;
pub mod suppress;

pub use advice::{Advice, Summary};
pub use advisor::Advisor;
pub use catalog::RuleCatalog;
pub use evaluate::Evaluator;
pub use rule::{RuleDefinition, Tier};
pub use settings::{ParamValue, RuleSettings};
pub use snapshot::Snapshot;
pub use suppress::{command_key, SuppressionResolver, SuppressionTable};
