//! Rule declarations, normalization into a canonical mapping and
//! categorization into processing buckets.

mod categorize;
mod model;

pub use categorize::{CategorizedRules, categorize};
pub use model::{Rule, RuleConfig, RuleSet, RuleType};
