use serde::Serialize;

use super::model::{RuleSet, RuleType};

/// Read-only projection of a rule set into processing buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategorizedRules {
    /// Everything supplied, including unrecognized rule types.
    pub all_rules: RuleSet,
    pub content_rules: RuleSet,
    pub artist_rules: RuleSet,
    pub duration_rules: RuleSet,
    pub has_artist_limit: bool,
    pub has_duration_rule: bool,
    pub has_content_filter: bool,
}

impl CategorizedRules {
    /// The full rule mapping as JSON, for history records.
    pub fn rules_json(&self) -> String {
        serde_json::to_string(&self.all_rules).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Split rules into content, artist and duration buckets.
///
/// Accepts any representation that normalizes into a [`RuleSet`]. Unknown
/// rule types stay in `all_rules` and land in no bucket.
pub fn categorize(rules: impl Into<RuleSet>) -> CategorizedRules {
    let all_rules: RuleSet = rules.into();

    let content_rules = all_rules.subset(RuleType::is_content);
    let artist_rules = all_rules.subset(|k| *k == RuleType::ArtistLimit);
    let duration_rules = all_rules.subset(RuleType::is_duration);

    CategorizedRules {
        has_artist_limit: !artist_rules.is_empty(),
        has_duration_rule: !duration_rules.is_empty(),
        has_content_filter: !content_rules.is_empty(),
        all_rules,
        content_rules,
        artist_rules,
        duration_rules,
    }
}
