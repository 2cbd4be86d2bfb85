use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CurateError;

/// Kind of constraint a rule expresses.
///
/// Unrecognized names are kept as `Other` so they survive normalization and
/// audit logging without affecting any filter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleType {
    ArtistLimit,
    MinDuration,
    MaxDuration,
    ExplicitFilter,
    MinYear,
    MaxYear,
    MinPopularity,
    MaxPopularity,
    SavedWithin,
    Other(String),
}

impl RuleType {
    pub const CONTENT: [RuleType; 6] = [
        RuleType::ExplicitFilter,
        RuleType::MinYear,
        RuleType::MaxYear,
        RuleType::MinPopularity,
        RuleType::MaxPopularity,
        RuleType::SavedWithin,
    ];
    pub const DURATION: [RuleType; 2] = [RuleType::MinDuration, RuleType::MaxDuration];

    pub fn as_str(&self) -> &str {
        match self {
            RuleType::ArtistLimit => "artist_limit",
            RuleType::MinDuration => "min_duration",
            RuleType::MaxDuration => "max_duration",
            RuleType::ExplicitFilter => "explicit_filter",
            RuleType::MinYear => "min_year",
            RuleType::MaxYear => "max_year",
            RuleType::MinPopularity => "min_popularity",
            RuleType::MaxPopularity => "max_popularity",
            RuleType::SavedWithin => "saved_within",
            RuleType::Other(name) => name,
        }
    }

    pub fn is_content(&self) -> bool {
        Self::CONTENT.contains(self)
    }

    pub fn is_duration(&self) -> bool {
        Self::DURATION.contains(self)
    }
}

impl From<&str> for RuleType {
    fn from(s: &str) -> Self {
        match s.trim() {
            "artist_limit" => RuleType::ArtistLimit,
            "min_duration" => RuleType::MinDuration,
            "max_duration" => RuleType::MaxDuration,
            "explicit_filter" => RuleType::ExplicitFilter,
            "min_year" => RuleType::MinYear,
            "max_year" => RuleType::MaxYear,
            "min_popularity" => RuleType::MinPopularity,
            "max_popularity" => RuleType::MaxPopularity,
            "saved_within" => RuleType::SavedWithin,
            other => RuleType::Other(other.to_string()),
        }
    }
}

impl From<String> for RuleType {
    fn from(s: String) -> Self {
        RuleType::from(s.as_str())
    }
}

impl From<RuleType> for String {
    fn from(r: RuleType) -> Self {
        r.as_str().to_string()
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule declaration as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub rule_type: RuleType,
    pub parameter: String,
}

impl Rule {
    pub fn new(rule_type: impl Into<RuleType>, parameter: impl Into<String>) -> Self {
        Self {
            rule_type: rule_type.into(),
            parameter: parameter.into(),
        }
    }
}

impl FromStr for Rule {
    type Err = CurateError;

    /// Parse a `TYPE=VALUE` argument.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rule_type, parameter) = s
            .split_once('=')
            .ok_or_else(|| CurateError::InvalidRule(s.to_string()))?;
        if rule_type.trim().is_empty() {
            return Err(CurateError::InvalidRule(s.to_string()));
        }
        Ok(Rule::new(rule_type, parameter.trim()))
    }
}

/// A named, saved set of rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl RuleConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, CurateError> {
        let text = std::fs::read_to_string(path).map_err(|source| CurateError::ReadRules {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| CurateError::ParseRules {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Canonical rule mapping: at most one parameter per rule type.
///
/// Every external representation converts into this before the engine runs;
/// on duplicate types the last value seen wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(BTreeMap<RuleType, String>);

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rule_type: impl Into<RuleType>, parameter: impl Into<String>) {
        self.0.insert(rule_type.into(), parameter.into());
    }

    pub fn contains(&self, rule_type: &RuleType) -> bool {
        self.0.contains_key(rule_type)
    }

    /// Raw parameter, whatever its content.
    pub fn get(&self, rule_type: &RuleType) -> Option<&str> {
        self.0.get(rule_type).map(String::as_str)
    }

    /// Trimmed parameter, `None` when absent or blank.
    pub fn param(&self, rule_type: &RuleType) -> Option<&str> {
        self.get(rule_type)
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// Coerce a parameter. Absent or blank parameters are `Ok(None)`.
    pub fn parse_param<T: FromStr>(&self, rule_type: &RuleType) -> Result<Option<T>, CurateError> {
        match self.param(rule_type) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<T>()
                .map(Some)
                .map_err(|_| CurateError::MalformedParameter {
                    rule: rule_type.clone(),
                    value: raw.to_string(),
                }),
        }
    }

    /// A new set holding only the entries whose type matches `keep`.
    pub fn subset(&self, keep: impl Fn(&RuleType) -> bool) -> RuleSet {
        RuleSet(
            self.0
                .iter()
                .filter(|(k, _)| keep(k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RuleType, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for rule in iter {
            set.insert(rule.rule_type, rule.parameter);
        }
        set
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        rules.into_iter().collect()
    }
}

impl From<&[Rule]> for RuleSet {
    fn from(rules: &[Rule]) -> Self {
        rules.iter().cloned().collect()
    }
}

impl From<Vec<(String, String)>> for RuleSet {
    fn from(pairs: Vec<(String, String)>) -> Self {
        pairs.into_iter().map(|(k, v)| Rule::new(k, v)).collect()
    }
}

impl From<BTreeMap<String, String>> for RuleSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().map(|(k, v)| Rule::new(k, v)).collect()
    }
}

impl From<HashMap<String, String>> for RuleSet {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().map(|(k, v)| Rule::new(k, v)).collect()
    }
}

impl From<&RuleConfig> for RuleSet {
    fn from(config: &RuleConfig) -> Self {
        config.rules.as_slice().into()
    }
}

impl From<RuleConfig> for RuleSet {
    fn from(config: RuleConfig) -> Self {
        config.rules.into()
    }
}
