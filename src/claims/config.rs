// claimcore/src/claims/config.rs
//
// Lexical and label sets driving the claim filters and resolvers

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// =============================================================================
// Defaults
// =============================================================================

/// Sharing / forwarding / virality language
pub const DEFAULT_NON_CLAIM_MARKERS: &[&str] = &["share", "forward", "send", "viral"];

/// Sentence-initial subjective framing
pub const DEFAULT_OPINION_PREFIXES: &[&str] = &["i feel", "i think"];

/// Lemmas of predicates that frame a claim instead of asserting one
pub const DEFAULT_REPORTING_VERBS: &[&str] = &[
    "say", "tell", "claim", "believe", "think", "suggest", "warn", "report",
];

/// Nominal subject, passive nominal subject
pub const DEFAULT_SUBJECT_LABELS: &[&str] = &["nsubj", "nsubjpass"];

/// Direct object, attribute, prepositional object, generic object
pub const DEFAULT_OBJECT_LABELS: &[&str] = &["dobj", "attr", "pobj", "obj"];

/// Coordination
pub const DEFAULT_CONJUNCT_LABELS: &[&str] = &["conj"];

fn to_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn to_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_non_claim_markers() -> Vec<String> { to_vec(DEFAULT_NON_CLAIM_MARKERS) }
fn default_opinion_prefixes() -> Vec<String> { to_vec(DEFAULT_OPINION_PREFIXES) }
fn default_reporting_verbs() -> HashSet<String> { to_set(DEFAULT_REPORTING_VERBS) }
fn default_subject_labels() -> HashSet<String> { to_set(DEFAULT_SUBJECT_LABELS) }
fn default_object_labels() -> HashSet<String> { to_set(DEFAULT_OBJECT_LABELS) }
fn default_conjunct_labels() -> HashSet<String> { to_set(DEFAULT_CONJUNCT_LABELS) }

// =============================================================================
// ClaimConfig
// =============================================================================

/// Configuration for claim extraction.
///
/// Every field has its own default, so a JSON override only needs the sets
/// it changes: `{"reporting_verbs": ["say", "allege"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimConfig {
    /// Substrings that mark a sentence as non-factual
    #[serde(default = "default_non_claim_markers")]
    pub non_claim_markers: Vec<String>,
    /// Sentence-initial phrases marking an opinion
    #[serde(default = "default_opinion_prefixes")]
    pub first_person_opinion_prefixes: Vec<String>,
    /// Predicate lemmas that frame rather than assert
    #[serde(default = "default_reporting_verbs")]
    pub reporting_verbs: HashSet<String>,
    /// Dependency labels recognized as subjects
    #[serde(default = "default_subject_labels")]
    pub subject_labels: HashSet<String>,
    /// Dependency labels recognized as objects
    #[serde(default = "default_object_labels")]
    pub object_labels: HashSet<String>,
    /// Dependency labels linking coordinated predicates
    #[serde(default = "default_conjunct_labels")]
    pub conjunct_labels: HashSet<String>,
}

impl Default for ClaimConfig {
    fn default() -> Self {
        Self {
            non_claim_markers: default_non_claim_markers(),
            first_person_opinion_prefixes: default_opinion_prefixes(),
            reporting_verbs: default_reporting_verbs(),
            subject_labels: default_subject_labels(),
            object_labels: default_object_labels(),
            conjunct_labels: default_conjunct_labels(),
        }
    }
}

impl ClaimConfig {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidJson(e.to_string()))
    }

    pub fn with_non_claim_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.non_claim_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_opinion_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.first_person_opinion_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_reporting_verbs<I, S>(mut self, verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reporting_verbs = verbs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_subject_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subject_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_object_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.object_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_conjunct_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conjunct_labels = labels.into_iter().map(Into::into).collect();
        self
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidJson(String),
    MarkerAutomaton(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidJson(msg) => write!(f, "Invalid config: {}", msg),
            ConfigError::MarkerAutomaton(msg) => {
                write!(f, "Failed to build marker automaton: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClaimConfig::default();
        assert_eq!(config.non_claim_markers, vec!["share", "forward", "send", "viral"]);
        assert_eq!(config.first_person_opinion_prefixes, vec!["i feel", "i think"]);
        assert_eq!(config.reporting_verbs.len(), 8);
        assert!(config.reporting_verbs.contains("warn"));
        assert!(config.subject_labels.contains("nsubjpass"));
        assert!(config.object_labels.contains("pobj"));
        assert!(config.conjunct_labels.contains("conj"));
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = ClaimConfig::from_json(r#"{"reporting_verbs": ["say", "allege"]}"#).unwrap();
        assert_eq!(config.reporting_verbs.len(), 2);
        assert!(config.reporting_verbs.contains("allege"));
        assert_eq!(config.subject_labels, ClaimConfig::default().subject_labels);
        assert_eq!(config.non_claim_markers, ClaimConfig::default().non_claim_markers);
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(ClaimConfig::from_json("{}").unwrap(), ClaimConfig::default());
    }

    #[test]
    fn test_invalid_json() {
        let err = ClaimConfig::from_json(r#"{"object_labels": 3}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidJson(_)));
    }

    #[test]
    fn test_builders_replace_sets() {
        let config = ClaimConfig::default()
            .with_non_claim_markers(["retweet"])
            .with_object_labels(vec!["dobj".to_string()]);
        assert_eq!(config.non_claim_markers, vec!["retweet"]);
        assert_eq!(config.object_labels.len(), 1);
    }
}
