//! Claim Filters
//!
//! Two cheap gates in front of claim assembly:
//! - [`NonClaimFilter`] rejects whole sentences (sharing language, opinions)
//!   before any tree analysis
//! - [`ReportingVerbFilter`] drops individual predicates that only frame a
//!   claim ("Doctors won't **tell** you ...")

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::config::{ClaimConfig, ConfigError};
use super::parse::Token;

// =============================================================================
// NonClaimFilter
// =============================================================================

/// Why a sentence was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// Contains a sharing / virality marker
    NonClaimMarker(String),
    /// Starts with first-person opinion framing
    OpinionPrefix(String),
}

/// Sentence-level gate for non-factual language
#[derive(Debug, Clone)]
pub struct NonClaimFilter {
    /// None when no markers are configured
    automaton: Option<AhoCorasick>,
    markers: Vec<String>,
    opinion_prefixes: Vec<String>,
}

impl NonClaimFilter {
    pub fn new(config: &ClaimConfig) -> Result<Self, ConfigError> {
        let markers: Vec<String> = config
            .non_claim_markers
            .iter()
            .map(|m| m.to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();

        let automaton = if markers.is_empty() {
            None
        } else {
            let automaton = AhoCorasickBuilder::new()
                .match_kind(MatchKind::LeftmostFirst)
                .build(&markers)
                .map_err(|e| ConfigError::MarkerAutomaton(e.to_string()))?;
            Some(automaton)
        };

        let opinion_prefixes = config
            .first_person_opinion_prefixes
            .iter()
            .map(|p| p.to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();

        Ok(Self {
            automaton,
            markers,
            opinion_prefixes,
        })
    }

    /// Check a sentence's text. Returns the rejection reason, or None when
    /// the sentence may carry a claim.
    pub fn check(&self, sentence_text: &str) -> Option<Rejection> {
        let lowered = sentence_text.trim_start().to_lowercase();

        if let Some(automaton) = &self.automaton {
            if let Some(mat) = automaton.find(&lowered) {
                let marker = self.markers[mat.pattern().as_usize()].clone();
                return Some(Rejection::NonClaimMarker(marker));
            }
        }

        self.opinion_prefixes
            .iter()
            .find(|prefix| lowered.starts_with(prefix.as_str()))
            .map(|prefix| Rejection::OpinionPrefix(prefix.clone()))
    }

    pub fn is_claim_candidate(&self, sentence_text: &str) -> bool {
        self.check(sentence_text).is_none()
    }
}

// =============================================================================
// ReportingVerbFilter
// =============================================================================

/// Predicate-level gate for reporting / attribution verbs
#[derive(Debug, Clone)]
pub struct ReportingVerbFilter {
    verbs: HashSet<String>,
}

impl ReportingVerbFilter {
    pub fn new(config: &ClaimConfig) -> Self {
        Self {
            verbs: config.reporting_verbs.iter().map(|v| v.to_lowercase()).collect(),
        }
    }

    /// True when the predicate should be excluded
    pub fn is_reporting(&self, predicate: &Token) -> bool {
        self.verbs.contains(&predicate.lemma.to_lowercase())
    }
}

// =============================================================================
// Tests
// =============================================================================
