//! ClaimAssembler - Rendering Claims from Resolved Roles
//!
//! A claim is `"<subject span> <predicate> [<object span>]"`, lowercased.
//! Spans are surface subtree text and the predicate keeps its surface form:
//! plurals, tense and domain terms survive untouched ("caused", not "cause").

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::parse::SentenceParse;

// =============================================================================
// Types
// =============================================================================

/// One atomic claim with the pieces it was built from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtomicClaim {
    /// Normalized claim string (the claim's identity)
    pub text: String,
    /// Subject span, lowercased
    pub subject: String,
    /// Predicate surface form, lowercased
    pub predicate: String,
    /// Object span, lowercased
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    /// Index of the source sentence in the document
    pub sentence: usize,
}

// =============================================================================
// ClaimAssembler
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimAssembler;

impl ClaimAssembler {
    /// One claim per (subject, object) pair, or one per subject when there
    /// are no objects. No subjects means no claims.
    pub fn assemble(
        &self,
        parse: &SentenceParse,
        sentence: usize,
        predicate: usize,
        subjects: &[usize],
        objects: &[usize],
    ) -> Vec<AtomicClaim> {
        let verb = parse.token(predicate).text.to_lowercase();
        let object_spans: Vec<String> = objects
            .iter()
            .map(|&o| parse.span_text(o).to_lowercase())
            .collect();

        let mut claims = Vec::with_capacity(subjects.len() * object_spans.len().max(1));

        for &s in subjects {
            let subject = parse.span_text(s).to_lowercase();

            if object_spans.is_empty() {
                claims.push(AtomicClaim {
                    text: format!("{} {}", subject, verb),
                    subject,
                    predicate: verb.clone(),
                    object: None,
                    sentence,
                });
                continue;
            }

            for object in &object_spans {
                claims.push(AtomicClaim {
                    text: format!("{} {} {}", subject, verb, object),
                    subject: subject.clone(),
                    predicate: verb.clone(),
                    object: Some(object.clone()),
                    sentence,
                });
            }
        }

        claims
    }
}

// =============================================================================
// Deduplication
// =============================================================================

/// Drop exact duplicates by claim text, keeping first occurrences in order
pub fn dedup_claims(claims: Vec<AtomicClaim>) -> Vec<AtomicClaim> {
    let mut seen: IndexSet<String> = IndexSet::with_capacity(claims.len());
    claims
        .into_iter()
        .filter(|claim| seen.insert(claim.text.clone()))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
