//! RoleResolver - Subjects and Objects of a Predicate
//!
//! Subjects are immediate left dependents with a subject label; objects are
//! immediate right dependents with an object label. A coordinated predicate
//! without its own subject inherits the root predicate's subjects.

use std::collections::HashSet;

use super::config::ClaimConfig;
use super::parse::SentenceParse;

#[derive(Debug, Clone)]
pub struct RoleResolver {
    subject_labels: HashSet<String>,
    object_labels: HashSet<String>,
}

impl RoleResolver {
    pub fn new(config: &ClaimConfig) -> Self {
        Self {
            subject_labels: config.subject_labels.clone(),
            object_labels: config.object_labels.clone(),
        }
    }

    /// The predicate's own subjects, left to right
    pub fn subjects(&self, parse: &SentenceParse, predicate: usize) -> Vec<usize> {
        parse
            .lefts(predicate)
            .filter(|&t| self.subject_labels.contains(&parse.token(t).dep))
            .collect()
    }

    /// The predicate's subjects, falling back to the root predicate's
    pub fn resolve_subjects(
        &self,
        parse: &SentenceParse,
        predicate: usize,
        root_subjects: &[usize],
    ) -> Vec<usize> {
        let own = self.subjects(parse, predicate);
        if own.is_empty() {
            root_subjects.to_vec()
        } else {
            own
        }
    }

    /// Object-like right dependents, left to right. May be empty.
    pub fn objects(&self, parse: &SentenceParse, predicate: usize) -> Vec<usize> {
        parse
            .rights(predicate)
            .filter(|&t| self.object_labels.contains(&parse.token(t).dep))
            .collect()
    }
}
