//! ClaimExtractor - Per-Document Claim Pipeline
//!
//! # Pipeline (per sentence, in document order)
//! 1. NonClaimFilter on the sentence text (early exit)
//! 2. Root predicate; none means no claims
//! 3. Root subjects, computed once for inheritance
//! 4. Conjunct expansion
//! 5. Per predicate: reporting-verb filter, subjects, objects, assembly
//!
//! Claims from all sentences are concatenated in sentence order and
//! deduplicated once at the end.
//!
//! Nothing here fails on text input: every degenerate case (no sentences,
//! no predicate, no subject, filtered sentence) simply contributes nothing.

use serde::{Deserialize, Serialize};

use super::assembler::{dedup_claims, AtomicClaim, ClaimAssembler};
use super::config::{ClaimConfig, ConfigError};
use super::filter::{NonClaimFilter, Rejection, ReportingVerbFilter};
use super::parse::SentenceParse;
use super::predicate::PredicateLocator;
use super::roles::RoleResolver;

// =============================================================================
// Parser seam
// =============================================================================

/// Source of sentence parses (tokenization, tagging, dependency labels).
///
/// Implemented by [`AnnotationCache`](super::annotations::AnnotationCache)
/// and by any `Fn(&str) -> Vec<SentenceParse>`.
pub trait DependencyParser {
    /// Sentences of `text` in document order. Empty text yields no sentences.
    fn parse(&self, text: &str) -> Vec<SentenceParse>;
}

impl<F> DependencyParser for F
where
    F: Fn(&str) -> Vec<SentenceParse>,
{
    fn parse(&self, text: &str) -> Vec<SentenceParse> {
        self(text)
    }
}

// =============================================================================
// Stats
// =============================================================================

/// Why a whole sentence contributed no claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    NonClaimMarker,
    OpinionPrefix,
    NoPredicate,
}

/// Counters for one extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub sentences: usize,
    pub rejected_non_claim: usize,
    pub rejected_opinion: usize,
    pub without_predicate: usize,
    pub reporting_predicates: usize,
    pub subjectless_predicates: usize,
    pub claims_assembled: usize,
    pub claims_unique: usize,
    pub timing_us: u64,
}

#[derive(Debug, Default)]
struct SentenceOutcome {
    claims: Vec<AtomicClaim>,
    skipped: Option<SkipReason>,
    reporting: usize,
    subjectless: usize,
}

// =============================================================================
// ClaimPipeline
// =============================================================================

/// The parser-independent core: sentence parses in, claims out
#[derive(Debug, Clone)]
pub struct ClaimPipeline {
    non_claim: NonClaimFilter,
    reporting: ReportingVerbFilter,
    predicates: PredicateLocator,
    roles: RoleResolver,
    assembler: ClaimAssembler,
}

impl ClaimPipeline {
    pub fn new(config: &ClaimConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            non_claim: NonClaimFilter::new(config)?,
            reporting: ReportingVerbFilter::new(config),
            predicates: PredicateLocator::new(config),
            roles: RoleResolver::new(config),
            assembler: ClaimAssembler,
        })
    }

    /// Deduplicated claim strings for already-parsed sentences
    pub fn extract_from_parses(&self, sentences: &[SentenceParse]) -> Vec<String> {
        self.extract_with_stats(sentences)
            .0
            .into_iter()
            .map(|claim| claim.text)
            .collect()
    }

    /// Deduplicated claims with run statistics
    pub fn extract_with_stats(
        &self,
        sentences: &[SentenceParse],
    ) -> (Vec<AtomicClaim>, ExtractionStats) {
        let start = instant::Instant::now();
        let mut stats = ExtractionStats {
            sentences: sentences.len(),
            ..Default::default()
        };

        let mut claims = Vec::new();
        for outcome in self.outcomes(sentences) {
            match outcome.skipped {
                Some(SkipReason::NonClaimMarker) => stats.rejected_non_claim += 1,
                Some(SkipReason::OpinionPrefix) => stats.rejected_opinion += 1,
                Some(SkipReason::NoPredicate) => stats.without_predicate += 1,
                None => {}
            }
            stats.reporting_predicates += outcome.reporting;
            stats.subjectless_predicates += outcome.subjectless;
            claims.extend(outcome.claims);
        }

        stats.claims_assembled = claims.len();
        let claims = dedup_claims(claims);
        stats.claims_unique = claims.len();
        stats.timing_us = start.elapsed().as_micros() as u64;

        tracing::debug!(
            sentences = stats.sentences,
            assembled = stats.claims_assembled,
            unique = stats.claims_unique,
            "claim extraction finished"
        );

        (claims, stats)
    }

    #[cfg(not(feature = "parallel"))]
    fn outcomes(&self, sentences: &[SentenceParse]) -> Vec<SentenceOutcome> {
        sentences
            .iter()
            .enumerate()
            .map(|(index, parse)| self.sentence_claims(index, parse))
            .collect()
    }

    /// Indexed collect keeps sentence order, so dedup sees the same sequence
    #[cfg(feature = "parallel")]
    fn outcomes(&self, sentences: &[SentenceParse]) -> Vec<SentenceOutcome> {
        use rayon::prelude::*;

        sentences
            .par_iter()
            .enumerate()
            .map(|(index, parse)| self.sentence_claims(index, parse))
            .collect()
    }

    fn sentence_claims(&self, index: usize, parse: &SentenceParse) -> SentenceOutcome {
        let mut outcome = SentenceOutcome::default();

        if let Some(rejection) = self.non_claim.check(parse.text()) {
            tracing::debug!(sentence = index, reason = ?rejection, "sentence rejected");
            outcome.skipped = Some(match rejection {
                Rejection::NonClaimMarker(_) => SkipReason::NonClaimMarker,
                Rejection::OpinionPrefix(_) => SkipReason::OpinionPrefix,
            });
            return outcome;
        }

        let root = match self.predicates.root_predicate(parse) {
            Some(root) => root,
            None => {
                tracing::debug!(sentence = index, "no root predicate");
                outcome.skipped = Some(SkipReason::NoPredicate);
                return outcome;
            }
        };

        let root_subjects = self.roles.subjects(parse, root);

        for predicate in self.predicates.expand(parse, root) {
            let token = parse.token(predicate);

            if self.reporting.is_reporting(token) {
                tracing::debug!(sentence = index, predicate = %token.text, "reporting predicate skipped");
                outcome.reporting += 1;
                continue;
            }

            let subjects = self.roles.resolve_subjects(parse, predicate, &root_subjects);
            if subjects.is_empty() {
                tracing::debug!(sentence = index, predicate = %token.text, "predicate without subject");
                outcome.subjectless += 1;
                continue;
            }

            let objects = self.roles.objects(parse, predicate);
            let claims = self
                .assembler
                .assemble(parse, index, predicate, &subjects, &objects);

            for claim in &claims {
                tracing::trace!(sentence = index, claim = %claim.text, "claim assembled");
            }
            outcome.claims.extend(claims);
        }

        outcome
    }
}

// =============================================================================
// ClaimExtractor
// =============================================================================

/// Text in, atomic claims out. Owns its parser (constructor injection).
#[derive(Debug, Clone)]
pub struct ClaimExtractor<P> {
    parser: P,
    pipeline: ClaimPipeline,
}

impl<P: DependencyParser> ClaimExtractor<P> {
    pub fn new(parser: P, config: &ClaimConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            parser,
            pipeline: ClaimPipeline::new(config)?,
        })
    }

    /// Ordered, duplicate-free, lowercased claims. Never fails; text with no
    /// qualifying claim gives an empty vector.
    pub fn extract_atomic_claims(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let sentences = self.parser.parse(text);
        self.pipeline.extract_from_parses(&sentences)
    }

    /// Claims with their parts and run statistics
    pub fn extract_with_stats(&self, text: &str) -> (Vec<AtomicClaim>, ExtractionStats) {
        if text.trim().is_empty() {
            return (Vec::new(), ExtractionStats::default());
        }
        let sentences = self.parser.parse(text);
        self.pipeline.extract_with_stats(&sentences)
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn parser_mut(&mut self) -> &mut P {
        &mut self.parser
    }

    pub fn pipeline(&self) -> &ClaimPipeline {
        &self.pipeline
    }
}

// =============================================================================
// Tests
// =============================================================================
