//! PredicateLocator - Root Predicate + Conjunct Expansion
//!
//! Finds the verb a sentence hangs on and the predicates coordinated with
//! it. "Vaccines **weaken** immunity and **cause** autism" yields
//! `[weaken, cause]`.

use std::collections::{HashSet, VecDeque};

use super::config::ClaimConfig;
use super::parse::{PosTag, SentenceParse};

/// Locates predicates in a sentence parse
#[derive(Debug, Clone)]
pub struct PredicateLocator {
    conjunct_labels: HashSet<String>,
}

impl PredicateLocator {
    pub fn new(config: &ClaimConfig) -> Self {
        Self {
            conjunct_labels: config.conjunct_labels.clone(),
        }
    }

    /// The clause root, when it is a VERB. A verbless root (a bare noun
    /// phrase, a copular AUX root) means the sentence has no predicate.
    pub fn root_predicate(&self, parse: &SentenceParse) -> Option<usize> {
        let root = parse.root();
        (parse.token(root).pos == PosTag::Verb).then_some(root)
    }

    /// The root followed by every predicate coordinated with it, in surface
    /// order. Conjunct chains are followed transitively
    /// ("weaken ..., cause ..., and lead ...").
    pub fn expand(&self, parse: &SentenceParse, root: usize) -> Vec<usize> {
        let mut conjuncts = Vec::new();
        let mut queue: VecDeque<usize> = VecDeque::from([root]);

        while let Some(node) = queue.pop_front() {
            for &child in parse.children(node) {
                if self.conjunct_labels.contains(&parse.token(child).dep) {
                    conjuncts.push(child);
                    queue.push_back(child);
                }
            }
        }

        conjuncts.sort_unstable();

        let mut predicates = Vec::with_capacity(conjuncts.len() + 1);
        predicates.push(root);
        predicates.extend(conjuncts);
        predicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::parse::Token;

    fn tok(text: &str, pos: PosTag, dep: &str, head: Option<usize>) -> Token {
        Token::new(text, text.to_lowercase(), pos, dep, head)
    }

    fn locator() -> PredicateLocator {
        PredicateLocator::new(&ClaimConfig::default())
    }

    #[test]
    fn test_root_verb_found() {
        let parse = SentenceParse::new(vec![
            tok("Vaccines", PosTag::Noun, "nsubj", Some(1)),
            tok("cause", PosTag::Verb, "ROOT", None),
            tok("autism", PosTag::Noun, "dobj", Some(1)),
        ])
        .unwrap();
        assert_eq!(locator().root_predicate(&parse), Some(1));
    }

    #[test]
    fn test_noun_root_has_no_predicate() {
        let parse = SentenceParse::new(vec![
            tok("What", PosTag::Pron, "det", Some(2)),
            tok("a", PosTag::Det, "det", Some(2)),
            tok("day", PosTag::Noun, "ROOT", None),
        ])
        .unwrap();
        assert_eq!(locator().root_predicate(&parse), None);
    }

    #[test]
    fn test_aux_root_has_no_predicate() {
        let parse = SentenceParse::new(vec![
            tok("Vaccines", PosTag::Noun, "nsubj", Some(1)),
            tok("are", PosTag::Aux, "ROOT", None),
            tok("dangerous", PosTag::Adj, "acomp", Some(1)),
        ])
        .unwrap();
        assert_eq!(locator().root_predicate(&parse), None);
    }

    #[test]
    fn test_single_predicate_expands_to_itself() {
        let parse = SentenceParse::new(vec![
            tok("Vaccines", PosTag::Noun, "nsubj", Some(1)),
            tok("cause", PosTag::Verb, "ROOT", None),
        ])
        .unwrap();
        assert_eq!(locator().expand(&parse, 1), vec![1]);
    }

    #[test]
    fn test_conjunct_chain_in_surface_order() {
        // Vaccines weaken immunity , cause autism , and lead to infertility .
        let parse = SentenceParse::new(vec![
            tok("Vaccines", PosTag::Noun, "nsubj", Some(1)),
            tok("weaken", PosTag::Verb, "ROOT", None),
            tok("immunity", PosTag::Noun, "dobj", Some(1)),
            tok(",", PosTag::Punct, "punct", Some(1)),
            tok("cause", PosTag::Verb, "conj", Some(1)),
            tok("autism", PosTag::Noun, "dobj", Some(4)),
            tok(",", PosTag::Punct, "punct", Some(4)),
            tok("and", PosTag::Cconj, "cc", Some(4)),
            tok("lead", PosTag::Verb, "conj", Some(4)),
            tok("to", PosTag::Adp, "prep", Some(8)),
            tok("infertility", PosTag::Noun, "pobj", Some(9)),
            tok(".", PosTag::Punct, "punct", Some(1)),
        ])
        .unwrap();
        assert_eq!(locator().expand(&parse, 1), vec![1, 4, 8]);
    }

    #[test]
    fn test_nominal_conjuncts_are_not_predicates_of_root() {
        // Conjuncts of the subject noun stay out of the predicate list
        let parse = SentenceParse::new(vec![
            tok("Garlic", PosTag::Propn, "nsubj", Some(3)),
            tok("and", PosTag::Cconj, "cc", Some(0)),
            tok("turmeric", PosTag::Noun, "conj", Some(0)),
            tok("cure", PosTag::Verb, "ROOT", None),
            tok("cancer", PosTag::Noun, "dobj", Some(3)),
        ])
        .unwrap();
        assert_eq!(locator().expand(&parse, 3), vec![3]);
    }

    #[test]
    fn test_custom_conjunct_labels() {
        let config = ClaimConfig::default().with_conjunct_labels(["conj", "parataxis"]);
        let parse = SentenceParse::new(vec![
            tok("Garlic", PosTag::Propn, "nsubj", Some(1)),
            tok("heals", PosTag::Verb, "ROOT", None),
            tok(";", PosTag::Punct, "punct", Some(1)),
            tok("it", PosTag::Pron, "nsubj", Some(4)),
            tok("cures", PosTag::Verb, "parataxis", Some(1)),
        ])
        .unwrap();
        assert_eq!(PredicateLocator::new(&config).expand(&parse, 1), vec![1, 4]);
        assert_eq!(locator().expand(&parse, 1), vec![1]);
    }
}
