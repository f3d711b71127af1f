//! AnnotationCache - Parser Backed by Pre-Computed Parses
//!
//! The dependency parse comes from an external annotation service. The cache
//! holds what that service already returned (spaCy documents or single
//! sentence parses) and answers `parse(text)` from it:
//!
//! 1. Whole-document hit: the text was hydrated as one document
//! 2. Otherwise: split into UAX#29 sentences and look each one up, merging
//!    adjacent pieces when the annotator kept them as one sentence
//!    (UAX#29 breaks after "Dr." in "Dr. Smith", spaCy does not)
//!
//! Keys ignore whitespace, so "Doctors wo n't tell" (token texts joined by
//! spaces) and "Doctors won't tell" (original text) find the same entry.

use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

use super::extractor::DependencyParser;
use super::parse::SentenceParse;
use super::spacy::{DocError, SpacyDoc};

fn cache_key(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Sentence and document parses keyed by their text
#[derive(Debug, Clone, Default)]
pub struct AnnotationCache {
    sentences: HashMap<String, SentenceParse>,
    documents: HashMap<String, Vec<SentenceParse>>,
    longest_key: usize,
}

impl AnnotationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache a single sentence parse under its text
    pub fn insert(&mut self, parse: SentenceParse) {
        let key = cache_key(parse.text());
        self.longest_key = self.longest_key.max(key.len());
        self.sentences.insert(key, parse);
    }

    /// Cache a spaCy document and each of its sentences.
    /// Returns the number of sentences added.
    pub fn hydrate_doc(&mut self, doc: &SpacyDoc) -> Result<usize, DocError> {
        let sentences = doc.sentences()?;
        let count = sentences.len();

        for parse in &sentences {
            self.insert(parse.clone());
        }
        self.documents.insert(cache_key(&doc.text), sentences);

        Ok(count)
    }

    pub fn hydrate_json(&mut self, json: &str) -> Result<usize, DocError> {
        let doc = SpacyDoc::from_json(json)?;
        self.hydrate_doc(&doc)
    }

    pub fn contains(&self, sentence_text: &str) -> bool {
        self.sentences.contains_key(&cache_key(sentence_text))
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn clear(&mut self) {
        self.sentences.clear();
        self.documents.clear();
        self.longest_key = 0;
    }

    /// Longest cached sentence starting at `pieces[start]`, as
    /// (index of its last piece, parse)
    fn longest_match(&self, pieces: &[&str], start: usize) -> Option<(usize, &SentenceParse)> {
        let mut key = String::new();
        let mut found = None;
        for (end, piece) in pieces.iter().enumerate().skip(start) {
            key.push_str(&cache_key(piece));
            if key.len() > self.longest_key {
                break;
            }
            if let Some(parse) = self.sentences.get(&key) {
                found = Some((end, parse));
            }
        }
        found
    }
}

impl DependencyParser for AnnotationCache {
    fn parse(&self, text: &str) -> Vec<SentenceParse> {
        if let Some(sentences) = self.documents.get(&cache_key(text)) {
            return sentences.clone();
        }

        let pieces: Vec<&str> = text.unicode_sentences().collect();
        let mut parses = Vec::new();
        let mut start = 0;
        while start < pieces.len() {
            match self.longest_match(&pieces, start) {
                Some((end, parse)) => {
                    parses.push(parse.clone());
                    start = end + 1;
                }
                None => {
                    tracing::debug!(sentence = pieces[start].trim(), "no cached parse for sentence");
                    start += 1;
                }
            }
        }
        parses
    }
}
