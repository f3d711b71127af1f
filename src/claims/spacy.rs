//! SpacyDoc - spaCy `Doc.to_json()` Ingestion
//!
//! The annotation service runs spaCy and ships its documents as JSON:
//!
//! ```json
//! {
//!   "text": "Vaccines cause autism.",
//!   "sents": [{ "start": 0, "end": 22 }],
//!   "tokens": [
//!     { "id": 0, "start": 0, "end": 8, "pos": "NOUN", "lemma": "vaccine", "dep": "nsubj", "head": 1 },
//!     ...
//!   ]
//! }
//! ```
//!
//! Offsets are character offsets, heads are document-level token ids and a
//! token whose head is itself is the sentence root.

use serde::{Deserialize, Serialize};

use super::parse::{ParseError, PosTag, SentenceParse, Token};

// =============================================================================
// Types
// =============================================================================

/// Character span of one sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacySpan {
    pub start: usize,
    pub end: usize,
}

/// One token as serialized by spaCy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacyToken {
    pub id: usize,
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub pos: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub lemma: String,
    #[serde(default)]
    pub dep: String,
    pub head: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A parsed document as serialized by spaCy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacyDoc {
    pub text: String,
    #[serde(default)]
    pub sents: Vec<SpacySpan>,
    #[serde(default)]
    pub tokens: Vec<SpacyToken>,
}

/// Problems converting a spaCy document into sentence parses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocError {
    InvalidJson(String),
    TokenOffset { token: usize, start: usize, end: usize },
    HeadOutsideSentence { token: usize, head: usize, sentence: usize },
    Sentence { sentence: usize, source: ParseError },
}

impl std::fmt::Display for DocError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocError::InvalidJson(msg) => write!(f, "Invalid spaCy JSON: {}", msg),
            DocError::TokenOffset { token, start, end } => write!(
                f,
                "Token {} has offsets {}..{} outside the document text",
                token, start, end
            ),
            DocError::HeadOutsideSentence { token, head, sentence } => write!(
                f,
                "Token {} in sentence {} points at head {} in another sentence",
                token, sentence, head
            ),
            DocError::Sentence { sentence, source } => {
                write!(f, "Sentence {}: {}", sentence, source)
            }
        }
    }
}

impl std::error::Error for DocError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocError::Sentence { source, .. } => Some(source),
            _ => None,
        }
    }
}

// =============================================================================
// Conversion
// =============================================================================

impl SpacyDoc {
    pub fn from_json(json: &str) -> Result<Self, DocError> {
        serde_json::from_str(json).map_err(|e| DocError::InvalidJson(e.to_string()))
    }

    /// Split the document into validated sentence parses, in document order
    pub fn sentences(&self) -> Result<Vec<SentenceParse>, DocError> {
        let chars: Vec<char> = self.text.chars().collect();
        let slice = |start: usize, end: usize| -> Option<String> {
            (start <= end && end <= chars.len()).then(|| chars[start..end].iter().collect())
        };

        let spans = if self.sents.is_empty() {
            vec![SpacySpan { start: 0, end: chars.len() }]
        } else {
            self.sents.clone()
        };

        let mut sentences = Vec::with_capacity(spans.len());

        for (index, span) in spans.iter().enumerate() {
            let members: Vec<&SpacyToken> = self
                .tokens
                .iter()
                .filter(|t| t.start >= span.start && t.start < span.end)
                .collect();
            if members.is_empty() {
                continue;
            }

            let mut tokens = Vec::with_capacity(members.len());
            for token in &members {
                let text = match &token.text {
                    Some(text) => text.clone(),
                    None => slice(token.start, token.end).ok_or(DocError::TokenOffset {
                        token: token.id,
                        start: token.start,
                        end: token.end,
                    })?,
                };

                let head = if token.head == token.id {
                    None
                } else {
                    let local = members.iter().position(|m| m.id == token.head).ok_or(
                        DocError::HeadOutsideSentence {
                            token: token.id,
                            head: token.head,
                            sentence: index,
                        },
                    )?;
                    Some(local)
                };

                tokens.push(Token {
                    text,
                    lemma: token.lemma.clone(),
                    pos: PosTag::from_tag(&token.pos),
                    dep: token.dep.clone(),
                    head,
                });
            }

            let text = slice(span.start, span.end.min(chars.len())).unwrap_or_default();
            let parse = SentenceParse::with_text(text.trim(), tokens)
                .map_err(|source| DocError::Sentence { sentence: index, source })?;
            sentences.push(parse);
        }

        Ok(sentences)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SENTENCES: &str = r#"{
        "text": "Vaccines cause autism. Share this fast!",
        "sents": [{"start": 0, "end": 22}, {"start": 23, "end": 39}],
        "tokens": [
            {"id": 0, "start": 0, "end": 8, "pos": "NOUN", "tag": "NNS", "lemma": "vaccine", "dep": "nsubj", "head": 1},
            {"id": 1, "start": 9, "end": 14, "pos": "VERB", "tag": "VBP", "lemma": "cause", "dep": "ROOT", "head": 1},
            {"id": 2, "start": 15, "end": 21, "pos": "NOUN", "tag": "NN", "lemma": "autism", "dep": "dobj", "head": 1},
            {"id": 3, "start": 21, "end": 22, "pos": "PUNCT", "tag": ".", "lemma": ".", "dep": "punct", "head": 1},
            {"id": 4, "start": 23, "end": 28, "pos": "VERB", "tag": "VB", "lemma": "share", "dep": "ROOT", "head": 4},
            {"id": 5, "start": 29, "end": 33, "pos": "PRON", "tag": "DT", "lemma": "this", "dep": "dobj", "head": 4},
            {"id": 6, "start": 34, "end": 38, "pos": "ADV", "tag": "RB", "lemma": "fast", "dep": "advmod", "head": 4},
            {"id": 7, "start": 38, "end": 39, "pos": "PUNCT", "tag": ".", "lemma": "!", "dep": "punct", "head": 4}
        ]
    }"#;

    #[test]
    fn test_splits_sentences_and_rebases_heads() {
        let doc = SpacyDoc::from_json(TWO_SENTENCES).unwrap();
        let sentences = doc.sentences().unwrap();

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text(), "Vaccines cause autism.");
        assert_eq!(sentences[1].text(), "Share this fast!");

        let share = &sentences[1];
        assert_eq!(share.root(), 0);
        assert_eq!(share.token(1).head, Some(0));
        assert_eq!(share.token(1).text, "this");
    }

    #[test]
    fn test_token_fields_carried_over() {
        let doc = SpacyDoc::from_json(TWO_SENTENCES).unwrap();
        let sentences = doc.sentences().unwrap();
        let vaccines = sentences[0].token(0);

        assert_eq!(vaccines.text, "Vaccines");
        assert_eq!(vaccines.lemma, "vaccine");
        assert_eq!(vaccines.pos, PosTag::Noun);
        assert_eq!(vaccines.dep, "nsubj");
        assert_eq!(vaccines.head, Some(1));
        assert!(sentences[0].token(1).is_root());
    }

    #[test]
    fn test_missing_sents_means_single_sentence() {
        let json = r#"{
            "text": "Garlic cures cancer",
            "tokens": [
                {"id": 0, "start": 0, "end": 6, "pos": "PROPN", "lemma": "garlic", "dep": "nsubj", "head": 1},
                {"id": 1, "start": 7, "end": 12, "pos": "VERB", "lemma": "cure", "dep": "ROOT", "head": 1},
                {"id": 2, "start": 13, "end": 19, "pos": "NOUN", "lemma": "cancer", "dep": "dobj", "head": 1}
            ]
        }"#;
        let sentences = SpacyDoc::from_json(json).unwrap().sentences().unwrap();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].text(), "Garlic cures cancer");
    }

    #[test]
    fn test_character_offsets_not_bytes() {
        // "Doctors won’t" - the curly apostrophe is 3 bytes but 1 char
        let json = r#"{
            "text": "Doctors won’t lie",
            "tokens": [
                {"id": 0, "start": 0, "end": 7, "pos": "NOUN", "lemma": "doctor", "dep": "nsubj", "head": 3},
                {"id": 1, "start": 8, "end": 10, "pos": "AUX", "lemma": "will", "dep": "aux", "head": 3},
                {"id": 2, "start": 10, "end": 13, "pos": "PART", "lemma": "not", "dep": "neg", "head": 3},
                {"id": 3, "start": 14, "end": 17, "pos": "VERB", "lemma": "lie", "dep": "ROOT", "head": 3}
            ]
        }"#;
        let sentences = SpacyDoc::from_json(json).unwrap().sentences().unwrap();
        assert_eq!(sentences[0].token(2).text, "n’t");
        assert_eq!(sentences[0].token(3).text, "lie");
    }

    #[test]
    fn test_empty_doc_has_no_sentences() {
        let doc = SpacyDoc::from_json(r#"{"text": ""}"#).unwrap();
        assert!(doc.sentences().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let err = SpacyDoc::from_json("{not json").unwrap_err();
        assert!(matches!(err, DocError::InvalidJson(_)));
    }

    #[test]
    fn test_head_in_other_sentence_is_rejected() {
        let json = r#"{
            "text": "A b. C d.",
            "sents": [{"start": 0, "end": 4}, {"start": 5, "end": 9}],
            "tokens": [
                {"id": 0, "start": 0, "end": 1, "pos": "NOUN", "dep": "nsubj", "head": 1},
                {"id": 1, "start": 2, "end": 3, "pos": "VERB", "dep": "ROOT", "head": 1},
                {"id": 2, "start": 5, "end": 6, "pos": "NOUN", "dep": "nsubj", "head": 1},
                {"id": 3, "start": 7, "end": 8, "pos": "VERB", "dep": "ROOT", "head": 3}
            ]
        }"#;
        let err = SpacyDoc::from_json(json).unwrap().sentences().unwrap_err();
        assert_eq!(err, DocError::HeadOutsideSentence { token: 2, head: 1, sentence: 1 });
    }

    #[test]
    fn test_token_offset_out_of_range() {
        let json = r#"{
            "text": "short",
            "tokens": [{"id": 0, "start": 0, "end": 40, "pos": "VERB", "dep": "ROOT", "head": 0}]
        }"#;
        let err = SpacyDoc::from_json(json).unwrap().sentences().unwrap_err();
        assert_eq!(err, DocError::TokenOffset { token: 0, start: 0, end: 40 });
    }

    #[test]
    fn test_invalid_tree_reports_sentence() {
        let json = r#"{
            "text": "a b",
            "tokens": [
                {"id": 0, "start": 0, "end": 1, "pos": "VERB", "dep": "ROOT", "head": 0},
                {"id": 1, "start": 2, "end": 3, "pos": "VERB", "dep": "ROOT", "head": 1}
            ]
        }"#;
        let err = SpacyDoc::from_json(json).unwrap().sentences().unwrap_err();
        assert_eq!(
            err,
            DocError::Sentence { sentence: 0, source: ParseError::RootCount { found: 2 } }
        );
        assert_eq!(err.to_string(), "Sentence 0: Expected exactly one root token, found 2");
    }
}
