//! ClaimCortex: WASM bindings for claim extraction
//!
//! Wraps a [`ClaimExtractor`] over an [`AnnotationCache`]. The JS side runs
//! the annotation service, hydrates the cortex with the spaCy documents it
//! got back, then asks for claims.
//!
//! ```javascript,ignore
//! const cortex = new ClaimCortex({ reporting_verbs: ["say", "allege"] });
//! cortex.hydrateDoc(doc);                 // spaCy Doc.to_json()
//! cortex.extract(doc.text);               // ["vaccines cause autism"]
//! cortex.extractDetailed(doc.text);       // { claims: [...], stats: {...} }
//! ```

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use super::annotations::AnnotationCache;
use super::assembler::AtomicClaim;
use super::config::ClaimConfig;
use super::extractor::{ClaimExtractor, ExtractionStats};
use super::spacy::SpacyDoc;

/// Result of `extractDetailed`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimReport {
    pub claims: Vec<AtomicClaim>,
    pub stats: ExtractionStats,
}

#[wasm_bindgen]
pub struct ClaimCortex {
    extractor: ClaimExtractor<AnnotationCache>,
}

#[wasm_bindgen]
impl ClaimCortex {
    /// Create a cortex. `config` may be null/undefined or a partial
    /// ClaimConfig object.
    #[wasm_bindgen(constructor)]
    pub fn js_new(config: JsValue) -> Result<ClaimCortex, JsValue> {
        let config: ClaimConfig = if config.is_null() || config.is_undefined() {
            ClaimConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };

        Self::with_config(&config).map_err(|e| JsValue::from_str(&e))
    }

    /// Hydrate with a spaCy document object
    #[wasm_bindgen(js_name = hydrateDoc)]
    pub fn js_hydrate_doc(&mut self, doc: JsValue) -> Result<usize, JsValue> {
        let doc: SpacyDoc = serde_wasm_bindgen::from_value(doc)
            .map_err(|e| JsValue::from_str(&format!("Invalid spaCy doc: {}", e)))?;
        self.hydrate_doc(&doc).map_err(|e| JsValue::from_str(&e))
    }

    /// Hydrate with a spaCy document as a JSON string
    #[wasm_bindgen(js_name = hydrateDocJson)]
    pub fn js_hydrate_doc_json(&mut self, json: &str) -> Result<usize, JsValue> {
        self.hydrate_doc_json(json).map_err(|e| JsValue::from_str(&e))
    }

    /// Claim strings for `text` (string[])
    #[wasm_bindgen(js_name = extract)]
    pub fn js_extract(&self, text: &str) -> JsValue {
        to_js(&self.extract(text))
    }

    /// Claims with subject/predicate/object parts plus stats
    #[wasm_bindgen(js_name = extractDetailed)]
    pub fn js_extract_detailed(&self, text: &str) -> JsValue {
        to_js(&self.extract_detailed(text))
    }

    #[wasm_bindgen(js_name = sentenceCount)]
    pub fn sentence_count(&self) -> usize {
        self.extractor.parser().sentence_count()
    }

    pub fn clear(&mut self) {
        self.extractor.parser_mut().clear();
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    match serde_wasm_bindgen::to_value(value) {
        Ok(v) => v,
        Err(e) => {
            web_sys::console::error_1(&format!("[ClaimCortex] Serialization failed: {:?}", e).into());
            JsValue::NULL
        }
    }
}

impl ClaimCortex {
    pub fn with_config(config: &ClaimConfig) -> Result<Self, String> {
        let extractor = ClaimExtractor::new(AnnotationCache::new(), config)
            .map_err(|e| e.to_string())?;
        Ok(Self { extractor })
    }

    pub fn hydrate_doc(&mut self, doc: &SpacyDoc) -> Result<usize, String> {
        self.extractor
            .parser_mut()
            .hydrate_doc(doc)
            .map_err(|e| format!("Failed to hydrate doc: {}", e))
    }

    pub fn hydrate_doc_json(&mut self, json: &str) -> Result<usize, String> {
        self.extractor
            .parser_mut()
            .hydrate_json(json)
            .map_err(|e| format!("Failed to hydrate doc: {}", e))
    }

    pub fn extract(&self, text: &str) -> Vec<String> {
        self.extractor.extract_atomic_claims(text)
    }

    pub fn extract_detailed(&self, text: &str) -> ClaimReport {
        let (claims, stats) = self.extractor.extract_with_stats(text);
        ClaimReport { claims, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "text": "Vaccines cause autism. Share this fast!",
        "sents": [{"start": 0, "end": 22}, {"start": 23, "end": 39}],
        "tokens": [
            {"id": 0, "start": 0, "end": 8, "pos": "NOUN", "lemma": "vaccine", "dep": "nsubj", "head": 1},
            {"id": 1, "start": 9, "end": 14, "pos": "VERB", "lemma": "cause", "dep": "ROOT", "head": 1},
            {"id": 2, "start": 15, "end": 21, "pos": "NOUN", "lemma": "autism", "dep": "dobj", "head": 1},
            {"id": 3, "start": 21, "end": 22, "pos": "PUNCT", "lemma": ".", "dep": "punct", "head": 1},
            {"id": 4, "start": 23, "end": 28, "pos": "VERB", "lemma": "share", "dep": "ROOT", "head": 4},
            {"id": 5, "start": 29, "end": 33, "pos": "PRON", "lemma": "this", "dep": "dobj", "head": 4},
            {"id": 6, "start": 34, "end": 38, "pos": "ADV", "lemma": "fast", "dep": "advmod", "head": 4},
            {"id": 7, "start": 38, "end": 39, "pos": "PUNCT", "lemma": "!", "dep": "punct", "head": 4}
        ]
    }"#;

    fn cortex() -> ClaimCortex {
        ClaimCortex::with_config(&ClaimConfig::default()).unwrap()
    }

    #[test]
    fn test_default_config_builds_empty_cortex() {
        let cortex = ClaimCortex::with_config(&ClaimConfig::default()).unwrap();
        assert_eq!(cortex.sentence_count(), 0);
        assert!(cortex.extract("Vaccines cause autism.").is_empty());
    }

    #[test]
    fn test_hydrate_and_extract() {
        let mut cortex = cortex();
        assert_eq!(cortex.hydrate_doc_json(DOC).unwrap(), 2);
        assert_eq!(cortex.sentence_count(), 2);

        let claims = cortex.extract("Vaccines cause autism. Share this fast!");
        assert_eq!(claims, vec!["vaccines cause autism"]);
    }

    #[test]
    fn test_extract_detailed_report() {
        let mut cortex = cortex();
        cortex.hydrate_doc_json(DOC).unwrap();

        let report = cortex.extract_detailed("Vaccines cause autism. Share this fast!");
        assert_eq!(report.claims.len(), 1);
        assert_eq!(report.claims[0].object.as_deref(), Some("autism"));
        assert_eq!(report.stats.sentences, 2);
        assert_eq!(report.stats.rejected_non_claim, 1);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["claims"][0]["text"], "vaccines cause autism");
    }

    #[test]
    fn test_custom_config() {
        let config = ClaimConfig::default().with_non_claim_markers(Vec::<String>::new());
        let mut cortex = ClaimCortex::with_config(&config).unwrap();
        cortex.hydrate_doc_json(DOC).unwrap();

        // "Share this fast!" has no subject, so it still yields nothing
        let report = cortex.extract_detailed("Vaccines cause autism. Share this fast!");
        assert_eq!(report.stats.rejected_non_claim, 0);
        assert_eq!(report.stats.subjectless_predicates, 1);
    }

    #[test]
    fn test_bad_doc_and_clear() {
        let mut cortex = cortex();
        let err = cortex.hydrate_doc_json("{").unwrap_err();
        assert!(err.starts_with("Failed to hydrate doc: Invalid spaCy JSON"));

        cortex.hydrate_doc_json(DOC).unwrap();
        cortex.clear();
        assert_eq!(cortex.sentence_count(), 0);
        assert!(cortex.extract("Vaccines cause autism.").is_empty());
    }
}
