//! ClaimCore: Atomic Claim Decomposition
//!
//! A Rust/WASM implementation of the claim decomposer used by the health
//! misinformation checker. Sentences arrive already parsed (tokens, POS
//! tags, lemmas and dependency edges from an external annotation service);
//! ClaimCore turns them into short, lowercased, single-predicate claims
//! that downstream retrieval can match one at a time.
//!
//! # Architecture
//!
//! ## Claim Components
//! - `parse.rs` - SentenceParse: validated token arena + subtree spans
//! - `spacy.rs` - SpacyDoc: ingestion of spaCy `Doc.to_json()` output
//! - `config.rs` - ClaimConfig: lexical sets and label sets
//! - `filter.rs` - NonClaimFilter / ReportingVerbFilter
//! - `predicate.rs` - PredicateLocator: root predicate + conjunct expansion
//! - `roles.rs` - RoleResolver: subjects (with inheritance) and objects
//! - `assembler.rs` - ClaimAssembler + order-preserving deduplication
//! - `extractor.rs` - ClaimExtractor: the per-document pipeline
//! - `annotations.rs` - AnnotationCache: parser backed by hydrated parses
//! - `cortex.rs` - ClaimCortex: WASM bindings
//!
//! # Usage (Rust)
//! ```rust,ignore
//! use claimcore::{AnnotationCache, ClaimConfig, ClaimExtractor, SpacyDoc};
//!
//! let mut cache = AnnotationCache::new();
//! cache.hydrate_doc(&SpacyDoc::from_json(spacy_json)?)?;
//!
//! let extractor = ClaimExtractor::new(cache, &ClaimConfig::default())?;
//! let claims = extractor.extract_atomic_claims("Vaccines weaken immunity and cause autism.");
//! assert_eq!(claims, vec!["vaccines weaken immunity", "vaccines cause autism"]);
//! ```
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { ClaimCortex } from 'claimcore';
//!
//! await init();
//! const cortex = new ClaimCortex();
//! cortex.hydrateDoc(spacyDocJson);
//! console.log(cortex.extract("Vaccines cause autism. Share this fast!"));
//! // ["vaccines cause autism"]
//! ```

pub mod claims;

pub use claims::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("claimcore v{}", env!("CARGO_PKG_VERSION"))
}
