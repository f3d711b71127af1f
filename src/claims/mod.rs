pub mod parse;
pub mod spacy;
pub mod config;
pub mod filter;
pub mod predicate;
pub mod roles;
pub mod assembler;
pub mod extractor;
pub mod annotations;
pub mod cortex;

pub use parse::*;
pub use spacy::*;
pub use config::*;
pub use filter::*;
pub use predicate::*;
pub use roles::*;
pub use assembler::*;
pub use extractor::*;
pub use annotations::*;
pub use cortex::*;
