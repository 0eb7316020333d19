//! Search-text handling: tokenizing, facet dispatch and full-text terms.

pub mod facets;
pub mod full_text;
pub mod tokenizer;

pub use tokenizer::{SplitSearch, split_string};
