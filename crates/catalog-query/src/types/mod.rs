//! Core types for the catalog query layer.
//!
//! - [`Filter`], [`BooleanOption`], [`ColumnFilter`] - what the user asked for
//! - [`BookOrderingScheme`] - how results are sorted
//! - [`QueryParams`], [`CompiledQuery`] - what gets sent to the backend
//!
//! # Example
//!
//! ```
//! use catalog_query::types::{BooleanOption, Filter};
//!
//! let filter = Filter::new()
//!     .with_search("frogs level:1")
//!     .with_language("en")
//!     .with_draft(BooleanOption::All);
//!
//! assert_eq!(filter.language.as_deref(), Some("en"));
//! ```

mod filter;
mod ordering;
mod query;

pub use filter::{BooleanOption, ColumnFilter, Filter};
pub use ordering::BookOrderingScheme;
pub use query::{CompiledQuery, QueryParams};
