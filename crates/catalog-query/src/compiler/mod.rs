//! Filter compiler.
//!
//! Translates a [`Filter`] into Parse Server request parameters. Each filter
//! dimension is handled by a small module; [`BookQueryCompiler`] runs them in
//! a fixed order against a shared [`QueryAccumulator`] and applies ordering
//! and paging at the end.
//!
//! Compilation never fails. Problems worth reporting come back as
//! [`CompileWarning`]s in the [`CompiledQuery`].
//!
//! # Example
//!
//! ```
//! use catalog_query::{BookQueryCompiler, Filter};
//! use serde_json::json;
//!
//! let compiler = BookQueryCompiler::new(vec!["system:Incoming".to_string()]);
//! let compiled = compiler.compile_filter(&Filter::new().with_topic("bible"));
//!
//! assert_eq!(compiled.where_clause()["tags"], json!("topic:Bible"));
//! assert_eq!(compiled.where_clause()["draft"], json!(false));
//! ```

pub mod accumulator;
pub mod constraints;
pub mod derivation;
pub mod feature;
pub mod keywords;
pub mod language;
pub mod status;
pub mod tags;
pub mod topic;

use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::{CompilerConfig, DEFAULT_UNBOUNDED_LIMIT};
use crate::error::{CatalogError, CatalogResult, CompileWarning};
use crate::search::{SplitSearch, facets, full_text, split_string};
use crate::types::{BookOrderingScheme, CompiledQuery, Filter, QueryParams};
use crate::vocabulary::{DEFAULT_NO_LANGUAGE_CODE, TopicVocabulary};

pub use accumulator::QueryAccumulator;

const SCORE: &str = "$score";

/// Ordering and paging requested alongside a filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// How results are sorted.
    pub ordering: BookOrderingScheme,
    /// Page size; overrides the params' limit.
    pub limit: Option<u64>,
    /// Page offset; overrides the params' skip.
    pub skip: Option<u64>,
}

impl CompileOptions {
    /// Options with the given ordering scheme.
    pub fn ordered(ordering: BookOrderingScheme) -> Self {
        Self {
            ordering,
            ..Default::default()
        }
    }

    /// Sets the page size.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the page offset.
    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }
}

/// A compiled `where` object plus what the driver needs to know about it.
struct WhereBuild {
    where_clause: Map<String, Value>,
    has_free_text: bool,
}

/// Compiles book filters into Parse query parameters.
///
/// Holds the known tag literals used to recognize tags in search text and
/// the topic vocabulary. A compiler is cheap to share between threads.
#[derive(Debug)]
pub struct BookQueryCompiler {
    known_tags: Vec<String>,
    topics: TopicVocabulary,
    no_language_code: String,
    unbounded_limit: u64,
    /// Set once the underivable `derivedFrom` warning has been logged.
    warned_about_derivation: AtomicBool,
}

impl BookQueryCompiler {
    /// Creates a compiler with the built-in vocabularies.
    pub fn new(known_tags: Vec<String>) -> Self {
        Self {
            known_tags,
            topics: TopicVocabulary::default(),
            no_language_code: DEFAULT_NO_LANGUAGE_CODE.to_string(),
            unbounded_limit: DEFAULT_UNBOUNDED_LIMIT,
            warned_about_derivation: AtomicBool::new(false),
        }
    }

    /// Creates a compiler from validated configuration.
    pub fn from_config(config: &CompilerConfig, known_tags: Vec<String>) -> CatalogResult<Self> {
        config.validate().map_err(CatalogError::Config)?;
        Ok(Self {
            known_tags,
            topics: config.topic_vocabulary(),
            no_language_code: config.no_language_code.trim().to_string(),
            unbounded_limit: config.unbounded_limit,
            warned_about_derivation: AtomicBool::new(false),
        })
    }

    /// Replaces the topic vocabulary.
    pub fn with_topics(mut self, topics: TopicVocabulary) -> Self {
        self.topics = topics;
        self
    }

    /// The known tag literals.
    pub fn known_tags(&self) -> &[String] {
        &self.known_tags
    }

    /// The topic vocabulary.
    pub fn topics(&self) -> &TopicVocabulary {
        &self.topics
    }

    /// Tokenizes a search string against the known tags.
    pub fn split_search(&self, search: &str) -> SplitSearch {
        split_string(search, self.known_tags.as_slice())
    }

    /// Compiles `filter` into `params`.
    ///
    /// The params' `where` is replaced; `order`, `keys` and the rest are kept
    /// unless the ordering scheme says otherwise. A missing filter compiles
    /// as the empty filter.
    pub fn compile(
        &self,
        mut params: QueryParams,
        filter: Option<&Filter>,
        options: CompileOptions,
    ) -> CompiledQuery {
        let mut warnings = Vec::new();
        let empty = Filter::default();
        let filter = match filter {
            Some(filter) => filter,
            None => {
                let warning = CompileWarning::MissingFilter;
                warn!(code = warning.code(), "{}", warning);
                warnings.push(warning);
                &empty
            }
        };

        let build = self.build_where(filter, &mut warnings);
        params.where_clause = build.where_clause;

        if let Some(limit) = options.limit {
            params.limit = Some(limit);
        }
        if let Some(skip) = options.skip {
            params.skip = Some(skip);
        }
        self.apply_ordering(&mut params, options.ordering, build.has_free_text);

        debug!(
            ordering = %options.ordering,
            constraints = params.where_clause.len(),
            warnings = warnings.len(),
            "compiled book query"
        );
        CompiledQuery { params, warnings }
    }

    /// Compiles a filter with empty params and default options.
    pub fn compile_filter(&self, filter: &Filter) -> CompiledQuery {
        self.compile(QueryParams::new(), Some(filter), CompileOptions::default())
    }

    /// Compiles a filter into a count-only request.
    pub fn compile_count(&self, filter: &Filter) -> CompiledQuery {
        let CompiledQuery { params, warnings } = self.compile_filter(filter);
        CompiledQuery {
            params: params.into_count_query(),
            warnings,
        }
    }

    fn apply_ordering(
        &self,
        params: &mut QueryParams,
        ordering: BookOrderingScheme,
        has_free_text: bool,
    ) {
        match ordering {
            BookOrderingScheme::None => params.order = None,
            BookOrderingScheme::NewestCreationsFirst | BookOrderingScheme::LastUploadedFirst => {
                params.order = ordering.order_key().map(str::to_string);
            }
            BookOrderingScheme::TitleAlphabetical => {
                params.limit = Some(self.unbounded_limit);
                params.skip = None;
            }
            BookOrderingScheme::Default => {
                if has_free_text {
                    params.order = Some(SCORE.to_string());
                    if let Some(keys) = params.keys.take() {
                        params.keys = Some(format!("{},{}", SCORE, keys));
                    }
                }
            }
        }
    }

    /// Builds the `where` object for one filter. Recurses for `derivedFrom`
    /// and `anyOfThese`.
    fn build_where(&self, filter: &Filter, warnings: &mut Vec<CompileWarning>) -> WhereBuild {
        let mut query = QueryAccumulator::new(&self.no_language_code);

        let exact_fields = [
            ("publisher", &filter.publisher),
            ("originalPublisher", &filter.original_publisher),
            ("edition", &filter.edition),
            ("brandingProjectName", &filter.branding_project_name),
            ("bookInstanceId", &filter.book_instance_id),
            ("baseUrl", &filter.base_url),
        ];
        for (field, value) in exact_fields {
            if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                query.set(field, Value::String(value.to_string()));
            }
        }

        let mut has_free_text = false;
        if let Some(search) = filter.search.as_deref() {
            let split = self.split_search(search);
            debug!(parts = ?split.special_parts, "tokenized search");
            for part in &split.special_parts {
                facets::apply_special_part(part, &mut query);
            }
            let text = full_text::remove_noise_words(&split.other_search_terms);
            if !text.is_empty() {
                query.set("search", full_text::text_search_clause(&text));
                has_free_text = true;
            }
        }

        if let Some(code) = filter.language.as_deref() {
            language::apply(code, &mut query);
        }

        if let Some(name) = filter.topic.as_deref() {
            topic::apply(&self.topics, name, &mut query.tags);
        }

        if let Some(path) = filter.bookshelf.as_deref().map(str::trim) {
            if !path.is_empty() {
                query.tags.require(&format!("bookshelf:{}", path));
            }
        }

        if let Some(other_tags) = filter.other_tags.as_deref() {
            for tag in other_tags.split(',') {
                query.tags.require(tag);
            }
        }

        if let Some(expression) = filter.feature.as_deref() {
            feature::apply(expression, &mut query);
        }

        status::apply(filter, &mut query);

        if let Some(parent) = filter.derived_from.as_deref() {
            let mut parent_where = self.build_where(parent, warnings).where_clause;
            derivation::strip_lineage_irrelevant(&mut parent_where);
            query.set(
                "bookLineageArray",
                derivation::lineage_constraint(parent_where),
            );
            match derivation::parent_exclusion(parent) {
                Some(clause) => query.and_clauses.push(clause),
                None => self.report_underivable_exclusion(warnings),
            }
        }

        if let Some(alternatives) = filter.any_of_these.as_deref() {
            if !alternatives.is_empty() {
                let mut clauses = Vec::with_capacity(alternatives.len());
                for alternative in alternatives {
                    let build = self.build_where(alternative, warnings);
                    clauses.push(Value::Object(build.where_clause));
                }
                query.set("$or", Value::Array(clauses));
            }
        }

        if let Some(text) = filter.keywords_text.as_deref() {
            keywords::apply(text, &mut query);
        }

        WhereBuild {
            where_clause: query.finish(),
            has_free_text,
        }
    }

    /// Records the warning in this result; logs it only the first time this
    /// compiler sees it.
    fn report_underivable_exclusion(&self, warnings: &mut Vec<CompileWarning>) {
        let warning = CompileWarning::UnderivableParentExclusion;
        if !self.warned_about_derivation.swap(true, Ordering::Relaxed) {
            warn!(code = warning.code(), "{}", warning);
        }
        if !warnings.contains(&warning) {
            warnings.push(warning);
        }
    }
}
