//! The user-facing filter description.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::vocabulary::title_case;

/// Three-way switch for boolean book properties.
///
/// Leaving a field unset is not the same as [`BooleanOption::All`]: unset
/// fields fall back to the field's default policy, and only `All` removes
/// the constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BooleanOption {
    /// Only books where the property is true.
    Yes,
    /// Only books where the property is false.
    No,
    /// No constraint.
    All,
}

impl fmt::Display for BooleanOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanOption::Yes => write!(f, "Yes"),
            BooleanOption::No => write!(f, "No"),
            BooleanOption::All => write!(f, "All"),
        }
    }
}

impl FromStr for BooleanOption {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yes" | "true" => Ok(BooleanOption::Yes),
            "no" | "false" => Ok(BooleanOption::No),
            "all" => Ok(BooleanOption::All),
            _ => Err(CatalogError::UnknownBooleanOption(s.to_string())),
        }
    }
}

/// A set of constraints on the books to list.
///
/// All fields are optional. Field names serialize in camelCase so filters
/// stored in URLs or sent by the UI decode directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Filter {
    /// Free text, possibly containing `field:value` facets and tag literals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// ISO language code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Topic name, or a comma-separated list of them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Slash-delimited bookshelf path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookshelf: Option<String>,
    /// Feature name, or `"a OR b"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    /// Comma-separated tag literals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_tags: Option<String>,
    /// Circulation switch; unset means circulating books only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_circulation: Option<BooleanOption>,
    /// Draft switch; unset means non-drafts only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<BooleanOption>,
    /// Rebrand switch; unset leaves rebrands unconstrained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebrand: Option<BooleanOption>,
    /// The collection these books must be derived from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<Box<Filter>>,
    /// Alternatives; a book matching any of them qualifies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_of_these: Option<Vec<Filter>>,
    /// Keywords matched against stemmed keywords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords_text: Option<String>,
    /// Exact publisher name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Exact original publisher name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_publisher: Option<String>,
    /// Exact edition name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    /// Exact branding project name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branding_project_name: Option<String>,
    /// Exact book instance id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_instance_id: Option<String>,
    /// Exact base URL of the uploaded book.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// A column filter from the staff grid, e.g. `("uploader", "joe@")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    /// Facet label the column maps to.
    pub column: String,
    /// Value typed into the column header.
    pub value: String,
}

impl Filter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a filter from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the free-text search.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the language code.
    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.language = Some(code.into());
        self
    }

    /// Sets the topic as given.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Sets the topic from raw UI input, title-casing it first.
    pub fn with_topic_from_ui(self, topic: &str) -> Self {
        self.with_topic(title_case(topic))
    }

    /// Sets the bookshelf path.
    pub fn with_bookshelf(mut self, bookshelf: impl Into<String>) -> Self {
        self.bookshelf = Some(bookshelf.into());
        self
    }

    /// Sets the feature expression.
    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.feature = Some(feature.into());
        self
    }

    /// Sets the comma-separated extra tags.
    pub fn with_other_tags(mut self, tags: impl Into<String>) -> Self {
        self.other_tags = Some(tags.into());
        self
    }

    /// Sets the circulation switch.
    pub fn with_in_circulation(mut self, option: BooleanOption) -> Self {
        self.in_circulation = Some(option);
        self
    }

    /// Sets the draft switch.
    pub fn with_draft(mut self, option: BooleanOption) -> Self {
        self.draft = Some(option);
        self
    }

    /// Sets the rebrand switch.
    pub fn with_rebrand(mut self, option: BooleanOption) -> Self {
        self.rebrand = Some(option);
        self
    }

    /// Restricts to books derived from the books matching `parent`.
    pub fn with_derived_from(mut self, parent: Filter) -> Self {
        self.derived_from = Some(Box::new(parent));
        self
    }

    /// Sets the alternatives.
    pub fn with_any_of_these(mut self, alternatives: Vec<Filter>) -> Self {
        self.any_of_these = Some(alternatives);
        self
    }

    /// Sets the keyword text.
    pub fn with_keywords_text(mut self, text: impl Into<String>) -> Self {
        self.keywords_text = Some(text.into());
        self
    }

    /// Sets the exact publisher.
    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    /// Sets the exact branding project.
    pub fn with_branding_project_name(mut self, name: impl Into<String>) -> Self {
        self.branding_project_name = Some(name.into());
        self
    }

    /// Folds staff-grid column filters into the search text as facets.
    ///
    /// Values are quoted so they may contain spaces. Backslashes and
    /// embedded quotes are escaped so the tokenizer keeps the value intact.
    pub fn with_column_filters(mut self, columns: &[ColumnFilter]) -> Self {
        let mut parts: Vec<String> = self
            .search
            .take()
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();

        for column in columns {
            let value = column.value.trim();
            if value.is_empty() {
                continue;
            }
            let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
            parts.push(format!("{}:\"{}\"", column.column, escaped));
        }

        if !parts.is_empty() {
            self.search = Some(parts.join(" "));
        }
        self
    }

    /// Returns `true` if the filter constrains nothing at all.
    pub fn is_empty(&self) -> bool {
        self == &Filter::default()
    }
}
