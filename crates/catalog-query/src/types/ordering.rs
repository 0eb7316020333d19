//! Result ordering policies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// How a list of books is sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BookOrderingScheme {
    /// Relevance when there is free text, otherwise the caller's order.
    #[default]
    Default,
    /// No ordering at all.
    None,
    /// Most recently created first.
    NewestCreationsFirst,
    /// Most recently uploaded first.
    LastUploadedFirst,
    /// Alphabetical by title; the client sorts, so every match is fetched.
    TitleAlphabetical,
}

impl BookOrderingScheme {
    /// The `order` value the scheme imposes, if it imposes one.
    pub fn order_key(&self) -> Option<&'static str> {
        match self {
            BookOrderingScheme::NewestCreationsFirst => Some("-createdAt"),
            BookOrderingScheme::LastUploadedFirst => Some("-lastUploaded"),
            _ => None,
        }
    }
}

impl fmt::Display for BookOrderingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookOrderingScheme::Default => write!(f, "default"),
            BookOrderingScheme::None => write!(f, "none"),
            BookOrderingScheme::NewestCreationsFirst => write!(f, "newest-creations-first"),
            BookOrderingScheme::LastUploadedFirst => write!(f, "last-uploaded-first"),
            BookOrderingScheme::TitleAlphabetical => write!(f, "title-alphabetical"),
        }
    }
}

impl FromStr for BookOrderingScheme {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "default" => Ok(BookOrderingScheme::Default),
            "none" => Ok(BookOrderingScheme::None),
            "newest-creations-first" | "newestcreationsfirst" => {
                Ok(BookOrderingScheme::NewestCreationsFirst)
            }
            "last-uploaded-first" | "lastuploadedfirst" => Ok(BookOrderingScheme::LastUploadedFirst),
            "title-alphabetical" | "titlealphabetical" => Ok(BookOrderingScheme::TitleAlphabetical),
            _ => Err(CatalogError::UnknownOrdering(s.to_string())),
        }
    }
}
