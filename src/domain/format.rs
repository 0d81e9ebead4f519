//! Markup representations and detection of selected text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Indentation shorthand
    Pseudocode,
    /// BEMJSON tree
    Json,
    Html,
    Scss,
    Css,
}

impl Format {
    pub const ALL: [Format; 5] = [
        Format::Pseudocode,
        Format::Json,
        Format::Html,
        Format::Scss,
        Format::Css,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Pseudocode => "pseudocode",
            Format::Json => "json",
            Format::Html => "html",
            Format::Scss => "scss",
            Format::Css => "css",
        }
    }

    /// Target used when the caller does not name one.
    pub fn default_target(&self) -> Option<Format> {
        match self {
            Format::Pseudocode | Format::Json => Some(Format::Html),
            Format::Html => Some(Format::Scss),
            Format::Scss | Format::Css => None,
        }
    }

    /// Classify selected text by its first non-blank character.
    ///
    /// Returns `None` for blank text.
    pub fn detect(text: &str) -> Option<Format> {
        match text.trim().chars().next()? {
            '<' => Some(Format::Html),
            '{' => Some(Format::Json),
            _ => Some(Format::Pseudocode),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Format {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pseudocode" | "pseudo" => Ok(Format::Pseudocode),
            "json" | "bemjson" => Ok(Format::Json),
            "html" => Ok(Format::Html),
            "scss" => Ok(Format::Scss),
            "css" => Ok(Format::Css),
            other => Err(DomainError::UnknownFormat(other.to_string())),
        }
    }
}
