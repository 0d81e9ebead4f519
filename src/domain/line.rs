//! Tokenizer for single shorthand lines.
//!
//! A line has the shape `<indent><token> <free text>` where the token is
//! `[tag.]name[--mod1--mod2...][*count]`.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

pub const DEFAULT_TAG: &str = "div";
const MOD_DELIMITER: &str = "--";

/// Name of a node: the root is a block, everything below it an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BemName {
    Block(String),
    Elem(String),
}

impl BemName {
    pub fn as_str(&self) -> &str {
        match self {
            BemName::Block(name) | BemName::Elem(name) => name,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, BemName::Block(_))
    }
}

impl fmt::Display for BemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BemName::Block(name) => write!(f, "block {}", name),
            BemName::Elem(name) => write!(f, "elem {}", name),
        }
    }
}

/// Node descriptor produced from one shorthand line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineData {
    /// Raw source line
    pub line: String,
    /// Width of the leading whitespace
    pub depth: usize,
    pub tag: String,
    pub name: BemName,
    /// Block modifiers for a root, element modifiers otherwise
    pub modifiers: BTreeMap<String, bool>,
    /// How many sibling copies this line stands for
    pub multiplicity: u32,
    /// Trailing free text
    pub text: Option<String>,
}

/// Splits shorthand lines into [`LineData`].
pub struct LineParser {
    line_regex: Regex,
    default_tag: String,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new(DEFAULT_TAG)
    }
}

impl LineParser {
    pub fn new(default_tag: &str) -> Self {
        Self {
            line_regex: Regex::new(r"^(\s*)([A-Za-z0-9*.\-]+) *(.*)$")
                .expect("line pattern is valid"),
            default_tag: default_tag.to_string(),
        }
    }

    /// Parse one line.
    ///
    /// `has_previous` is false only for the first node of a document: that node
    /// becomes the root, gets depth 0 whatever its indentation, and takes the
    /// block name and modifier slots.
    ///
    /// Returns `Ok(None)` when the token yields an empty name (e.g. `*3`); the
    /// caller skips such lines like blank ones.
    #[instrument(level = "trace", skip(self))]
    pub fn parse(
        &self,
        line: &str,
        line_number: usize,
        has_previous: bool,
    ) -> DomainResult<Option<LineData>> {
        let malformed = || DomainError::MalformedLine {
            line_number,
            line: line.to_string(),
        };

        let caps = self.line_regex.captures(line).ok_or_else(malformed)?;
        let indent = caps.get(1).map_or("", |m| m.as_str());
        let token = caps.get(2).map_or("", |m| m.as_str());
        let text = caps
            .get(3)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let depth = if has_previous {
            indent.chars().count()
        } else {
            0
        };

        let mut dot_parts = token.split('.');
        let first = dot_parts.next().unwrap_or_default();
        let second = dot_parts.next().unwrap_or_default();
        let (tag, classname) = match (first.is_empty(), second.is_empty()) {
            (false, true) => (self.default_tag.as_str(), first),
            (false, false) => (first, second),
            (true, _) => return Err(malformed()),
        };

        let mut star_parts = classname.split('*');
        let left = star_parts.next().unwrap_or_default();
        let multiplicity = star_parts
            .next()
            .and_then(|count| count.parse::<u32>().ok())
            .filter(|count| *count >= 1)
            .unwrap_or(1);

        let mut mod_parts = left.split(MOD_DELIMITER);
        let name = mod_parts.next().unwrap_or_default();
        if name.is_empty() {
            return Ok(None);
        }
        let modifiers: BTreeMap<String, bool> = mod_parts
            .filter(|m| !m.is_empty())
            .map(|m| (m.to_string(), true))
            .collect();

        let name = if has_previous {
            BemName::Elem(name.to_string())
        } else {
            BemName::Block(name.to_string())
        };

        Ok(Some(LineData {
            line: line.to_string(),
            depth,
            tag: tag.to_string(),
            name,
            modifiers,
            multiplicity,
            text,
        }))
    }
}
