//! Renderer-facing BEMJSON tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::{DomainError, DomainResult};

/// One BEMJSON node.
///
/// A node is a block when it has `block` and no `elem`; with `elem` it is an
/// element of `block` or, when `block` is absent, of the nearest ancestor block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BemNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Block modifiers; values are `true` or a string value
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mods: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub elem_mods: BTreeMap<String, Value>,
    /// Extra CSS classes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cls: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

/// Content of a node: literal text, one nested node, or a list of both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Items(Vec<ContentItem>),
    Node(Box<BemNode>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentItem {
    Text(String),
    Node(BemNode),
}

impl BemNode {
    /// Deserialize a sanitized JSON value.
    pub fn from_value(value: Value) -> DomainResult<Self> {
        if !value.is_object() {
            return Err(DomainError::InvalidJson(
                "top level must be an object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| DomainError::InvalidJson(e.to_string()))
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_pretty_json(&self) -> DomainResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DomainError::InvalidJson(e.to_string()))
    }

    /// Child nodes in document order; text items are skipped.
    pub fn child_nodes(&self) -> Vec<&BemNode> {
        match &self.content {
            Some(Content::Items(items)) => items
                .iter()
                .filter_map(|item| match item {
                    ContentItem::Node(node) => Some(node),
                    ContentItem::Text(_) => None,
                })
                .collect(),
            Some(Content::Node(node)) => vec![node.as_ref()],
            Some(Content::Text(_)) | None => Vec::new(),
        }
    }

    /// Block this node belongs to, given the block of its context.
    pub fn resolve_block<'a>(&'a self, context: Option<&'a str>) -> Option<&'a str> {
        self.block.as_deref().or(context)
    }
}

/// Enabled modifiers as `name` or `name_value` suffixes, sorted by name.
pub fn modifier_suffixes(mods: &BTreeMap<String, Value>) -> Vec<String> {
    mods.iter()
        .filter_map(|(name, value)| match value {
            Value::Bool(true) => Some(name.clone()),
            Value::String(s) if !s.is_empty() => Some(format!("{}_{}", name, s)),
            Value::Number(n) => Some(format!("{}_{}", name, n)),
            _ => None,
        })
        .collect()
}
