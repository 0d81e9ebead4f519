//! Strips internal bookkeeping from raw BEMJSON before rendering.

use serde_json::{Map, Value};
use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};

/// Fields starting with this prefix never reach a renderer.
pub const INTERNAL_PREFIX: char = '_';

pub struct TreeSanitizer {
    max_depth: usize,
}

impl TreeSanitizer {
    /// `max_depth` bounds object nesting; arrays do not count as a level.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Remove `_`-prefixed fields everywhere and move block modifiers of
    /// element nodes into their element modifier slot.
    #[instrument(level = "debug", skip(self, value))]
    pub fn clean(&self, value: Value) -> DomainResult<Value> {
        self.clean_at(value, 0)
    }

    fn clean_at(&self, value: Value, level: usize) -> DomainResult<Value> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| self.clean_at(item, level))
                .collect::<DomainResult<Vec<_>>>()
                .map(Value::Array),
            Value::Object(obj) => {
                if level >= self.max_depth {
                    return Err(DomainError::NestingTooDeep {
                        limit: self.max_depth,
                    });
                }
                let mut cleaned = Map::new();
                for (key, field) in obj {
                    if key.starts_with(INTERNAL_PREFIX) {
                        continue;
                    }
                    cleaned.insert(key, self.clean_at(field, level + 1)?);
                }
                migrate_block_mods(&mut cleaned);
                Ok(Value::Object(cleaned))
            }
            other => Ok(other),
        }
    }
}

/// An element carrying `mods` but no `elemMods` gets them moved over.
fn migrate_block_mods(obj: &mut Map<String, Value>) {
    let is_elem = obj
        .get("elem")
        .is_some_and(|elem| !matches!(elem, Value::Null | Value::Bool(false)) && elem != "");
    if !is_elem || obj.contains_key("elemMods") {
        return;
    }
    if let Some(mods) = obj.remove("mods") {
        trace!("moving mods to elemMods");
        obj.insert("elemMods".into(), mods);
    }
}
