//! Tagged save trees.
//!
//! Values are converted to and from [`serde_json::Value`]. Registered types
//! carry a `type` tag so polymorphic edits come back as the right variant.
//! Decoding never fails as a whole: a node with an unknown tag, a dropped
//! tag, or a body that does not decode becomes `None` and is filtered out of
//! the list that held it.

pub mod codecs;

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::history::EditStack;

pub use codecs::PixelArray;

/// Key holding a node's type name.
pub const TYPE_TAG: &str = "type";

/// How a registered type name is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeEntry {
    /// Encoded field by field next to its tag.
    Fields,
    /// Encoded by a custom codec under `wrapped`.
    Codec,
    /// Recognized but intentionally discarded on load.
    Dropped,
}

/// Registry of every type name a save tree may contain.
#[derive(Debug, Clone)]
pub struct TypeMap {
    entries: HashMap<&'static str, TypeEntry>,
}

impl Default for TypeMap {
    fn default() -> Self {
        let mut map = Self {
            entries: HashMap::new(),
        };
        for name in [
            "Point",
            "Color",
            "Select",
            "Move",
            "Line",
            "StraightLine",
            "GridLine",
            "Rect",
            "FillRect",
            "Clear",
            "TextEdit",
            "BucketFill",
            "Paste",
            "PasteData",
            "Pen",
        ] {
            map.register(name, TypeEntry::Fields);
        }
        for name in ["EditStack", "TextEditor", "PixelArray"] {
            map.register(name, TypeEntry::Codec);
        }
        // Legacy names: the abstract base and the removed preview edit.
        for name in ["Edit", "Preview"] {
            map.register(name, TypeEntry::Dropped);
        }
        map
    }
}

impl TypeMap {
    pub fn register(&mut self, name: &'static str, entry: TypeEntry) {
        self.entries.insert(name, entry);
    }

    pub fn get(&self, name: &str) -> Option<TypeEntry> {
        self.entries.get(name).copied()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Serializer {
    types: TypeMap,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_types(types: TypeMap) -> Self {
        Self { types }
    }

    pub fn types(&self) -> &TypeMap {
        &self.types
    }

    /// Encode `value`. Nodes whose tag is not registered, or is registered
    /// as dropped, encode as `null` inside objects and are left out of lists.
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Value {
        match serde_json::to_value(value) {
            Ok(tree) => self.resolve(tree).unwrap_or(Value::Null),
            Err(e) => {
                log::warn!("Failed to serialize value: {}", e);
                Value::Null
            }
        }
    }

    /// Decode one node. Unknown tags and undecodable bodies log a warning and
    /// yield `None`; dropped tags yield `None` quietly. Tags are checked at
    /// every depth, so a dropped or unknown child fails its parent.
    pub fn deserialize<T: DeserializeOwned>(&self, tree: &Value) -> Option<T> {
        let resolved = self.resolve(tree.clone())?;
        match T::deserialize(resolved) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Corrupt {} node: {}", tag_of(tree).unwrap_or("untagged"), e);
                None
            }
        }
    }

    /// Walk a tree against the type map. An object whose tag is unknown or
    /// dropped resolves to `None`; in an object it becomes `null`, in a list
    /// it is removed.
    fn resolve(&self, tree: Value) -> Option<Value> {
        match tree {
            Value::Object(map) => {
                if let Some(tag) = map.get(TYPE_TAG).and_then(Value::as_str) {
                    match self.types.get(tag) {
                        None => {
                            log::warn!("Missing type: {}", tag);
                            return None;
                        }
                        Some(TypeEntry::Dropped) => {
                            log::debug!("Dropping {} node", tag);
                            return None;
                        }
                        Some(_) => {}
                    }
                }
                let map = map
                    .into_iter()
                    .map(|(key, child)| (key, self.resolve(child).unwrap_or(Value::Null)))
                    .collect();
                Some(Value::Object(map))
            }
            Value::Array(items) => Some(Value::Array(
                items.into_iter().filter_map(|item| self.resolve(item)).collect(),
            )),
            other => Some(other),
        }
    }

    /// Decode an array node, keeping only the entries that resolve.
    pub fn deserialize_list<T: DeserializeOwned>(&self, tree: &Value) -> Vec<T> {
        match tree {
            Value::Array(items) => items.iter().filter_map(|item| self.deserialize(item)).collect(),
            Value::Null => Vec::new(),
            other => {
                log::warn!("Expected a list, found {}", kind_of(other));
                Vec::new()
            }
        }
    }

    pub fn serialize_edit_stack(&self, stack: &EditStack) -> Value {
        codecs::encode_edit_stack(self, stack)
    }

    /// Restore a stack from an `EditStack` node. The restored stack asks
    /// for a full replay.
    pub fn deserialize_edit_stack(&self, tree: &Value) -> Option<EditStack> {
        match tag_of(tree) {
            Some("EditStack") => {}
            Some(tag) => {
                log::warn!("Expected an EditStack node, found {}", tag);
                return None;
            }
            None => {
                log::warn!("Expected an EditStack node, found untagged {}", kind_of(tree));
                return None;
            }
        }
        match tree.get("wrapped") {
            Some(wrapped) if wrapped.is_object() => Some(codecs::decode_edit_stack(self, wrapped)),
            _ => {
                log::warn!("EditStack node has no wrapped lists");
                None
            }
        }
    }
}

fn tag_of(tree: &Value) -> Option<&str> {
    tree.get(TYPE_TAG).and_then(Value::as_str)
}

fn kind_of(tree: &Value) -> &'static str {
    match tree {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
