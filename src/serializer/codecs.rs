//! Custom encodings for types whose save form differs from their fields.
//!
//! A codec node is `{"type": <name>, "wrapped": <encoding>}`.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::Serializer;
use crate::edit::EditType;
use crate::history::EditStack;

/// Raw RGBA8 bytes, saved as a plain list of numbers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "PixelArrayNode", into = "PixelArrayNode")]
pub struct PixelArray(pub Vec<u8>);

#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
enum PixelArrayNode {
    PixelArray { wrapped: Vec<u8> },
}

impl From<PixelArrayNode> for PixelArray {
    fn from(node: PixelArrayNode) -> Self {
        let PixelArrayNode::PixelArray { wrapped } = node;
        Self(wrapped)
    }
}

impl From<PixelArray> for PixelArrayNode {
    fn from(array: PixelArray) -> Self {
        PixelArrayNode::PixelArray { wrapped: array.0 }
    }
}

pub(crate) fn encode_edit_stack(serializer: &Serializer, stack: &EditStack) -> Value {
    json!({
        "type": "EditStack",
        "wrapped": {
            "edits": serializer.serialize(stack.edits()),
            "pendingEdit": serializer.serialize(&stack.pending_edit()),
            "postEdits": serializer.serialize(stack.post_edits()),
            "redoEdits": serializer.serialize(stack.redo_edits()),
        }
    })
}

/// Rebuild a stack from the `wrapped` part of its node. Entries that fail to
/// resolve are dropped from their list; an unresolvable pending slot is empty.
pub(crate) fn decode_edit_stack(serializer: &Serializer, wrapped: &Value) -> EditStack {
    let list = |key: &str| -> Vec<EditType> {
        wrapped
            .get(key)
            .map(|tree| serializer.deserialize_list(tree))
            .unwrap_or_default()
    };
    let pending = wrapped
        .get("pendingEdit")
        .filter(|tree| !tree.is_null())
        .and_then(|tree| serializer.deserialize::<EditType>(tree));
    let stack = EditStack::from_parts(list("edits"), pending, list("postEdits"), list("redoEdits"));
    log::debug!(
        "Restored edit stack with {} edits, {} ahead, {} to redo",
        stack.edits().len(),
        stack.post_edits().len(),
        stack.redo_edits().len()
    );
    stack
}
