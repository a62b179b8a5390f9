//! A thin stateful shell over the pure interpreters: owns the root schema
//! and the current value tree, and turns edits and pastes into new trees.

use tracing::{debug, warn};

use crate::core::schema::ObjectSchema;
use crate::core::value::Value;
use crate::engine::view::{FocusState, ObjectView, Skin};
use crate::engine::{Edit, object};
use crate::merge::merge_by_config;
use crate::paste::{PasteError, parse_paste};

pub struct EditorSession {
    schema: ObjectSchema,
    value: Value,
}

impl EditorSession {
    /// An empty session: the value starts as `{}` and fills in as the
    /// user edits.
    pub fn new(schema: ObjectSchema) -> Self {
        Self {
            schema,
            value: Value::Object(Default::default()),
        }
    }

    /// Open an externally produced value. This is the load boundary:
    /// list items missing an identity get one minted here, once.
    pub fn with_value(schema: ObjectSchema, value: &Value) -> Self {
        let value = super::adopt_object(&schema, value);
        Self { schema, value }
    }

    pub fn schema(&self) -> &ObjectSchema {
        &self.schema
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn render(&self, focus: &FocusState, skin: Skin) -> ObjectView {
        object::render_object(&self.schema, Some(&self.value), focus, skin)
    }

    /// Apply one edit to the root. Returns whether the tree changed;
    /// `false` means the edit was stale and was dropped.
    pub fn apply(&mut self, edit: Edit) -> bool {
        let mut next = None;
        object::edit_object(&self.schema, Some(&self.value), edit, &mut |v| {
            next = Some(v);
        });
        match next {
            Some(v) => {
                self.value = v;
                true
            }
            None => {
                debug!("stale edit dropped");
                false
            }
        }
    }

    /// Parse pasted text and fold it onto the current value. On a parse
    /// failure the tree is left exactly as it was.
    pub fn paste(&mut self, text: &str) -> Result<(), PasteError> {
        let incoming = match parse_paste(text) {
            Ok(map) => map,
            Err(err) => {
                warn!(%err, "paste rejected");
                return Err(err);
            }
        };
        self.value = merge_by_config(&self.schema, Some(&self.value), &incoming);
        debug!(keys = incoming.len(), "paste merged");
        Ok(())
    }
}
