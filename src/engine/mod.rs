//! The schema interpreter: one polymorphic dispatch point for rendering
//! and one for edits. Every interpreter is a pure function of
//! (schema slice, value slice) producing new slices; edits propagate
//! upward by composing the parent's `on_change` continuation with a
//! functional rebuild of the owned slice. Nothing here retains value
//! state or suspends.

pub mod leaf;
pub mod list;
pub mod object;
pub mod session;
pub mod view;

use tracing::trace;

use crate::core::identity::ItemId;
use crate::core::schema::FieldSchema;
use crate::core::value::Value;
use view::{FocusState, Rendered, Skin};

/// A discrete user action against some slice of the tree, addressed
/// structurally: field keys walk into objects, identities walk into
/// lists, `Set` replaces a scalar leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Replace a scalar leaf's payload.
    Set(Value),
    /// Route into a named object field.
    Field { key: String, edit: Box<Edit> },
    /// Route into the list element with this identity.
    Item { id: ItemId, edit: Box<Edit> },
    /// Append a fresh item (identity minted here) to a list.
    Push,
    /// Drop the list element with this identity.
    Remove { id: ItemId },
}

impl Edit {
    pub fn set(value: impl Into<Value>) -> Self {
        Self::Set(value.into())
    }

    pub fn field(key: impl Into<String>, edit: Edit) -> Self {
        Self::Field {
            key: key.into(),
            edit: Box::new(edit),
        }
    }

    pub fn item(id: impl Into<ItemId>, edit: Edit) -> Self {
        Self::Item {
            id: id.into(),
            edit: Box::new(edit),
        }
    }

    pub fn remove(id: impl Into<ItemId>) -> Self {
        Self::Remove { id: id.into() }
    }
}

/// The sole place where "what kind of field is this" is decided for
/// rendering. Both interpreters recurse through here.
pub fn render(
    schema: &FieldSchema,
    value: Option<&Value>,
    focus: &FocusState,
    skin: Skin,
) -> Rendered {
    match schema {
        FieldSchema::Scalar(scalar) => Rendered::Leaf(leaf::render_leaf(scalar, value, skin)),
        FieldSchema::Object(object) => {
            Rendered::Object(object::render_object(object, value, focus, skin))
        }
        FieldSchema::List(list) => Rendered::List(list::render_list(list, value, focus, skin)),
    }
}

/// The same dispatch for edits. An edit whose shape no longer matches the
/// schema kind it lands on is a stale event from an outdated rendering:
/// it is dropped and `on_change` is never called.
pub fn dispatch_edit(
    schema: &FieldSchema,
    value: Option<&Value>,
    edit: Edit,
    on_change: &mut dyn FnMut(Value),
) {
    match schema {
        FieldSchema::Scalar(_) => {
            if let Edit::Set(next) = edit {
                on_change(next);
            }
        }
        FieldSchema::Object(object) => object::edit_object(object, value, edit, on_change),
        FieldSchema::List(list) => list::edit_list(list, value, edit, on_change),
    }
}

/// Apply one edit and capture the root continuation. `None` means the
/// edit was stale and the tree is unchanged.
pub fn apply(schema: &FieldSchema, value: Option<&Value>, edit: Edit) -> Option<Value> {
    let mut next = None;
    dispatch_edit(schema, value, edit, &mut |v| next = Some(v));
    trace!(applied = next.is_some(), "edit dispatched");
    next
}

pub use list::{adopt, adopt_object};
