use crate::core::identity::{ID_KEY, ItemId, item_id};
use crate::core::schema::{FieldSchema, ListSchema, ObjectSchema};
use crate::core::value::{Value, ValueMap};
use crate::engine::view::{FocusState, ItemView, ListView, Rendered, Skin};
use crate::engine::{Edit, object};

/// Render each element through the object interpreter over the list's
/// item schema. Element order is exactly array order.
pub(crate) fn render_list(
    schema: &ListSchema,
    value: Option<&Value>,
    focus: &FocusState,
    skin: Skin,
) -> ListView {
    let items = value.and_then(Value::as_list);
    let views = items
        .unwrap_or_default()
        .iter()
        .map(|item| {
            let id = item_id(item);
            ItemView {
                focused: id.as_ref().map(|i| focus.is_focused(i)).unwrap_or(false),
                body: Rendered::Object(object::render_object(
                    &schema.item,
                    Some(item),
                    focus,
                    skin,
                )),
                id,
            }
        })
        .collect();
    ListView {
        label: schema.label.clone(),
        guide: schema.guide.clone(),
        skin,
        modal_focus: schema.modal_focus,
        present: items.is_some(),
        items: views,
    }
}

/// The list state machine: append, remove by identity, edit by identity.
/// Every transition propagates a whole new array upward; elements not
/// involved pass through unchanged.
pub(crate) fn edit_list(
    schema: &ListSchema,
    value: Option<&Value>,
    edit: Edit,
    on_change: &mut dyn FnMut(Value),
) {
    let items: Vec<Value> = value
        .and_then(Value::as_list)
        .map(<[Value]>::to_vec)
        .unwrap_or_default();
    match edit {
        Edit::Push => {
            let mut next = items;
            next.push(new_item(&schema.item));
            on_change(Value::List(next));
        }
        Edit::Remove { id } => {
            let before = items.len();
            let next: Vec<Value> = items
                .into_iter()
                .filter(|item| item_id(item).as_ref() != Some(&id))
                .collect();
            // Removing an already-gone identity is a stale event.
            if next.len() != before {
                on_change(Value::List(next));
            }
        }
        Edit::Item { id, edit } => {
            let Some(pos) = items
                .iter()
                .position(|item| item_id(item).as_ref() == Some(&id))
            else {
                return;
            };
            let current = items[pos].clone();
            object::edit_object(&schema.item, Some(&current), *edit, &mut |updated| {
                // Identity rides along as an undeclared key; same position.
                let mut next = items.clone();
                next[pos] = updated;
                on_change(Value::List(next));
            });
        }
        Edit::Set(_) | Edit::Field { .. } => {}
    }
}

/// A freshly appended item: minted identity plus every declared field
/// initialized to the empty default of its own kind.
fn new_item(schema: &ObjectSchema) -> Value {
    let mut fields = ValueMap::new();
    fields.insert(
        ID_KEY.to_string(),
        Value::Text(ItemId::mint().into_inner()),
    );
    for (key, child) in &schema.fields {
        fields.insert(key.clone(), empty_value(child));
    }
    Value::Object(fields)
}

fn empty_value(schema: &FieldSchema) -> Value {
    match schema {
        FieldSchema::Scalar(_) => Value::None,
        FieldSchema::Object(_) => Value::Object(ValueMap::new()),
        FieldSchema::List(_) => Value::List(Vec::new()),
    }
}

/// Load-time normalization for externally produced values: walk the tree
/// under the schema and mint identities for list elements that lack one.
/// Existing tokens are preserved as opaque strings; everything else is
/// copied verbatim.
pub fn adopt(schema: &FieldSchema, value: &Value) -> Value {
    match (schema, value) {
        (FieldSchema::Object(object), Value::Object(_)) => adopt_object(object, value),
        (FieldSchema::List(list), Value::List(items)) => Value::List(
            items
                .iter()
                .map(|item| adopt_item(&list.item, item))
                .collect(),
        ),
        _ => value.clone(),
    }
}

pub fn adopt_object(schema: &ObjectSchema, value: &Value) -> Value {
    let Some(map) = value.as_object() else {
        return value.clone();
    };
    let mut out = map.clone();
    for (key, child) in &schema.fields {
        if let Some(v) = map.get(key.as_str()) {
            out.insert(key.clone(), adopt(child, v));
        }
    }
    Value::Object(out)
}

fn adopt_item(schema: &ObjectSchema, item: &Value) -> Value {
    // Non-object elements are a shape mismatch: recovered as empty items.
    let mut fields = item.as_object().cloned().unwrap_or_default();
    if item_id(item).is_none() {
        fields.insert(
            ID_KEY.to_string(),
            Value::Text(ItemId::mint().into_inner()),
        );
    }
    for (key, child) in &schema.fields {
        if let Some(v) = fields.get(key.as_str()).cloned() {
            fields.insert(key.clone(), adopt(child, &v));
        }
    }
    Value::Object(fields)
}
