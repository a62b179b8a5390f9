use crate::core::schema::ObjectSchema;
use crate::core::value::Value;
use crate::engine::Edit;
use crate::engine::view::{FocusState, ObjectView, Skin};

/// Render each declared child in order through the dispatcher. A missing
/// or wrong-shaped value is read as `{}`; no keys are materialized.
pub(crate) fn render_object(
    schema: &ObjectSchema,
    value: Option<&Value>,
    focus: &FocusState,
    skin: Skin,
) -> ObjectView {
    let map = value.and_then(Value::as_object);
    let children = schema
        .fields
        .iter()
        .map(|(key, child)| {
            let slice = map.and_then(|m| m.get(key.as_str()));
            (key.clone(), super::render(child, slice, focus, skin))
        })
        .collect();
    ObjectView {
        label: schema.label.clone(),
        guide: schema.guide.clone(),
        skin,
        present: map.is_some(),
        children,
    }
}

/// Route a `Field` edit to the named child and rebuild the owned slice as
/// `{ ..value, key: next }`. Sibling keys are untouched; keys present in
/// the value but absent from the schema ride along on every update.
pub(crate) fn edit_object(
    schema: &ObjectSchema,
    value: Option<&Value>,
    edit: Edit,
    on_change: &mut dyn FnMut(Value),
) {
    let Edit::Field { key, edit } = edit else {
        // Stale event against a reshaped tree.
        return;
    };
    let Some(child_schema) = schema.fields.get(key.as_str()) else {
        return;
    };
    let base = value.and_then(Value::as_object).cloned().unwrap_or_default();
    let child = base.get(key.as_str()).cloned();
    super::dispatch_edit(child_schema, child.as_ref(), *edit, &mut |next| {
        let mut slice = base.clone();
        slice.insert(key.clone(), next);
        on_change(Value::Object(slice));
    });
}
