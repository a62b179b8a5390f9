use std::collections::HashMap;

use crate::core::schema::ScalarSchema;
use crate::core::value::Value;
use crate::engine::view::{LeafView, Skin};

/// A discrete user gesture a host delivers to a scalar editor.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Replace the text content (typing, paste into the field).
    Text(String),
    /// Flip a boolean control.
    Toggle,
    /// Pick the enumerated choice at this index.
    Pick(usize),
    /// Clear back to the editor's default.
    Clear,
}

/// Contract every concrete scalar editor implements. The engine treats
/// the editor as opaque: a value goes in, zero or more `on_change` calls
/// come out. An editor owns nothing beyond its own slice and must
/// tolerate a missing value by substituting its own default.
pub trait LeafEditor: Send + Sync {
    fn kind(&self) -> &str;

    /// Substitute used when the slice is missing.
    fn default_value(&self) -> Value {
        Value::None
    }

    fn input(
        &self,
        schema: &ScalarSchema,
        value: Option<&Value>,
        gesture: &Gesture,
        on_change: &mut dyn FnMut(Value),
    );
}

/// Leaf editors keyed by `leaf_kind`. The set of kinds is open: hosts
/// register their own editors alongside the built-ins.
pub struct LeafRegistry {
    editors: HashMap<String, Box<dyn LeafEditor>>,
}

impl LeafRegistry {
    pub fn empty() -> Self {
        Self {
            editors: HashMap::new(),
        }
    }

    /// Registry with the reference editors: `text`, `toggle`, `choice`.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(TextLeaf));
        registry.register(Box::new(ToggleLeaf));
        registry.register(Box::new(ChoiceLeaf));
        registry
    }

    /// Registering the same kind twice is an authoring bug.
    pub fn register(&mut self, editor: Box<dyn LeafEditor>) {
        let kind = editor.kind().to_string();
        let previous = self.editors.insert(kind.clone(), editor);
        assert!(previous.is_none(), "duplicate leaf kind: {kind}");
    }

    pub fn get(&self, kind: &str) -> Option<&dyn LeafEditor> {
        self.editors.get(kind).map(Box::as_ref)
    }

    /// A `leaf_kind` naming no registered editor is a broken schema
    /// definition, not runtime data: fail fast.
    pub fn resolve(&self, kind: &str) -> &dyn LeafEditor {
        self.get(kind)
            .unwrap_or_else(|| panic!("unregistered leaf kind: {kind}"))
    }

    /// Run one gesture through the editor for `schema.leaf_kind` and
    /// collect the value changes it emits.
    pub fn input(
        &self,
        schema: &ScalarSchema,
        value: Option<&Value>,
        gesture: &Gesture,
    ) -> Vec<Value> {
        let editor = self.resolve(&schema.leaf_kind);
        let mut changes = Vec::new();
        editor.input(schema, value, gesture, &mut |v| changes.push(v));
        changes
    }
}

impl Default for LeafRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

pub(crate) fn render_leaf(schema: &ScalarSchema, value: Option<&Value>, skin: Skin) -> LeafView {
    // A container where a scalar was expected is a shape mismatch:
    // recovered locally by treating the slice as empty.
    let value = value
        .filter(|v| !matches!(v, Value::List(_) | Value::Object(_)))
        .cloned();
    LeafView {
        label: schema.label.clone(),
        guide: schema.guide.clone(),
        leaf_kind: schema.leaf_kind.clone(),
        value,
        choices: schema.choices.clone(),
        skin,
    }
}

// ── Built-in reference editors ────────────────────────────────────────────────

struct TextLeaf;

impl LeafEditor for TextLeaf {
    fn kind(&self) -> &str {
        "text"
    }

    fn default_value(&self) -> Value {
        Value::Text(String::new())
    }

    fn input(
        &self,
        _schema: &ScalarSchema,
        _value: Option<&Value>,
        gesture: &Gesture,
        on_change: &mut dyn FnMut(Value),
    ) {
        match gesture {
            Gesture::Text(text) => on_change(Value::Text(text.clone())),
            Gesture::Clear => on_change(self.default_value()),
            _ => {}
        }
    }
}

struct ToggleLeaf;

impl LeafEditor for ToggleLeaf {
    fn kind(&self) -> &str {
        "toggle"
    }

    fn default_value(&self) -> Value {
        Value::Bool(false)
    }

    fn input(
        &self,
        _schema: &ScalarSchema,
        value: Option<&Value>,
        gesture: &Gesture,
        on_change: &mut dyn FnMut(Value),
    ) {
        match gesture {
            Gesture::Toggle => {
                let current = value.and_then(Value::as_bool).unwrap_or(false);
                on_change(Value::Bool(!current));
            }
            Gesture::Clear => on_change(self.default_value()),
            _ => {}
        }
    }
}

struct ChoiceLeaf;

impl LeafEditor for ChoiceLeaf {
    fn kind(&self) -> &str {
        "choice"
    }

    fn input(
        &self,
        schema: &ScalarSchema,
        _value: Option<&Value>,
        gesture: &Gesture,
        on_change: &mut dyn FnMut(Value),
    ) {
        match gesture {
            // Out-of-range picks are stale events against an edited
            // choice list; dropped.
            Gesture::Pick(index) => {
                if let Some(choice) = schema.choices.get(*index) {
                    on_change(choice.value.clone());
                }
            }
            Gesture::Clear => on_change(Value::None),
            _ => {}
        }
    }
}
