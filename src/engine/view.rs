use crate::core::identity::{ID_KEY, ItemId};
use crate::core::schema::Choice;
use crate::core::value::{Value, ValueMap};

/// Purely cosmetic wrapping for a rendered node. Carried on views for the
/// host to consult while drawing; the edit path never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Skin {
    #[default]
    Plain,
    Card,
    Compact,
}

/// Which list item is visually emphasized. Presentation-only, scoped,
/// passed down as an argument; resetting it never touches the value tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusState {
    pub focused: Option<ItemId>,
}

impl FocusState {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn on(id: impl Into<ItemId>) -> Self {
        Self {
            focused: Some(id.into()),
        }
    }

    pub fn is_focused(&self, id: &ItemId) -> bool {
        self.focused.as_ref() == Some(id)
    }
}

/// Pure output of rendering a schema slice over a value slice. A host
/// walks this tree to draw the editor; it holds no behavior and retains
/// no reference to the value tree it was rendered from.
#[derive(Debug, Clone)]
pub enum Rendered {
    Leaf(LeafView),
    Object(ObjectView),
    List(ListView),
}

impl Rendered {
    pub fn as_leaf(&self) -> Option<&LeafView> {
        match self {
            Self::Leaf(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectView> {
        match self {
            Self::Object(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListView> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Reassemble the schema-declared projection of the value this view
    /// was rendered from (plus item identities). `None` means the slice
    /// was absent at render time.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Self::Leaf(leaf) => leaf.value.clone(),
            Self::Object(object) => object.to_value(),
            Self::List(list) => list.to_value(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LeafView {
    pub label: String,
    pub guide: Option<String>,
    pub leaf_kind: String,
    /// `None` when the key was absent; the leaf editor substitutes its
    /// own default for display.
    pub value: Option<Value>,
    pub choices: Vec<Choice>,
    pub skin: Skin,
}

#[derive(Debug, Clone)]
pub struct ObjectView {
    pub label: String,
    pub guide: Option<String>,
    pub skin: Skin,
    /// The value slice existed at render time (it may still be empty).
    pub present: bool,
    /// One child view per declared field, in declared order.
    pub children: Vec<(String, Rendered)>,
}

impl ObjectView {
    pub fn child(&self, key: &str) -> Option<&Rendered> {
        self.children
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, view)| view)
    }

    fn to_value(&self) -> Option<Value> {
        if !self.present {
            return None;
        }
        let mut map = ValueMap::new();
        for (key, child) in &self.children {
            if let Some(value) = child.to_value() {
                map.insert(key.clone(), value);
            }
        }
        Some(Value::Object(map))
    }
}

#[derive(Debug, Clone)]
pub struct ListView {
    pub label: String,
    pub guide: Option<String>,
    pub skin: Skin,
    /// Render the focused item in an overlay instead of inline.
    pub modal_focus: bool,
    pub present: bool,
    pub items: Vec<ItemView>,
}

impl ListView {
    fn to_value(&self) -> Option<Value> {
        if !self.present {
            return None;
        }
        Some(Value::List(
            self.items.iter().map(ItemView::to_value).collect(),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct ItemView {
    /// `None` for legacy elements that have not been through `adopt` yet;
    /// such items cannot be addressed by identity edits.
    pub id: Option<ItemId>,
    pub focused: bool,
    /// The item rendered through the object interpreter over the list's
    /// item schema.
    pub body: Rendered,
}

impl ItemView {
    fn to_value(&self) -> Value {
        let mut map = match self.body.to_value() {
            Some(Value::Object(map)) => map,
            _ => ValueMap::new(),
        };
        if let Some(id) = &self.id {
            map.insert(ID_KEY.to_string(), Value::Text(id.as_str().to_string()));
        }
        Value::Object(map)
    }
}
