use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::value::Value;

/// An enumerated option offered by a scalar leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub value: Value,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Declarative description of a value's shape. Pure data: authored once
/// (in code or as a YAML/JSON literal tagged by `kind`), immutable for the
/// lifetime of an editing session. Only the value tree mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldSchema {
    Scalar(ScalarSchema),
    Object(ObjectSchema),
    List(ListSchema),
}

impl FieldSchema {
    pub fn scalar(label: impl Into<String>, leaf_kind: impl Into<String>) -> Self {
        Self::Scalar(ScalarSchema::new(label, leaf_kind))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Object(_) => "object",
            Self::List(_) => "list",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Scalar(s) => s.label.as_str(),
            Self::Object(s) => s.label.as_str(),
            Self::List(s) => s.label.as_str(),
        }
    }
}

impl From<ScalarSchema> for FieldSchema {
    fn from(s: ScalarSchema) -> Self {
        Self::Scalar(s)
    }
}

impl From<ObjectSchema> for FieldSchema {
    fn from(s: ObjectSchema) -> Self {
        Self::Object(s)
    }
}

impl From<ListSchema> for FieldSchema {
    fn from(s: ListSchema) -> Self {
        Self::List(s)
    }
}

/// Leaf editor selector plus optional enumerated choices. The engine never
/// looks inside the payload; `leaf_kind` names the editor responsible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarSchema {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide: Option<String>,
    pub leaf_kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

impl ScalarSchema {
    pub fn new(label: impl Into<String>, leaf_kind: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            guide: None,
            leaf_kind: leaf_kind.into(),
            choices: Vec::new(),
        }
    }

    pub fn with_guide(mut self, guide: impl Into<String>) -> Self {
        self.guide = Some(guide.into());
        self
    }

    pub fn choice(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.choices.push(Choice::new(label, value));
        self
    }
}

/// Ordered map of named child schemas. Insertion order is display order;
/// it carries no other meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide: Option<String>,
    #[serde(default)]
    pub fields: IndexMap<String, FieldSchema>,
}

impl ObjectSchema {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            guide: None,
            fields: IndexMap::new(),
        }
    }

    pub fn with_guide(mut self, guide: impl Into<String>) -> Self {
        self.guide = Some(guide.into());
        self
    }

    /// Declare a named child. Duplicate keys are an authoring bug.
    pub fn field(mut self, key: impl Into<String>, schema: impl Into<FieldSchema>) -> Self {
        let key = key.into();
        let previous = self.fields.insert(key.clone(), schema.into());
        assert!(previous.is_none(), "duplicate schema key: {key}");
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldSchema> {
        self.fields.get(key)
    }
}

/// One item schema, reused for every element of the value array. Elements
/// are always object-shaped so identity assignment stays uniform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSchema {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide: Option<String>,
    /// Presentation only: render the focused item in an overlay.
    #[serde(default)]
    pub modal_focus: bool,
    pub item: ObjectSchema,
}

impl ListSchema {
    pub fn new(label: impl Into<String>, item: ObjectSchema) -> Self {
        Self {
            label: label.into(),
            guide: None,
            modal_focus: false,
            item,
        }
    }

    pub fn with_guide(mut self, guide: impl Into<String>) -> Self {
        self.guide = Some(guide.into());
        self
    }

    pub fn with_modal_focus(mut self, modal_focus: bool) -> Self {
        self.modal_focus = modal_focus;
        self
    }
}
