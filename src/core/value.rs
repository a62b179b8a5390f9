use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub type ValueMap = IndexMap<String, Value>;

/// The untyped tree being edited. A value mirrors a (possibly incomplete)
/// instance of a schema: object values are ordered key→value maps, list
/// values are sequences of object-shaped elements, scalar payloads are
/// interpreted only by the matching leaf editor. Missing keys are "empty",
/// never errors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Object(ValueMap),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) => v.is_empty(),
            Self::List(v) => v.is_empty(),
            Self::Object(v) => v.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ValueMap> {
        match self {
            Self::Object(v) => Some(v),
            _ => None,
        }
    }

    /// Child lookup on object values; anything else has no children.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Display form for scalar payloads. Containers have none.
    pub fn to_text_scalar(&self) -> Option<String> {
        match self {
            Self::Text(v) => Some(v.clone()),
            Self::Bool(v) => Some(v.to_string()),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(n.to_string())
                }
            }
            _ => None,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }

    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl From<ValueMap> for Value {
    fn from(v: ValueMap) -> Self {
        Self::Object(v)
    }
}

#[cfg(test)]
mod tests {
    use super::{Value, ValueMap};

    #[test]
    fn missing_keys_are_just_absent() {
        let mut map = ValueMap::new();
        map.insert("title".to_string(), Value::from("T"));
        let value = Value::Object(map);

        assert_eq!(value.get("title").and_then(Value::as_text), Some("T"));
        assert_eq!(value.get("subtitle"), None);
        assert_eq!(Value::from("x").get("title"), None);
    }

    #[test]
    fn scalar_display_forms() {
        assert_eq!(Value::from("hi").to_text_scalar(), Some("hi".to_string()));
        assert_eq!(Value::from(true).to_text_scalar(), Some("true".to_string()));
        assert_eq!(Value::from(3.0).to_text_scalar(), Some("3".to_string()));
        assert_eq!(Value::from(3.5).to_text_scalar(), Some("3.5".to_string()));
        assert_eq!(Value::None.to_text_scalar(), None);
        assert_eq!(Value::List(vec![]).to_text_scalar(), None);
    }

    #[test]
    fn json_round_trip() {
        let source = r#"{"title":"T","count":2,"flags":[true,null],"meta":{"a":"b"}}"#;
        let value = Value::from_json(source).expect("json should parse");

        assert_eq!(value.get("title").and_then(Value::as_text), Some("T"));
        assert_eq!(value.get("count").and_then(Value::as_number), Some(2.0));
        let flags = value.get("flags").and_then(Value::as_list).expect("flags");
        assert_eq!(flags[0], Value::Bool(true));
        assert_eq!(flags[1], Value::None);

        let back = Value::from_json(&value.to_json()).expect("round trip");
        assert_eq!(back, value);
    }

    #[test]
    fn emptiness_by_shape() {
        assert!(Value::None.is_empty());
        assert!(Value::from("").is_empty());
        assert!(Value::List(Vec::new()).is_empty());
        assert!(Value::Object(ValueMap::new()).is_empty());
        assert!(!Value::from(0.0).is_empty());
        assert!(!Value::from(false).is_empty());
    }
}
