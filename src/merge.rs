//! Schema-guided merge of an externally supplied object onto an existing
//! value tree. The schema is the allow-list and recursion guide: keys it
//! does not declare are silently dropped, keys the incoming object omits
//! keep their current value.

use crate::core::schema::{FieldSchema, ObjectSchema};
use crate::core::value::{Value, ValueMap};

/// Fold `incoming` onto `current` under `schema`. Object-schema keys with
/// object-shaped incoming values recurse; list-schema keys are replaced
/// wholesale (never merged element-wise); scalars and shape mismatches
/// take the incoming value verbatim. Neither input is mutated and there
/// is no failure path — malformed incoming data is the caller's problem,
/// encoded by the `ValueMap` parameter type.
pub fn merge_by_config(
    schema: &ObjectSchema,
    current: Option<&Value>,
    incoming: &ValueMap,
) -> Value {
    let mut out = current
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    for (key, child) in &schema.fields {
        let Some(inc) = incoming.get(key.as_str()) else {
            // Sparse: omission never clears an existing value.
            continue;
        };
        let next = match (child, inc) {
            (FieldSchema::Object(object), Value::Object(map)) => {
                merge_by_config(object, out.get(key.as_str()), map)
            }
            _ => inc.clone(),
        };
        out.insert(key.clone(), next);
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::merge_by_config;
    use crate::core::schema::{FieldSchema, ListSchema, ObjectSchema};
    use crate::core::value::{Value, ValueMap};

    fn schema() -> ObjectSchema {
        ObjectSchema::new("Page")
            .field("title", FieldSchema::scalar("Title", "text"))
            .field(
                "theme",
                ObjectSchema::new("Theme")
                    .field("accent", FieldSchema::scalar("Accent", "text"))
                    .field("base", FieldSchema::scalar("Base", "text")),
            )
            .field(
                "tags",
                ListSchema::new(
                    "Tags",
                    ObjectSchema::new("Tag").field("value", FieldSchema::scalar("Value", "text")),
                ),
            )
    }

    fn object(entries: &[(&str, Value)]) -> ValueMap {
        let mut map = ValueMap::new();
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        map
    }

    #[test]
    fn empty_incoming_changes_nothing() {
        let current = Value::Object(object(&[
            ("title", Value::from("T")),
            ("theme", Value::Object(object(&[("accent", Value::from("#f00"))]))),
        ]));
        let merged = merge_by_config(&schema(), Some(&current), &ValueMap::new());
        assert_eq!(merged, current);
    }

    #[test]
    fn undeclared_keys_never_survive_the_merge() {
        let incoming = object(&[
            ("title", Value::from("T")),
            ("injected", Value::from("nope")),
        ]);
        let merged = merge_by_config(&schema(), None, &incoming);
        assert_eq!(merged.get("title").and_then(Value::as_text), Some("T"));
        assert_eq!(merged.get("injected"), None);
    }

    #[test]
    fn list_fields_replace_wholesale() {
        let current = Value::Object(object(&[(
            "tags",
            Value::List(vec![Value::Object(object(&[("value", Value::from("a"))]))]),
        )]));
        let incoming = object(&[(
            "tags",
            Value::List(vec![Value::Object(object(&[("value", Value::from("b"))]))]),
        )]);

        let merged = merge_by_config(&schema(), Some(&current), &incoming);
        let tags = merged.get("tags").and_then(Value::as_list).expect("tags");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].get("value").and_then(Value::as_text), Some("b"));
    }

    #[test]
    fn object_fields_merge_recursively_and_sparsely() {
        let current = Value::Object(object(&[(
            "theme",
            Value::Object(object(&[
                ("accent", Value::from("#f00")),
                ("base", Value::from("#fff")),
            ])),
        )]));
        let incoming = object(&[(
            "theme",
            Value::Object(object(&[("accent", Value::from("#0f0"))])),
        )]);

        let merged = merge_by_config(&schema(), Some(&current), &incoming);
        let theme = merged.get("theme").expect("theme");
        assert_eq!(theme.get("accent").and_then(Value::as_text), Some("#0f0"));
        // Omitted nested key keeps its current value.
        assert_eq!(theme.get("base").and_then(Value::as_text), Some("#fff"));
    }

    #[test]
    fn shape_mismatches_assign_verbatim() {
        let current = Value::Object(object(&[(
            "theme",
            Value::Object(object(&[("accent", Value::from("#f00"))])),
        )]));
        // Object schema, non-object incoming: taken as-is.
        let incoming = object(&[("theme", Value::from("oops"))]);
        let merged = merge_by_config(&schema(), Some(&current), &incoming);
        assert_eq!(merged.get("theme").and_then(Value::as_text), Some("oops"));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let current = Value::Object(object(&[("title", Value::from("T"))]));
        let incoming = object(&[("title", Value::from("T2"))]);
        let merged = merge_by_config(&schema(), Some(&current), &incoming);

        assert_eq!(merged.get("title").and_then(Value::as_text), Some("T2"));
        assert_eq!(current.get("title").and_then(Value::as_text), Some("T"));
        assert_eq!(incoming.get("title").and_then(Value::as_text), Some("T2"));
    }

    #[test]
    fn same_incoming_from_same_baseline_is_deterministic() {
        let current = Value::Object(object(&[("title", Value::from("T"))]));
        let incoming = object(&[("title", Value::from("T2"))]);
        let once = merge_by_config(&schema(), Some(&current), &incoming);
        let again = merge_by_config(&schema(), Some(&current), &incoming);
        assert_eq!(once, again);
    }
}
