//! Schema node classification.
//!
//! A schema node is any JSON value. [`classify`] maps it onto exactly one
//! [`Shape`] by checking predicates in a fixed precedence order, most
//! specific first. Classification is total: whatever fails every predicate
//! degrades to [`Shape::PlainString`].

use indexmap::IndexSet;
use serde_json::{Map, Value};

/// The supported node shapes, borrowing their payloads from the input tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<'a> {
    Reference(&'a str),
    Const(&'a Value),
    AnyOf(&'a [Value]),
    AllOf(&'a [Value]),
    Record(&'a Value),
    Object {
        properties: Option<&'a Map<String, Value>>,
        required: IndexSet<&'a str>,
    },
    /// Payload is the `items` node, or `null` when absent (which classifies as a plain string).
    Array(&'a Value),
    Number,
    Integer,
    Null,
    Boolean,
    StringEnum(Vec<&'a str>),
    PlainString,
}

impl Shape<'_> {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Reference(_) => "reference",
            Shape::Const(_) => "const",
            Shape::AnyOf(_) => "any-of",
            Shape::AllOf(_) => "all-of",
            Shape::Record(_) => "record",
            Shape::Object { .. } => "object",
            Shape::Array(_) => "array",
            Shape::Number => "number",
            Shape::Integer => "integer",
            Shape::Null => "null",
            Shape::Boolean => "boolean",
            Shape::StringEnum(_) => "string-enum",
            Shape::PlainString => "plain-string",
        }
    }
}

static MISSING: Value = Value::Null;

pub fn classify(node: &Value) -> Shape<'_> {
    let Value::Object(map) = node else {
        return Shape::PlainString;
    };

    if let Some(target) = as_ref(map) {
        return Shape::Reference(ref_name(target));
    }
    if let Some(value) = map.get("const") {
        return Shape::Const(value);
    }
    if let Some(arms) = array_of(map, "anyOf") {
        return Shape::AnyOf(arms);
    }
    if let Some(arms) = array_of(map, "allOf") {
        return Shape::AllOf(arms);
    }
    if let Some(values) = as_record(map) {
        return Shape::Record(values);
    }

    match type_of(map) {
        Some("object") => Shape::Object {
            properties: map.get("properties").and_then(Value::as_object),
            required: required_names(map),
        },
        Some("array") => Shape::Array(map.get("items").unwrap_or(&MISSING)),
        Some("number") => Shape::Number,
        Some("integer") => Shape::Integer,
        Some("null") => Shape::Null,
        Some("boolean") => Shape::Boolean,
        Some("string") => match string_enum(map) {
            Some(values) => Shape::StringEnum(values),
            None => Shape::PlainString,
        },
        _ => Shape::PlainString,
    }
}

/// The declaration name a `$ref` points at: the final `/`-separated segment.
pub fn ref_name(target: &str) -> &str {
    target.rsplit('/').next().unwrap_or(target)
}

// ————————————————————————————————————————————————————————————————————————————
// PREDICATES
// ————————————————————————————————————————————————————————————————————————————

fn as_ref(map: &Map<String, Value>) -> Option<&str> {
    map.get("$ref").and_then(Value::as_str)
}

fn array_of<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a [Value]> {
    map.get(key).and_then(Value::as_array).map(Vec::as_slice)
}

// no `properties` + object-valued `additionalProperties`; `type` is not consulted
fn as_record(map: &Map<String, Value>) -> Option<&Value> {
    if map.contains_key("properties") {
        return None;
    }
    map.get("additionalProperties").filter(|v| v.is_object())
}

fn type_of(map: &Map<String, Value>) -> Option<&str> {
    map.get("type").and_then(Value::as_str)
}

fn required_names(map: &Map<String, Value>) -> IndexSet<&str> {
    map.get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

fn string_enum(map: &Map<String, Value>) -> Option<Vec<&str>> {
    let values = map.get("enum")?.as_array()?;
    values.iter().map(Value::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn ref_takes_precedence_over_everything() {
        let node = json!({ "$ref": "#/definitions/Foo", "const": 1, "type": "object" });
        assert_eq!(classify(&node), Shape::Reference("Foo"));
    }

    #[test]
    fn ref_without_slash_is_used_whole() {
        assert_eq!(classify(&json!({ "$ref": "Foo" })), Shape::Reference("Foo"));
    }

    #[test]
    fn non_string_ref_falls_through() {
        assert_eq!(classify(&json!({ "$ref": 3, "type": "null" })), Shape::Null);
    }

    #[test]
    fn const_null_is_still_a_const() {
        let node = json!({ "const": null, "anyOf": [] });
        assert_eq!(classify(&node), Shape::Const(&Value::Null));
    }

    #[test]
    fn any_of_before_all_of() {
        let node = json!({ "anyOf": [{ "type": "null" }], "allOf": [] });
        assert!(matches!(classify(&node), Shape::AnyOf(arms) if arms.len() == 1));
    }

    #[test]
    fn record_before_object() {
        let node = json!({ "type": "object", "additionalProperties": { "type": "number" } });
        assert_eq!(classify(&node), Shape::Record(&json!({ "type": "number" })));
    }

    #[test]
    fn record_does_not_need_a_type() {
        let node = json!({ "additionalProperties": {} });
        assert_eq!(classify(&node), Shape::Record(&json!({})));
    }

    #[test]
    fn properties_win_over_additional_properties() {
        let node = json!({
            "type": "object",
            "properties": { "a": { "type": "string" } },
            "additionalProperties": { "type": "number" }
        });
        assert_eq!(classify(&node).kind(), "object");
    }

    #[test]
    fn boolean_additional_properties_is_not_a_record() {
        let node = json!({ "type": "object", "additionalProperties": true });
        assert_eq!(classify(&node).kind(), "object");
    }

    #[test]
    fn object_collects_required_names() {
        let node = json!({
            "type": "object",
            "properties": { "a": {}, "b": {} },
            "required": ["b", 7, "a"]
        });
        let Shape::Object { properties, required } = classify(&node) else {
            panic!("expected an object shape");
        };
        assert_eq!(properties.map(|p| p.len()), Some(2));
        assert_eq!(required.into_iter().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn array_without_items_carries_null() {
        assert_eq!(classify(&json!({ "type": "array" })), Shape::Array(&Value::Null));
    }

    #[test]
    fn scalar_types() {
        assert_eq!(classify(&json!({ "type": "number" })), Shape::Number);
        assert_eq!(classify(&json!({ "type": "integer" })), Shape::Integer);
        assert_eq!(classify(&json!({ "type": "null" })), Shape::Null);
        assert_eq!(classify(&json!({ "type": "boolean" })), Shape::Boolean);
    }

    #[test]
    fn string_enum_requires_all_strings() {
        let node = json!({ "type": "string", "enum": ["a", "b"] });
        assert_eq!(classify(&node), Shape::StringEnum(vec!["a", "b"]));

        let mixed = json!({ "type": "string", "enum": ["a", 1] });
        assert_eq!(classify(&mixed), Shape::PlainString);
    }

    #[test]
    fn enum_without_string_type_is_plain_string() {
        assert_eq!(classify(&json!({ "enum": ["a"] })), Shape::PlainString);
    }

    #[test]
    fn fallback_covers_everything_else() {
        for node in [
            json!({}),
            json!({ "type": "string" }),
            json!({ "type": ["string", "null"] }),
            json!({ "type": "date" }),
            json!(null),
            json!(true),
            json!(12),
            json!("string"),
            json!([{ "type": "number" }]),
        ] {
            assert_eq!(classify(&node), Shape::PlainString, "{node}");
        }
    }
}
