use serde_json::Value;

use super::property_key;
use crate::ir::{Declaration, Field, Ty};

/// io-ts accepts at most this many members in one `t.intersection`.
const MAX_INTERSECTION: usize = 5;

/// `const Name = <codec>;`, or a `t.recursion` wrapper when the codec names itself or a later declaration.
pub fn declaration(decl: &Declaration, lazy: bool) -> String {
    let body = codec(&decl.ty);
    if lazy {
        format!(
            "const {name}: t.Type<{name}> = t.recursion({quoted}, () => {body});",
            name = decl.name,
            quoted = Value::from(decl.name.as_str()),
        )
    } else {
        format!("const {} = {body};", decl.name)
    }
}

pub fn codec(ty: &Ty) -> String {
    match ty {
        Ty::Null => "t.null".to_string(),
        Ty::Boolean => "t.boolean".to_string(),
        Ty::Number => "t.number".to_string(),
        Ty::String => "t.string".to_string(),
        Ty::Named(name) => name.clone(),
        Ty::Literal(value) => literal(value),
        Ty::Array(item) => format!("t.array({})", codec(item)),
        Ty::Record(values) => format!("t.record(t.string, {})", codec(values)),
        Ty::Interface(fields) => interface(fields),
        Ty::Union(arms) => match arms.as_slice() {
            [] => "t.never".to_string(),
            [only] => codec(only),
            _ => format!("t.union([{}])", list(arms.iter().map(codec))),
        },
        Ty::Intersection(arms) => match arms.as_slice() {
            [] => "t.unknown".to_string(),
            [only] => codec(only),
            _ => intersection(arms.iter().map(codec).collect()),
        },
    }
}

fn interface(fields: &[Field]) -> String {
    let (required, optional): (Vec<&Field>, Vec<&Field>) = fields.iter().partition(|f| !f.optional);
    match (required.is_empty(), optional.is_empty()) {
        (_, true) => format!("t.type({})", props(&required)),
        (true, false) => format!("t.partial({})", props(&optional)),
        (false, false) => format!(
            "t.intersection([t.type({}), t.partial({})])",
            props(&required),
            props(&optional)
        ),
    }
}

fn props(fields: &[&Field]) -> String {
    if fields.is_empty() {
        return "{}".to_string();
    }
    let body = list(fields.iter().map(|f| format!("{}: {}", property_key(&f.name), codec(&f.ty))));
    format!("{{ {body} }}")
}

fn intersection(mut members: Vec<String>) -> String {
    if members.len() > MAX_INTERSECTION {
        let tail = members.split_off(MAX_INTERSECTION - 1);
        members.push(intersection(tail));
    }
    format!("t.intersection([{}])", members.join(", "))
}

fn literal(value: &Value) -> String {
    match value {
        Value::Null => "t.null".to_string(),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => format!("t.literal({value})"),
        Value::Array(items) => format!("t.tuple([{}])", list(items.iter().map(literal))),
        Value::Object(map) if map.is_empty() => "t.type({})".to_string(),
        Value::Object(map) => {
            let body = list(map.iter().map(|(k, v)| format!("{}: {}", property_key(k), literal(v))));
            format!("t.type({{ {body} }})")
        }
    }
}

fn list(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}
