use serde_json::Value;

use super::property_key;
use crate::ir::{Declaration, Ty};

pub fn declaration(decl: &Declaration) -> String {
    format!("type {} = {};", decl.name, type_expr(&decl.ty))
}

pub fn type_expr(ty: &Ty) -> String {
    match ty {
        Ty::Null => "null".to_string(),
        Ty::Boolean => "boolean".to_string(),
        Ty::Number => "number".to_string(),
        Ty::String => "string".to_string(),
        Ty::Named(name) => name.clone(),
        Ty::Literal(value) => literal(value),
        Ty::Array(item) => format!("Array<{}>", type_expr(item)),
        Ty::Record(values) => format!("Record<string, {}>", type_expr(values)),
        Ty::Interface(fields) if fields.is_empty() => "{}".to_string(),
        Ty::Interface(fields) => {
            let body = fields
                .iter()
                .map(|f| {
                    let mark = if f.optional { "?" } else { "" };
                    format!("{}{mark}: {}", property_key(&f.name), type_expr(&f.ty))
                })
                .collect::<Vec<_>>()
                .join("; ");
            format!("{{ {body} }}")
        }
        Ty::Union(arms) => combine(arms, " | ", "never"),
        Ty::Intersection(arms) => combine(arms, " & ", "unknown"),
    }
}

fn combine(arms: &[Ty], sep: &str, empty: &str) -> String {
    match arms {
        [] => empty.to_string(),
        [only] => type_expr(only),
        _ => format!("({})", arms.iter().map(type_expr).collect::<Vec<_>>().join(sep)),
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.to_string(),
        Value::Array(items) => {
            format!("[{}]", items.iter().map(literal).collect::<Vec<_>>().join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let body = map
                .iter()
                .map(|(k, v)| format!("{}: {}", property_key(k), literal(v)))
                .collect::<Vec<_>>()
                .join("; ");
            format!("{{ {body} }}")
        }
    }
}
