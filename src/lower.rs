use serde_json::Value;
use tracing::trace;

use crate::ir::{Field, Ty};
use crate::schema::{classify, Shape};

/// Build the type reference for one schema node. Mirrors [`classify`] arm for arm.
pub fn lower_to_ir(node: &Value) -> Ty {
    let shape = classify(node);
    trace!(kind = shape.kind(), "lowering schema node");
    lower_shape(shape)
}

fn lower_shape(shape: Shape<'_>) -> Ty {
    match shape {
        Shape::Reference(name) => Ty::named(name),
        Shape::Const(value) => Ty::Literal(value.clone()),
        Shape::AnyOf(arms) => Ty::Union(arms.iter().map(lower_to_ir).collect()),
        Shape::AllOf(arms) => Ty::Intersection(arms.iter().map(lower_to_ir).collect()),
        Shape::Record(values) => Ty::Record(Box::new(lower_to_ir(values))),
        Shape::Object { properties, required } => {
            let fields = properties
                .into_iter()
                .flatten()
                .map(|(name, prop)| Field {
                    name: name.clone(),
                    ty: lower_to_ir(prop),
                    optional: !required.contains(name.as_str()),
                })
                .collect();
            Ty::Interface(fields)
        }
        Shape::Array(items) => Ty::Array(Box::new(lower_to_ir(items))),
        // integers deliberately share the number target
        Shape::Number | Shape::Integer => Ty::Number,
        Shape::Null => Ty::Null,
        Shape::Boolean => Ty::Boolean,
        Shape::StringEnum(values) => Ty::Union(
            values.into_iter().map(|v| Ty::Literal(Value::from(v))).collect(),
        ),
        Shape::PlainString => Ty::String,
    }
}
