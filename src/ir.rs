// Strongly-typed IR for codegen. The only serde_json::Value left here is a literal's payload.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Ty {
    Null,
    Boolean,
    Number,                  // integers are widened to this too
    String,
    Named(String),           // another declaration, by name
    Literal(Value),          // `const` payload, any JSON value
    Array(Box<Ty>),
    Record(Box<Ty>),         // keys are always strings
    Interface(Vec<Field>),   // declaration order is kept
    Union(Vec<Ty>),
    Intersection(Vec<Ty>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: Ty,
    pub optional: bool,      // absent from `required`
}

/// One named, emittable artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub ty: Ty,
}

impl Ty {
    pub fn named(name: impl Into<String>) -> Self {
        Ty::Named(name.into())
    }

    /// Every named identifier inside this reference, in first-occurrence order, without duplicates.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Ty::Named(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            Ty::Array(item) | Ty::Record(item) => item.collect_references(out),
            Ty::Interface(fields) => {
                for f in fields {
                    f.ty.collect_references(out);
                }
            }
            Ty::Union(arms) | Ty::Intersection(arms) => {
                for arm in arms {
                    arm.collect_references(out);
                }
            }
            Ty::Null | Ty::Boolean | Ty::Number | Ty::String | Ty::Literal(_) => {}
        }
    }
}

impl Declaration {
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        Self { name: name.into(), ty }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn references_are_deduplicated_in_first_occurrence_order() {
        let ty = Ty::Union(vec![
            Ty::Array(Box::new(Ty::named("B"))),
            Ty::Interface(vec![
                Field { name: "a".into(), ty: Ty::named("A"), optional: false },
                Field { name: "b".into(), ty: Ty::named("B"), optional: true },
            ]),
            Ty::Literal(json!("C")),
        ]);
        assert_eq!(ty.references(), vec!["B", "A"]);
    }
}
