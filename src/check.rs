//! Acceptance semantics of the emitted runtime codecs, evaluated in-process.
//!
//! [`Checker::is`] answers what `Name.is(value)` answers for the generated
//! io-ts module, for JSON data. Used by tests and the dev test runner to
//! exercise generated declarations without a JavaScript runtime.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::ir::{Declaration, Field, Ty};

pub struct Checker<'a> {
    declarations: HashMap<&'a str, &'a Ty>,
}

impl<'a> Checker<'a> {
    pub fn new(declarations: &'a [Declaration]) -> Self {
        Self {
            declarations: declarations.iter().map(|d| (d.name.as_str(), &d.ty)).collect(),
        }
    }

    /// `None` when no declaration has this name.
    pub fn is(&self, name: &str, value: &Value) -> Option<bool> {
        let (&name, &ty) = self.declarations.get_key_value(name)?;
        let mut visiting = vec![(name, value)];
        Some(self.accepts(ty, value, &mut visiting))
    }

    /// `visiting` holds the named declarations entered on the current value.
    /// Re-entering one without descending into a child value would never terminate.
    fn accepts<'v>(&self, ty: &'a Ty, value: &'v Value, visiting: &mut Vec<(&'a str, &'v Value)>) -> bool {
        match ty {
            Ty::Null => value.is_null(),
            Ty::Boolean => value.is_boolean(),
            Ty::Number => value.is_number(),
            Ty::String => value.is_string(),
            Ty::Literal(expected) => literal_matches(expected, value),
            Ty::Named(name) => {
                let Some((&name, &ty)) = self.declarations.get_key_value(name.as_str()) else {
                    return false;
                };
                if visiting.iter().any(|&(n, v)| n == name && std::ptr::eq(v, value)) {
                    return false;
                }
                visiting.push((name, value));
                let ok = self.accepts(ty, value, visiting);
                visiting.pop();
                ok
            }
            Ty::Array(item) => value
                .as_array()
                .is_some_and(|xs| xs.iter().all(|x| self.descend(item, x))),
            Ty::Record(values) => value
                .as_object()
                .is_some_and(|m| m.values().all(|v| self.descend(values, v))),
            Ty::Interface(fields) => value
                .as_object()
                .is_some_and(|m| fields.iter().all(|f| self.field_accepts(f, m))),
            Ty::Union(arms) => arms.iter().any(|arm| self.accepts(arm, value, visiting)),
            Ty::Intersection(arms) => arms.iter().all(|arm| self.accepts(arm, value, visiting)),
        }
    }

    // a child value starts with a fresh cycle guard
    fn descend(&self, ty: &'a Ty, value: &Value) -> bool {
        self.accepts(ty, value, &mut Vec::new())
    }

    fn field_accepts(&self, field: &'a Field, object: &Map<String, Value>) -> bool {
        match object.get(&field.name) {
            Some(v) => self.descend(&field.ty, v),
            None => field.optional,
        }
    }
}

// tuples need exact arity; object literals need the listed keys, extra keys pass
fn literal_matches(expected: &Value, value: &Value) -> bool {
    match (expected, value) {
        (Value::Array(want), Value::Array(got)) => {
            want.len() == got.len() && want.iter().zip(got).all(|(w, g)| literal_matches(w, g))
        }
        (Value::Object(want), Value::Object(got)) => want
            .iter()
            .all(|(k, w)| got.get(k).is_some_and(|g| literal_matches(w, g))),
        (Value::Number(want), Value::Number(got)) => want.as_f64() == got.as_f64(),
        _ => expected == value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decls() -> Vec<Declaration> {
        vec![
            Declaration::new(
                "Foo",
                Ty::Interface(vec![Field { name: "x".into(), ty: Ty::String, optional: false }]),
            ),
            Declaration::new(
                "Mode",
                Ty::Union(vec![Ty::Literal(json!("a")), Ty::Literal(json!("b"))]),
            ),
            Declaration::new(
                "Opt",
                Ty::Interface(vec![Field { name: "n".into(), ty: Ty::Number, optional: true }]),
            ),
            Declaration::new(
                "Tree",
                Ty::Interface(vec![Field {
                    name: "children".into(),
                    ty: Ty::Array(Box::new(Ty::named("Tree"))),
                    optional: true,
                }]),
            ),
            Declaration::new("Loop", Ty::Union(vec![Ty::named("Loop"), Ty::Null])),
            Declaration::new("Both", Ty::Intersection(vec![Ty::named("Foo"), Ty::named("Opt")])),
        ]
    }

    #[test]
    fn required_field_must_be_present() {
        let decls = decls();
        let checker = Checker::new(&decls);
        assert_eq!(checker.is("Foo", &json!({ "x": "hi" })), Some(true));
        assert_eq!(checker.is("Foo", &json!({ "x": "hi", "extra": 1 })), Some(true));
        assert_eq!(checker.is("Foo", &json!({})), Some(false));
        assert_eq!(checker.is("Foo", &json!({ "x": 1 })), Some(false));
        assert_eq!(checker.is("Foo", &json!(["hi"])), Some(false));
    }

    #[test]
    fn enum_union_accepts_only_its_literals() {
        let decls = decls();
        let checker = Checker::new(&decls);
        assert_eq!(checker.is("Mode", &json!("a")), Some(true));
        assert_eq!(checker.is("Mode", &json!("b")), Some(true));
        assert_eq!(checker.is("Mode", &json!("c")), Some(false));
    }

    #[test]
    fn optional_field_may_be_absent_but_not_null() {
        let decls = decls();
        let checker = Checker::new(&decls);
        assert_eq!(checker.is("Opt", &json!({})), Some(true));
        assert_eq!(checker.is("Opt", &json!({ "n": 2 })), Some(true));
        assert_eq!(checker.is("Opt", &json!({ "n": null })), Some(false));
    }

    #[test]
    fn recursive_declarations_follow_the_data() {
        let decls = decls();
        let checker = Checker::new(&decls);
        let tree = json!({ "children": [{ "children": [] }, {}] });
        assert_eq!(checker.is("Tree", &tree), Some(true));
        assert_eq!(checker.is("Tree", &json!({ "children": [1] })), Some(false));
    }

    #[test]
    fn non_productive_cycles_terminate() {
        let decls = decls();
        let checker = Checker::new(&decls);
        assert_eq!(checker.is("Loop", &json!(null)), Some(true));
        assert_eq!(checker.is("Loop", &json!(1)), Some(false));
    }

    #[test]
    fn mutual_cycles_on_one_value_terminate() {
        let decls = vec![
            Declaration::new("Ping", Ty::Union(vec![Ty::named("Pong"), Ty::Boolean])),
            Declaration::new("Pong", Ty::Intersection(vec![Ty::named("Ping"), Ty::named("Ping")])),
        ];
        let checker = Checker::new(&decls);
        assert_eq!(checker.is("Ping", &json!(true)), Some(true));
        assert_eq!(checker.is("Ping", &json!("x")), Some(false));
        assert_eq!(checker.is("Pong", &json!(false)), Some(true));
    }

    #[test]
    fn equal_values_at_different_depths_are_checked_separately() {
        let decls = decls();
        let checker = Checker::new(&decls);
        let tree = json!({ "children": [{ "children": [{}] }, { "children": [{}] }] });
        assert_eq!(checker.is("Tree", &tree), Some(true));
    }

    #[test]
    fn intersections_need_every_member() {
        let decls = decls();
        let checker = Checker::new(&decls);
        assert_eq!(checker.is("Both", &json!({ "x": "s", "n": 1 })), Some(true));
        assert_eq!(checker.is("Both", &json!({ "x": "s", "n": "1" })), Some(false));
    }

    #[test]
    fn unknown_names_are_reported() {
        let decls = decls();
        assert_eq!(Checker::new(&decls).is("Nope", &json!(null)), None);
    }

    #[test]
    fn compound_literals() {
        assert!(literal_matches(&json!([1, "a"]), &json!([1.0, "a"])));
        assert!(!literal_matches(&json!([1]), &json!([1, 2])));
        assert!(literal_matches(&json!({ "k": 1 }), &json!({ "k": 1, "z": 0 })));
        assert!(!literal_matches(&json!({ "k": 1 }), &json!({})));
    }
}
