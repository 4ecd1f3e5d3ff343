//! Declaration collection.
//!
//! Every definition becomes a declaration, every non-scaffolding definition
//! also gets a `<D>TopLevel` counterpart merging it with the envelope, and
//! the document root (minus `definitions`) becomes one more declaration.

use std::collections::HashSet;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::CompileError;
use crate::ir::{Declaration, Ty};
use crate::lower::lower_to_ir;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier regex is valid"));

/// Words that cannot name a `const` binding or a `type` alias in the emitted module.
static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // ECMAScript reserved words
        "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
        "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
        "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this",
        "throw", "true", "try", "typeof", "var", "void", "while", "with",
        // strict mode and module code
        "arguments", "await", "eval", "implements", "interface", "let", "package", "private",
        "protected", "public", "static", "yield",
        // predefined type names, rejected as type alias names
        "any", "bigint", "boolean", "never", "number", "object", "string", "symbol",
        "undefined", "unknown",
    ]
    .into_iter()
    .collect()
});

/// Lexical identifier check. Reserved words pass: they are fine as bare property keys.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Whether `name` can be bound by both `const name` and `type name`.
pub fn is_declaration_name(name: &str) -> bool {
    is_identifier(name) && !RESERVED_WORDS.contains(name)
}

/// Collect the unsorted declaration set of one document.
pub fn collect(document: &Value, config: &Config) -> Result<Vec<Declaration>, CompileError> {
    let Value::Object(root) = document else {
        return Err(CompileError::InvalidDocument(format!(
            "expected an object at the document root, found {}",
            json_kind(document)
        )));
    };
    let definitions = definitions_of(root)?;

    let mut declared: IndexMap<String, Ty> = IndexMap::with_capacity(definitions.len() * 2 + 1);
    for (name, node) in definitions {
        trace!(declaration = %name, "collecting definition");
        declared.insert(name.clone(), lower_to_ir(node));
    }

    let envelope_targets: Vec<&String> =
        definitions.keys().filter(|name| !config.is_reserved(name)).collect();
    for name in envelope_targets {
        // a synthesized name that already exists is replaced in place
        declared.insert(config.top_level_name(name), envelope_variant(name, config));
    }

    if declared.contains_key(&config.toplevel) {
        return Err(CompileError::DuplicateDeclaration(config.toplevel.clone()));
    }
    let body: Map<String, Value> = root
        .iter()
        .filter(|(key, _)| key.as_str() != "definitions")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    declared.insert(config.toplevel.clone(), lower_to_ir(&Value::Object(body)));

    let declarations: Vec<Declaration> = declared
        .into_iter()
        .map(|(name, ty)| Declaration { name, ty })
        .collect();
    if let Some(bad) = declarations.iter().find(|d| !is_declaration_name(&d.name)) {
        return Err(CompileError::InvalidDeclarationName(bad.name.clone()));
    }
    debug!(
        definitions = definitions.len(),
        declarations = declarations.len(),
        "collected declarations"
    );
    Ok(declarations)
}

/// Fail on the first named identifier that no declaration provides.
pub fn resolve(declarations: &[Declaration]) -> Result<(), CompileError> {
    let known: HashSet<&str> = declarations.iter().map(|d| d.name.as_str()).collect();
    for decl in declarations {
        if let Some(missing) = decl.ty.references().into_iter().find(|r| !known.contains(r)) {
            return Err(CompileError::UnresolvedReference {
                name: missing.to_string(),
                referenced_by: decl.name.clone(),
            });
        }
    }
    Ok(())
}

fn envelope_variant(definition: &str, config: &Config) -> Ty {
    Ty::Intersection(vec![Ty::named(definition), Ty::named(config.envelope.as_str())])
}

fn definitions_of(root: &Map<String, Value>) -> Result<&Map<String, Value>, CompileError> {
    static EMPTY: Lazy<Map<String, Value>> = Lazy::new(Map::new);
    match root.get("definitions") {
        None => Ok(&*EMPTY),
        Some(Value::Object(definitions)) => Ok(definitions),
        Some(other) => Err(CompileError::InvalidDocument(format!(
            "expected `definitions` to be an object, found {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
