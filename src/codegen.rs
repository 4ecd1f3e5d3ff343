//! Rendering of sorted declarations into io-ts runtime codecs and TypeScript
//! type aliases.
//!
//! The two artifacts come from two independent folds over the same [`Ty`]
//! tree ([`runtime`] and [`statics`]); neither is derived from the other.
pub mod runtime;
pub mod statics;

use std::collections::HashMap;

use serde_json::Value;

use crate::declare::is_identifier;
use crate::ir::{Declaration, Ty};

/// The textual pair emitted for one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub name: String,
    /// `const Name = <codec>;`
    pub runtime: String,
    /// `type Name = <type>;`
    pub alias: String,
}

/// Render every declaration, keeping the given (sorted) order.
pub fn render(declarations: &[Declaration]) -> Vec<Rendered> {
    let position: HashMap<&str, usize> = declarations
        .iter()
        .enumerate()
        .map(|(idx, d)| (d.name.as_str(), idx))
        .collect();

    declarations
        .iter()
        .enumerate()
        .map(|(idx, decl)| {
            let lazy = refers_forward(&decl.ty, idx, &position);
            Rendered {
                name: decl.name.clone(),
                runtime: runtime::declaration(decl, lazy),
                alias: statics::declaration(decl),
            }
        })
        .collect()
}

// naming itself or anything emitted later means the codec can't be built eagerly
fn refers_forward(ty: &Ty, idx: usize, position: &HashMap<&str, usize>) -> bool {
    ty.references()
        .into_iter()
        .any(|name| position.get(name).is_some_and(|&at| at >= idx))
}

/// Assembles the emitted module: preamble, then every runtime codec, then every alias.
#[derive(Debug, Default)]
pub struct Codegen {
    lines: Vec<String>,
    aliases: Vec<String>,
}

impl Codegen {
    pub fn new(preamble: &str) -> Self {
        Self {
            lines: vec![preamble.to_string()],
            aliases: Vec::new(),
        }
    }

    pub fn emit(&mut self, rendered: &[Rendered]) {
        for r in rendered {
            self.lines.push(format!("export {}", r.runtime));
            self.aliases.push(format!("export {}", r.alias));
        }
    }

    pub fn into_string(self) -> String {
        let mut out = self.lines;
        out.extend(self.aliases);
        let mut src = out.join("\n");
        src.push('\n');
        src
    }
}

// ————————————————————————————————————————————————————————————————————————————
// SHARED HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Object keys: bare when a valid identifier, JSON-quoted otherwise.
pub(crate) fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        Value::from(name).to_string()
    }
}
