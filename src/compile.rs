use serde_json::Value;
use tracing::{debug, info_span};

use crate::check::Checker;
use crate::codegen::{self, Rendered};
use crate::config::Config;
use crate::declare;
use crate::error::CompileError;
use crate::ir::Declaration;
use crate::sort;

/// The result of one compilation: sorted declarations and their rendered pairs, in the same order.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub declarations: Vec<Declaration>,
    pub rendered: Vec<Rendered>,
}

/// collect → resolve → sort → render, all or nothing.
pub fn compile(document: &Value, config: &Config) -> Result<Compilation, CompileError> {
    let _span = info_span!("compile", toplevel = %config.toplevel).entered();

    let declarations = declare::collect(document, config)?;
    declare::resolve(&declarations)?;
    let declarations = sort::sort(declarations);
    let rendered = codegen::render(&declarations);

    debug!(declarations = declarations.len(), "compilation finished");
    Ok(Compilation { declarations, rendered })
}

impl Compilation {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(|d| d.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }

    pub fn checker(&self) -> Checker<'_> {
        Checker::new(&self.declarations)
    }

    /// The full io-ts module text.
    pub fn to_module(&self, preamble: &str) -> String {
        let mut cg = codegen::Codegen::new(preamble);
        cg.emit(&self.rendered);
        cg.into_string()
    }
}
