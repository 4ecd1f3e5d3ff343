//! Compiler configuration: naming of the reserved scaffolding definitions,
//! the synthesized envelope suffix and the emitted module preamble.
//!
//! # Example YAML
//!
//! ```yaml
//! toplevel: JSONSchemaObject
//! envelope: JSSTTopLevel
//! anything: JSSTAnything
//! proto: [JSSTProtoInteger, JSSTProtoNumber, JSSTProtoString, JSSTProtoArray]
//! top_level_suffix: TopLevel
//! preamble: 'import * as t from "io-ts";'
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Name of the declaration built from the whole document.
    pub toplevel: String,
    /// Scaffolding definition carrying the cross-cutting fields merged into every `<D>TopLevel`.
    pub envelope: String,
    /// Scaffolding catch-all definition.
    pub anything: String,
    /// Schema-authoring helper definitions.
    pub proto: Vec<String>,
    pub top_level_suffix: String,
    pub preamble: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toplevel: "JSONSchemaObject".to_string(),
            envelope: "JSSTTopLevel".to_string(),
            anything: "JSSTAnything".to_string(),
            proto: ["JSSTProtoInteger", "JSSTProtoNumber", "JSSTProtoString", "JSSTProtoArray"]
                .into_iter()
                .map(String::from)
                .collect(),
            top_level_suffix: "TopLevel".to_string(),
            preamble: r#"import * as t from "io-ts";"#.to_string(),
        }
    }
}

impl Config {
    /// Load from a `.json` file, or YAML for any other extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_yaml_str(&source)
        };
        parsed.map_err(|message| ConfigError::Parse { path: path.to_path_buf(), message })
    }

    pub fn from_yaml_str(src: &str) -> Result<Self, String> {
        let de = serde_yaml::Deserializer::from_str(src);
        serde_path_to_error::deserialize(de).map_err(|err| {
            let path = err.path().to_string();
            format!("at key path {path} → {}", err.into_inner())
        })
    }

    pub fn from_json_str(src: &str) -> Result<Self, String> {
        let de = &mut serde_json::Deserializer::from_str(src);
        serde_path_to_error::deserialize(de).map_err(|err| {
            let path = err.path().to_string();
            format!("at key path {path} → {}", err.into_inner())
        })
    }

    /// The scaffolding definitions that never get a `<D>TopLevel` counterpart.
    pub fn is_reserved(&self, name: &str) -> bool {
        name == self.envelope || name == self.anything || self.proto.iter().any(|p| p == name)
    }

    pub fn top_level_name(&self, definition: &str) -> String {
        format!("{definition}{}", self.top_level_suffix)
    }
}
