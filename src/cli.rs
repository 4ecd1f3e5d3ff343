//! Minimal CLI: schema document → (io-ts module | declaration listing)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::info;

use crate::config::Config;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// compile a JSON-Schema-shaped YAML/JSON document into io-ts codecs and TypeScript type aliases
#[derive(Parser, Debug)]
#[command(name = "jsst-gen", version)]
pub struct CommandLineInterface {
    /// log at debug level (RUST_LOG still wins when set)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// compile and emit the io-ts module
    Generate(GenerateOut),
    /// compile and list the declaration names in emission order
    Declarations(DeclarationsOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// schema document; `.json` is read as JSON, anything else as YAML
    #[arg(long, short)]
    input: PathBuf,

    /// name of the declaration built from the whole document (overrides the config file)
    #[arg(long)]
    toplevel: Option<String>,

    /// YAML/JSON file with scaffolding names, suffix and preamble
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct DeclarationsOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_config(&self) -> Result<Config> {
        let mut config = match self.config.as_ref() {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(toplevel) = self.toplevel.as_ref() {
            config.toplevel = toplevel.clone();
        }
        Ok(config)
    }

    fn load_document(&self) -> Result<Value> {
        read_document(&self.input)
    }

    fn compile(&self) -> Result<(crate::Compilation, Config)> {
        let config = self.load_config()?;
        let document = self.load_document()?;
        let compilation = crate::compile(&document, &config)
            .with_context(|| format!("failed to compile {}", self.input.display()))?;
        Ok((compilation, config))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let (compilation, config) = target.input_settings.compile()?;
                let module_src = compilation.to_module(&config.preamble);

                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("failed to create {}", parent.display()))?;
                    }
                    std::fs::write(out, &module_src)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                    info!(
                        out = %out.display(),
                        declarations = compilation.declarations.len(),
                        "wrote module"
                    );
                } else {
                    print!("{module_src}");
                }
            }
            Command::Declarations(target) => {
                let (compilation, _) = target.input_settings.compile()?;
                for name in compilation.names() {
                    println!("{name}");
                }
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Read and decode a schema document. `.json` files go through serde_json, everything else through serde_yaml.
pub fn read_document(path: &Path) -> Result<Value> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read source file {}", path.display()))?;
    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let value = if is_json {
        serde_json::from_str::<Value>(&source)
            .with_context(|| format!("failed to parse JSON source file {}", path.display()))?
    } else {
        serde_yaml::from_str::<Value>(&source)
            .with_context(|| format!("failed to parse YAML source file {}", path.display()))?
    };
    Ok(value)
}
