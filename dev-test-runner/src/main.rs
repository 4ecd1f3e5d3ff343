//! Compile a schema and check JSON samples against the generated declarations.
//!
//! Samples are named `<Declaration>.<label>.json` (must be accepted) or
//! `<Declaration>.<label>.invalid.json` (must be rejected).
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use jsst_gen::{cli::read_document, compile, Config};

#[derive(Parser, Debug)]
struct Args {
    /// schema document (YAML or JSON)
    #[arg(long)]
    schema: PathBuf,

    /// directory of sample files
    #[arg(long)]
    samples: PathBuf,

    /// config file for scaffolding names
    #[arg(long)]
    config: Option<PathBuf>,
}

struct Sample {
    path: PathBuf,
    declaration: String,
    expect_valid: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match args.config.as_ref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let document = read_document(&args.schema)?;
    let compilation = compile(&document, &config)
        .with_context(|| format!("failed to compile {}", args.schema.display()))?;
    let checker = compilation.checker();

    let samples = collect_samples(&args.samples)?;
    let mut failures = 0usize;
    for sample in &samples {
        let source = std::fs::read_to_string(&sample.path)
            .with_context(|| format!("failed to read {}", sample.path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&source)
            .with_context(|| format!("failed to parse {}", sample.path.display()))?;
        let label = sample.path.file_name().unwrap_or_default().to_string_lossy();
        match checker.is(&sample.declaration, &value) {
            None => {
                failures += 1;
                eprintln!("{} {label}: no declaration `{}`", "❌".red(), sample.declaration);
            }
            Some(accepted) if accepted == sample.expect_valid => {
                eprintln!("{} {label}", "✅".green());
            }
            Some(accepted) => {
                failures += 1;
                let verdict = if accepted { "accepted" } else { "rejected" };
                eprintln!("{} {label}: unexpectedly {verdict}", "❌".red());
            }
        }
    }

    eprintln!("{} samples, {} failed", samples.len(), failures);
    if failures > 0 {
        bail!("{failures} sample(s) did not match expectations");
    }
    Ok(())
}

fn collect_samples(dir: &Path) -> Result<Vec<Sample>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))? {
        let path = entry?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(stem) = file_name.strip_suffix(".json") else {
            continue;
        };
        let (stem, expect_valid) = match stem.strip_suffix(".invalid") {
            Some(stem) => (stem, false),
            None => (stem, true),
        };
        let declaration = stem.split('.').next().unwrap_or(stem).to_string();
        out.push(Sample { path: path.clone(), declaration, expect_valid });
    }
    out.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(out)
}
