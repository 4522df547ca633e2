use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use climb_core::grammar::GrammarDef;
use climb_lib::{Grammar, GrammarBuilder};

/// Where the grammar document comes from.
#[derive(Debug, Default)]
pub struct GrammarInput {
    pub path: Option<PathBuf>,
    pub text: Option<String>,
}

impl GrammarInput {
    /// Label used in front of diagnostics.
    pub fn label(&self) -> String {
        match (&self.text, &self.path) {
            (None, Some(path)) if path.as_os_str() == "-" => "<stdin>".to_string(),
            (None, Some(path)) => path.display().to_string(),
            _ => "<inline>".to_string(),
        }
    }
}

pub fn load_grammar_def(input: &GrammarInput) -> Result<GrammarDef, String> {
    let json = if let Some(text) = &input.text {
        text.clone()
    } else if let Some(path) = &input.path {
        if path.as_os_str() == "-" {
            read_stdin()?
        } else {
            read_file(path)?
        }
    } else {
        return Err("grammar is required: use positional argument or -g/--grammar".to_string());
    };

    GrammarDef::from_json(&json).map_err(|e| format!("invalid grammar '{}': {}", input.label(), e))
}

pub fn load_source(path: Option<&Path>, text: Option<&str>) -> Result<String, String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }
    match path {
        Some(path) if path.as_os_str() == "-" => read_stdin(),
        Some(path) => read_file(path),
        None => Err("input is required: use positional argument or -s/--source".to_string()),
    }
}

/// Load, resolve and analyze the grammar, exiting with the resolution
/// diagnostics when rule names don't resolve.
pub fn load_grammar(input: &GrammarInput, compact: bool, color: bool) -> Grammar {
    let def = match load_grammar_def(input) {
        Ok(def) => def,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    match GrammarBuilder::new(&def).with_compaction(compact).build() {
        Ok(indexed) => indexed.analyze(),
        Err(climb_lib::Error::Resolve(diag)) => {
            let label = input.label();
            eprint!("{}", diag.printer().path(&label).colored(color).render());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

fn read_stdin() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(buf)
}

fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}
