//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors that pull relevant fields (ignoring hidden ones)
//! - `Into<*Args>` impls to bridge dispatch → command handlers
//! - Positional shifting for exec (`-g` shifts the first positional to source)

use std::path::PathBuf;

use clap::ArgMatches;
use climb_lib::engine::{DEFAULT_EXEC_FUEL, DEFAULT_RECURSION_FUEL, Verbosity};

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::exec::ExecArgs;
use crate::commands::grammar_loader::GrammarInput;

pub struct CheckParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            grammar_text: m.get_one::<String>("grammar_text").cloned(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            grammar: GrammarInput {
                path: p.grammar_path,
                text: p.grammar_text,
            },
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub all: bool,
    pub classes: bool,
    pub plan: bool,
    pub compact: bool,
    pub color: ColorChoice,
    // Note: source, strict, entry, trace, verbose, fuel and depth are parsed
    // but not extracted (unified flags)
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            grammar_text: m.get_one::<String>("grammar_text").cloned(),
            all: m.get_flag("all"),
            classes: m.get_flag("classes"),
            plan: m.get_flag("plan"),
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            grammar: GrammarInput {
                path: p.grammar_path,
                text: p.grammar_text,
            },
            all: p.all,
            classes: p.classes,
            plan: p.plan,
            compact: p.compact,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ExecParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub entry: Option<String>,
    pub compact: bool,
    pub trace: bool,
    pub verbose: u8,
    pub fuel: u32,
    pub depth: u32,
    pub color: ColorChoice,
}

impl ExecParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let grammar_path = m.get_one::<PathBuf>("grammar_path").cloned();
        let grammar_text = m.get_one::<String>("grammar_text").cloned();
        let source_path = m.get_one::<PathBuf>("source_path").cloned();

        // Positional shifting: when -g is used with a single positional,
        // shift it from grammar_path to source_path.
        let (grammar_path, source_path) =
            shift_positional_to_source(grammar_text.is_some(), grammar_path, source_path);

        Self {
            // Input (with positional shifting applied)
            grammar_path,
            grammar_text,
            source_path,
            source_text: m.get_one::<String>("source_text").cloned(),

            // Run options
            entry: m.get_one::<String>("entry").cloned(),
            compact: m.get_flag("compact"),
            trace: m.get_flag("trace"),
            verbose: m.get_count("verbose"),
            fuel: m.get_one::<u32>("fuel").copied().unwrap_or(DEFAULT_EXEC_FUEL),
            depth: m
                .get_one::<u32>("depth")
                .copied()
                .unwrap_or(DEFAULT_RECURSION_FUEL),
            color: parse_color(m),
        }
    }
}

impl From<ExecParams> for ExecArgs {
    fn from(p: ExecParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };

        Self {
            grammar: GrammarInput {
                path: p.grammar_path,
                text: p.grammar_text,
            },
            source_path: p.source_path,
            source_text: p.source_text,
            entry: p.entry,
            compact: p.compact,
            // -v without --trace still asks for a trace
            trace: p.trace || p.verbose > 0,
            verbosity,
            fuel: p.fuel,
            depth: p.depth,
            color: p.color.should_colorize(),
        }
    }
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// When -g is used with a single positional arg, shift it from grammar to source.
/// This enables: `climb exec -g '{...}' input.txt`
fn shift_positional_to_source(
    has_grammar_text: bool,
    grammar_path: Option<PathBuf>,
    source_path: Option<PathBuf>,
) -> (Option<PathBuf>, Option<PathBuf>) {
    if has_grammar_text && grammar_path.is_some() && source_path.is_none() {
        (None, grammar_path)
    } else {
        (grammar_path, source_path)
    }
}
