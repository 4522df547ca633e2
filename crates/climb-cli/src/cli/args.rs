//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.
//! This allows the same arg definition to be reused across commands with
//! different visibility settings (via `.hide(true)`).

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Grammar JSON file (positional, `-` for stdin).
pub fn grammar_path_arg() -> Arg {
    Arg::new("grammar_path")
        .value_name("GRAMMAR")
        .value_parser(value_parser!(PathBuf))
        .help("Grammar JSON file ('-' for stdin)")
}

/// Inline grammar JSON (-g/--grammar).
pub fn grammar_text_arg() -> Arg {
    Arg::new("grammar_text")
        .short('g')
        .long("grammar")
        .value_name("JSON")
        .help("Inline grammar JSON")
}

/// Input file to parse (positional).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("SOURCE")
        .value_parser(value_parser!(PathBuf))
        .help("Input file to parse")
}

/// Inline input text (-s/--source).
pub fn source_text_arg() -> Arg {
    Arg::new("source_text")
        .short('s')
        .long("source")
        .value_name("TEXT")
        .help("Inline input text")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Merge duplicate subexpressions (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Merge duplicate subexpressions after analysis")
}

/// List inner expressions and terminals (--all).
pub fn all_arg() -> Arg {
    Arg::new("all")
        .long("all")
        .action(ArgAction::SetTrue)
        .help("Also list inner expressions and terminals")
}

/// List recursion classes (--classes).
pub fn classes_arg() -> Arg {
    Arg::new("classes")
        .long("classes")
        .action(ArgAction::SetTrue)
        .help("List recursion classes with members, entries and seeds")
}

/// Show ascent procedures (--plan).
pub fn plan_arg() -> Arg {
    Arg::new("plan")
        .long("plan")
        .action(ArgAction::SetTrue)
        .help("Show the ascent plan of every recursion class")
}

/// Start rule (--entry).
pub fn entry_arg() -> Arg {
    Arg::new("entry")
        .long("entry")
        .value_name("RULE")
        .help("Start rule (default: the first rule)")
}

/// Print an execution trace to stderr (--trace).
pub fn trace_arg() -> Arg {
    Arg::new("trace")
        .long("trace")
        .action(ArgAction::SetTrue)
        .help("Print an execution trace to stderr")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Trace verbosity (-v adds seeds and ascents, -vv adds matched text)")
}

/// Execution fuel limit (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .default_value("1000000")
        .value_parser(value_parser!(u32))
        .help("Execution fuel limit")
}

/// Recursion fuel limit (--depth).
pub fn depth_arg() -> Arg {
    Arg::new("depth")
        .long("depth")
        .value_name("N")
        .default_value("1024")
        .value_parser(value_parser!(u32))
        .help("Maximum nesting of rule calls")
}
