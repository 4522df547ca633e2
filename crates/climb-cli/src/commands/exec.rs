//! Parse input with a grammar and print the phrase tree.

use std::path::PathBuf;

use climb_core::Colors;
use climb_lib::engine::{Engine, Phrase, PrintTracer, RuntimeError, Verbosity};

use super::grammar_loader::{GrammarInput, load_grammar, load_source};

pub struct ExecArgs {
    pub grammar: GrammarInput,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub entry: Option<String>,
    pub compact: bool,
    pub trace: bool,
    pub verbosity: Verbosity,
    pub fuel: u32,
    pub depth: u32,
    pub color: bool,
}

pub fn run(args: ExecArgs) {
    let source = match load_source(args.source_path.as_deref(), args.source_text.as_deref()) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    let grammar = load_grammar(&args.grammar, args.compact, args.color);
    if !grammar.is_valid() {
        let label = args.grammar.label();
        eprint!(
            "{}",
            grammar
                .diagnostics()
                .printer()
                .path(&label)
                .colored(args.color)
                .render()
        );
    }

    let mut engine = match Engine::new(&grammar) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    engine = engine.with_exec_fuel(args.fuel).with_recursion_fuel(args.depth);
    if let Some(entry) = &args.entry {
        engine = engine.with_start(entry.as_str());
    }

    let colors = Colors::new(args.color);
    let result = if args.trace {
        let mut tracer = PrintTracer::new(grammar.graph(), &source, args.verbosity, colors);
        let result = engine.run_traced(&source, &mut tracer);
        tracer.print();
        result
    } else {
        engine.run(&source)
    };

    match result {
        Ok(Some(phrase)) => {
            print!("{}", phrase.pretty());
            if let Some(note) = unconsumed_note(&phrase, &source) {
                eprintln!("{}note:{} {note}", colors.dim, colors.reset);
            }
        }
        Ok(None) => {
            eprintln!("no match");
            std::process::exit(1);
        }
        Err(RuntimeError::UnknownRule(name)) => {
            eprintln!("error: no rule named `{}`", name);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("runtime error: {}", e);
            std::process::exit(2);
        }
    }
}

/// A successful match may stop before the end of the input.
pub(crate) fn unconsumed_note(phrase: &Phrase, source: &str) -> Option<String> {
    (phrase.end < source.len()).then(|| {
        format!(
            "matched {} of {} bytes; input not consumed from offset {}",
            phrase.end,
            source.len(),
            phrase.end
        )
    })
}
