use climb_lib::Grammar;

use super::grammar_loader::{GrammarInput, load_grammar};

pub struct CheckArgs {
    pub grammar: GrammarInput,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let grammar = load_grammar(&args.grammar, false, args.color);

    let diagnostics = grammar.diagnostics();
    if !diagnostics.is_empty() {
        let label = args.grammar.label();
        eprint!(
            "{}",
            diagnostics.printer().path(&label).colored(args.color).render()
        );
    }

    if !passes(&grammar, args.strict) {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}

pub(crate) fn passes(grammar: &Grammar, strict: bool) -> bool {
    if strict {
        grammar.diagnostics().is_empty()
    } else {
        grammar.is_valid()
    }
}
