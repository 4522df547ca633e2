use super::grammar_loader::{GrammarInput, load_grammar};

pub struct DumpArgs {
    pub grammar: GrammarInput,
    pub all: bool,
    pub classes: bool,
    pub plan: bool,
    pub compact: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let grammar = load_grammar(&args.grammar, args.compact, args.color);

    print!(
        "{}",
        grammar
            .printer()
            .all(args.all)
            .classes(args.classes)
            .colored(args.color)
            .render()
    );

    let diagnostics = grammar.diagnostics();
    if !diagnostics.is_empty() {
        let label = args.grammar.label();
        eprint!(
            "{}",
            diagnostics.printer().path(&label).colored(args.color).render()
        );
    }

    if !args.plan {
        return;
    }

    let plan = match grammar.plan() {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    println!();
    print!("{}", plan.dump(grammar.graph()));
}
