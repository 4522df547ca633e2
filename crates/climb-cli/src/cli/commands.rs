//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! All commands accept every flag so that a command line can be switched
//! between `check`, `dump` and `exec` by changing only the subcommand; flags
//! a command ignores are hidden from its `--help`.

use clap::Command;

use super::args::*;

/// Add hidden input args (for commands that don't run the grammar).
fn with_hidden_source_args(cmd: Command) -> Command {
    cmd.arg(source_path_arg().hide(true))
        .arg(source_text_arg().hide(true))
}

/// Add hidden dump listing args (for commands that don't print the grammar).
fn with_hidden_dump_args(cmd: Command) -> Command {
    cmd.arg(all_arg().hide(true))
        .arg(classes_arg().hide(true))
        .arg(plan_arg().hide(true))
}

/// Add hidden execution args (for commands that don't run the grammar).
fn with_hidden_exec_args(cmd: Command) -> Command {
    cmd.arg(entry_arg().hide(true))
        .arg(trace_arg().hide(true))
        .arg(verbose_arg().hide(true))
        .arg(fuel_arg().hide(true))
        .arg(depth_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("climb")
        .about("Left-recursion analysis and recursive ascent for PEG grammars")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(exec_command())
}

/// Analyze a grammar and report diagnostics.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Analyze a grammar and report diagnostics")
        .override_usage(
            "\
  climb check <GRAMMAR>
  climb check -g <JSON>",
        )
        .after_help(
            r#"EXAMPLES:
  climb check grammar.json            # errors only fail the check
  climb check grammar.json --strict   # warnings fail it too
  cat grammar.json | climb check -    # read from stdin"#,
        )
        .arg(grammar_path_arg())
        .arg(grammar_text_arg())
        .arg(strict_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_exec_args(with_hidden_dump_args(with_hidden_source_args(
        cmd.arg(compact_arg().hide(true)),
    )))
}

/// Print the analyzed grammar.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show attributes, recursion classes and the ascent plan")
        .override_usage(
            "\
  climb dump <GRAMMAR>
  climb dump -g <JSON>",
        )
        .after_help(
            r#"EXAMPLES:
  climb dump grammar.json                    # rules with attribute codes
  climb dump grammar.json --all --classes    # everything
  climb dump grammar.json --plan             # ascent procedures
  climb dump grammar.json --compact --all    # after deduplication"#,
        )
        .arg(grammar_path_arg())
        .arg(grammar_text_arg())
        .arg(all_arg())
        .arg(classes_arg())
        .arg(plan_arg())
        .arg(compact_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_exec_args(with_hidden_source_args(cmd.arg(strict_arg().hide(true))))
}

/// Parse input with a grammar.
pub fn exec_command() -> Command {
    let cmd = Command::new("exec")
        .about("Parse input with a grammar and print the phrase tree")
        .override_usage(
            "\
  climb exec <GRAMMAR> <SOURCE>
  climb exec -g <JSON> <SOURCE>
  climb exec -g <JSON> -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  climb exec grammar.json input.txt              # two positional files
  climb exec -g '{"rules":[...]}' input.txt      # inline grammar
  climb exec grammar.json -s 'a+a+a' --trace -v  # trace seeds and ascents"#,
        )
        .arg(grammar_path_arg())
        .arg(source_path_arg())
        .arg(grammar_text_arg())
        .arg(source_text_arg())
        .arg(entry_arg())
        .arg(compact_arg())
        .arg(trace_arg())
        .arg(verbose_arg())
        .arg(fuel_arg())
        .arg(depth_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_dump_args(cmd.arg(strict_arg().hide(true)))
}
