use std::io::{self, Write};
use std::process;

use anyhow::Context;
use clap::{arg, command, value_parser, ArgAction, ArgMatches, Command};

use thompson_nfa::{Compiler, Config, Matcher};

const EXIT_ERROR: i32 = 1;

fn cli() -> Command {
    command!()
        .about("Compile a regular expression into a Thompson NFA")
        .arg(
            arg!(<PATTERN>)
                .help("Regular expression, with concatenation written as '.'"),
        )
        .arg(
            arg!([INPUT])
                .help("Strings to match against the whole pattern")
                .action(ArgAction::Append),
        )
        .arg(
            arg!(--postfix)
                .help("The pattern is already in postfix (reverse Polish)"),
        )
        .arg(arg!(--dot).help("Print the automaton in Graphviz DOT format"))
        .arg(
            arg!(--"state-limit" <NUM_STATES>)
                .help("Fail if the automaton needs more states than this")
                .value_parser(value_parser!(usize)),
        )
}

fn main() {
    env_logger::init();

    if let Err(err) = run(&cli().get_matches()) {
        eprintln!("error: {:#}", err);
        process::exit(EXIT_ERROR);
    }
}

fn run(args: &ArgMatches) -> anyhow::Result<()> {
    let pattern = args.get_one::<String>("PATTERN").unwrap();
    let config = Config::new()
        .state_limit(args.get_one::<usize>("state-limit").copied());
    let compiler = Compiler::with_config(config);

    let nfa = if args.get_flag("postfix") {
        compiler.compile_postfix(pattern)
    } else {
        compiler.compile_infix(pattern)
    }
    .with_context(|| format!("failed to compile `{}`", pattern))?;

    let mut stdout = io::stdout().lock();

    if args.get_flag("dot") {
        nfa.to_dot(&mut stdout)?;
    } else {
        write!(stdout, "{}", nfa)?;
    }

    let matcher = Matcher::new(&nfa);
    for input in args.get_many::<String>("INPUT").into_iter().flatten() {
        let verdict =
            if matcher.is_match(input) { "match" } else { "no match" };
        writeln!(stdout, "{:?}: {}", input, verdict)?;
    }

    Ok(())
}
