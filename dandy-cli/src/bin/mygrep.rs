//! `mygrep <regex> <word>` — compile `<regex>` to an NFA, simulate it on `<word>`, print
//! whether the word was accepted (§6.1). Exit code 0 regardless of acceptance; 1 on any
//! argument, lexical, or syntax error.

use clap::Parser;
use dandy::parser;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mygrep", about = "Test a word against a regular expression")]
struct Args {
    /// A regex over `a-z`, `A-Z`, `0-9`, with `+` (union), `.`/implicit (concat), `*`
    /// (Kleene star) and parenthesis for grouping.
    regex: String,
    word: String,
}

fn main() -> ExitCode {
    dandy_cli::logging::init();
    let args = Args::parse();

    let regex = match parser::regex(&args.regex) {
        Ok(regex) => regex,
        Err(err) => {
            eprintln!("{}", err.render(&args.regex));
            return ExitCode::FAILURE;
        }
    };

    let nfa = regex.to_nfa();
    if nfa.recognize(args.word.as_bytes()) {
        println!("\"{}\" est acceptée", args.word);
    } else {
        println!("\"{}\" est rejetée", args.word);
    }
    ExitCode::SUCCESS
}
