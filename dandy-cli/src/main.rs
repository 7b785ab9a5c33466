//! `dandy` — ambient developer-facing surface over the library's already-built
//! operations (§4.9 of the design): loading, printing, converting, combining and
//! comparing automaton files. None of these subcommands sit on the core regex-compile/
//! recognize path; they exist so the library's product construction, minimization and
//! equivalence checks are reachable without writing a throwaway `main`.

use clap::{Args, Parser, Subcommand};
use dandy::dfa::Dfa;
use dandy_cli::automata::{Automaton, Kind};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dandy", version, about = "Inspect, convert and combine DFA/NFA files")]
struct Cli {
    /// Suppress the ambient progress lines written to stderr, so scripts can capture
    /// only the final result.
    #[arg(long, global = true)]
    no_log: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a loaded automaton's transition table.
    Table {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "dfa")]
        r#type: Kind,
    },
    /// Explicit NFA-to-DFA subset construction, printing the resulting table.
    ToDfa {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "nfa")]
        r#type: Kind,
    },
    /// Render a loaded automaton as Graphviz `.dot` source.
    Dot {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "dfa")]
        r#type: Kind,
    },
    Union(BinaryOp),
    Intersection(BinaryOp),
    Difference(BinaryOp),
    SymmetricDifference(BinaryOp),
    /// Structural language-equivalence check between two automata.
    Equivalent(BinaryOp),
}

#[derive(Args)]
struct BinaryOp {
    a: PathBuf,
    b: PathBuf,
    #[arg(long, value_enum, default_value = "dfa")]
    r#type: Kind,
    /// Minimize the combined/compared automaton before printing its table.
    #[arg(long)]
    minimized: bool,
}

#[derive(Clone, Copy)]
enum CombineOp {
    Union,
    Intersection,
    Difference,
    SymmetricDifference,
}

fn main() -> ExitCode {
    dandy_cli::logging::init();
    let cli = Cli::parse();
    let log = |msg: &str| {
        if !cli.no_log {
            eprintln!("{msg}");
        }
    };

    let result = match cli.command {
        Command::Table { file, r#type } => Automaton::load(&file, r#type).map(|a| {
            log(&format!("loaded {}", file.display()));
            println!("{}", a.to_table());
        }),
        Command::ToDfa { file, r#type } => Automaton::load(&file, r#type).map(|a| {
            log(&format!("loaded {}", file.display()));
            let dfa = a.into_dfa();
            log(&format!("subset construction produced {} states", dfa.state_count()));
            println!("{}", dfa.to_table());
        }),
        Command::Dot { file, r#type } => Automaton::load(&file, r#type).map(|a| {
            log(&format!("loaded {}", file.display()));
            println!("{}", a.to_dot());
        }),
        Command::Union(op) => combine(op, CombineOp::Union, &log),
        Command::Intersection(op) => combine(op, CombineOp::Intersection, &log),
        Command::Difference(op) => combine(op, CombineOp::Difference, &log),
        Command::SymmetricDifference(op) => combine(op, CombineOp::SymmetricDifference, &log),
        Command::Equivalent(op) => equivalent(op, &log),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn combine(op: BinaryOp, which: CombineOp, log: &impl Fn(&str)) -> Result<(), String> {
    let a = Automaton::load(&op.a, op.r#type)?.into_dfa();
    let b = Automaton::load(&op.b, op.r#type)?.into_dfa();
    log(&format!(
        "loaded {} ({} states) and {} ({} states)",
        op.a.display(),
        a.state_count(),
        op.b.display(),
        b.state_count()
    ));

    let combined = match which {
        CombineOp::Union => a.union(&b),
        CombineOp::Intersection => a.intersection(&b),
        CombineOp::Difference => a.difference(&b),
        CombineOp::SymmetricDifference => a.symmetric_difference(&b),
    };
    let mut combined: Dfa = combined.ok_or_else(|| {
        format!(
            "{} and {} have different alphabets, cannot combine them",
            op.a.display(),
            op.b.display()
        )
    })?;

    if op.minimized {
        combined.minimize();
        log("minimized combined automaton");
    }
    println!("{}", combined.to_table());
    Ok(())
}

fn equivalent(op: BinaryOp, log: &impl Fn(&str)) -> Result<(), String> {
    let a = Automaton::load(&op.a, op.r#type)?.into_dfa();
    let b = Automaton::load(&op.b, op.r#type)?.into_dfa();
    log(&format!("loaded {} and {}", op.a.display(), op.b.display()));
    if a.equivalent_to(&b) {
        println!("equivalent");
        Ok(())
    } else {
        println!("not equivalent");
        Ok(())
    }
}
