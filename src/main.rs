use std::{fs, io::Read, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use automata_course_helper::{
    automata::turing::{Halt, DEFAULT_MAX_STEPS},
    convert_to_gnf, Dfa101, Recognizer, TuringMachine,
};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all log output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a context-free grammar to Greibach Normal Form
    Gnf {
        /// File containing the grammar (default: stdin)
        file: Option<PathBuf>,

        /// Print in LaTeX format
        #[arg(short, long, conflicts_with = "json")]
        latex: bool,

        /// Print in JSON format
        #[arg(short, long)]
        json: bool,

        /// Only print the final grammar
        #[arg(long)]
        final_only: bool,
    },
    /// Check binary strings for the substring "101"
    Dfa {
        #[arg(required = true)]
        inputs: Vec<String>,
    },
    /// Check binary numerals for divisibility by 3 on a Turing machine
    Tm {
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Step limit per input
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: usize,
    },
}

fn read_input(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

fn verdict(accepted: bool) -> &'static str {
    if accepted {
        "Accepted"
    } else {
        "Rejected"
    }
}

/// Non-binary input is reported as rejected.
fn dfa_verdict(input: &str) -> &'static str {
    if input.chars().all(|c| c == '0' || c == '1') {
        verdict(Dfa101.accepts(input))
    } else {
        "Rejected (not a binary string)"
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    stderrlog::new()
        .module(module_path!())
        .quiet(cli.quiet)
        .verbosity(cli.verbose as usize + 1)
        .init()?;

    match cli.command {
        Command::Gnf {
            file,
            latex,
            json,
            final_only,
        } => {
            let input = read_input(file)?;
            let conversion = convert_to_gnf(&input)?;
            let output = conversion.to_conversion_output(final_only);
            println!(
                "{}",
                if json {
                    output.to_json()
                } else if latex {
                    output.to_latex()
                } else {
                    output.to_plaintext()
                }
            );
            if !conversion.final_grammar().is_gnf() {
                log::warn!("the final grammar is not in strict GNF");
            }
        }
        Command::Dfa { inputs } => {
            for input in inputs {
                println!("'{}': {}", input, dfa_verdict(&input));
            }
        }
        Command::Tm { inputs, max_steps } => {
            let tm = TuringMachine::divisible_by_three();
            for input in inputs {
                let result = match tm.run(&input, max_steps) {
                    Halt::Accepted => verdict(true),
                    Halt::Rejected => verdict(false),
                    Halt::StepLimitReached => "Step limit reached",
                };
                println!("'{}': {}", input, result);
            }
        }
    }

    Ok(())
}
