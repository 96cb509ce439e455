use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::Instant,
};

use approx::relative_eq;
use clap::Parser;
use infixa::{EvalOptions, error::EvalError, evaluate_with, parse};

/// infixa is an infix arithmetic expression parser and evaluator.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluate a single expression and print its value.
    #[arg(short, long)]
    expression: Option<String>,

    /// Evaluate every line of a batch file. Each line holds an expression
    /// followed by whitespace and the expected value; failures are appended
    /// to failed.txt.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Run the built-in expression suite.
    #[arg(short = 't', long)]
    self_test: bool,

    /// Read a file of expressions and print the parse tree, its validity,
    /// and the evaluated value for each line.
    #[arg(short = 'o', long)]
    dump: Option<PathBuf>,

    /// Show the detailed calculation from tokens to the final value.
    #[arg(short, long)]
    detailed: bool,
}

/// Pass/fail bookkeeping for one run.
#[derive(Default)]
struct Stats {
    passed: usize,
    failed: usize,
}

impl Stats {
    const fn tested(&self) -> usize {
        self.passed + self.failed
    }
}

/// Relative tolerance for comparing a computed value against an expectation.
const COMPARE_TOLERANCE: f64 = 1e-9;

/// The original batch of expressions shipped with the calculator, used by
/// `--self-test`.
const BUILTIN_SUITE: &[(&str, f64)] = &[
    ("+14.0", 14.0),
    ("-14.0", -14.0),
    ("+14", 14.0),
    ("7+7", 14.0),
    ("-1+2", 1.0),
    ("(5+10*(3-9))", -55.0),
    (".0 + .1 + .2 + .3 + .5 + .6", 1.7),
    ("1.0+3.0*2.0", 7.0),
    ("1.0-3.0*2.0", -5.0),
    ("1.0 *                           3.0+2.0", 5.0),
    ("-4.0-8.1", -12.1),
    ("1.0*3.0-2.0", 1.0),
    ("1.0+3.0/2.0", 2.5),
    ("1.0+(3.0*2.0-4.0)", 3.0),
    ("1.0-(3.0*2.0+4.0)", -9.0),
    ("2*3**2)", 18.0),
    ("2**3**2)", 512.0),
    ("2 ** (-1)", 0.5),
    ("2 ** (-0.2 + 0.2)", 1.0),
    ("0**2", 0.0),
    ("--5", 5.0),
    ("---5", -5.0),
    ("", 0.0),
];

fn main() {
    let args = Args::parse();
    let options = EvalOptions { trace: args.detailed };
    let started = Instant::now();
    let mut stats = Stats::default();

    if let Some(path) = &args.dump {
        dump_file(&read_or_exit(path));
        return;
    }

    if args.self_test {
        run_builtin_suite(&options, &mut stats);
    }

    if let Some(path) = &args.file {
        run_batch(&read_or_exit(path), &options, &mut stats);
    }

    if let Some(expression) = &args.expression {
        run_single(expression, &options, &mut stats);
    }

    println!("Tested {} expressions", stats.tested());
    println!("PASSED {}", stats.passed);
    println!("Total time (sec): {:.2}", started.elapsed().as_secs_f64());
}

fn read_or_exit(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|error| {
                                eprintln!("Failed to read '{}': {error}", path.display());
                                std::process::exit(1);
                            })
}

/// Evaluates one expression and compares the result against an expectation.
///
/// Updates the pass/fail counters and returns whether the expression
/// matched. An evaluation error counts as a failure and is reported.
fn check_expression(expression: &str,
                    expected: f64,
                    options: &EvalOptions,
                    stats: &mut Stats)
                    -> bool {
    let matched = match evaluate_with(expression, options) {
        Ok(value) => {
            if options.trace {
                println!("Comparing expr: {value} with value: {expected}");
            }
            relative_eq!(value,
                         expected,
                         epsilon = COMPARE_TOLERANCE,
                         max_relative = COMPARE_TOLERANCE)
        },
        Err(error) => {
            eprintln!("{error}");
            false
        },
    };

    if matched {
        stats.passed += 1;
    } else {
        stats.failed += 1;
        if options.trace {
            println!("Test failed in expression: {expression}");
        }
    }
    if options.trace {
        println!("------------------------------");
    }
    matched
}

fn run_builtin_suite(options: &EvalOptions, stats: &mut Stats) {
    for (expression, expected) in BUILTIN_SUITE {
        check_expression(expression, *expected, options, stats);
    }
}

/// Runs every line of a batch file and logs failing lines to failed.txt.
///
/// A line is `<expression><whitespace><expected-value>`; lines that do not
/// fit the format are reported and skipped without touching the counters.
fn run_batch(content: &str, options: &EvalOptions, stats: &mut Stats) {
    let mut log = fs::OpenOptions::new().create(true)
                                        .append(true)
                                        .open("failed.txt")
                                        .ok();

    for (number, line) in content.lines().enumerate() {
        let mut parts = line.split_whitespace();
        let expression = parts.next();
        let expected = parts.next().and_then(|text| text.parse::<f64>().ok());

        let (Some(expression), Some(expected)) = (expression, expected) else {
            println!("Invalid line found in line number: {}", number + 1);
            continue;
        };

        if !check_expression(expression, expected, options, stats)
           && let Some(log) = log.as_mut()
           && let Err(error) = writeln!(log, "{expression}\t\t\t{expected}")
        {
            eprintln!("Failed to update failed.txt: {error}");
        }
    }
}

fn run_single(expression: &str, options: &EvalOptions, stats: &mut Stats) {
    if expression.trim().is_empty() {
        eprintln!("{}", EvalError::NoExpressionGiven);
        stats.failed += 1;
        return;
    }

    match evaluate_with(expression, options) {
        Ok(value) => {
            println!("{value}");
            stats.passed += 1;
        },
        Err(error) => {
            eprintln!("{error}");
            stats.failed += 1;
        },
    }
}

/// Prints the parse tree, its validity, and the value for every line of a
/// file.
fn dump_file(content: &str) {
    for line in content.lines() {
        println!("*****************************************");
        println!("{line}");

        match parse(line) {
            Ok(root) => {
                println!("Tree: {root}");
                println!("Valid: {}", root.is_valid());
                println!("Evaluated: {}", root.eval());
            },
            Err(error) => println!("{error}"),
        }
    }
}
