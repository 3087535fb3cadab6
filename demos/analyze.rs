//! Analyze one propositional formula.
//!
//! ```bash
//! cargo run --example analyze -- "(-x & z) V (x & -z) V (x & z)"
//! cargo run --example analyze -- "a -> b" --dot tree.dot
//! ```

use std::path::PathBuf;

use clap::Parser;

use boolcalc_rs::ast::Expression;
use boolcalc_rs::calculator::{Calculator, CalculatorConfig};
use boolcalc_rs::error::ConstantFunctionError;
use boolcalc_rs::table::MAX_VARIABLES;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Formula to analyze.
    #[arg(value_name = "FORMULA")]
    formula: String,

    /// Write the expression tree in DOT format to this file.
    #[clap(long, value_name = "FILE")]
    dot: Option<PathBuf>,

    /// Recompute the truth table for every query.
    #[clap(long)]
    no_memoize: bool,

    /// Log level.
    #[clap(long, value_name = "LEVEL", default_value = "info")]
    log: simplelog::LevelFilter,
}

fn report<T: std::fmt::Display>(name: &str, result: Result<T, ConstantFunctionError>) {
    match result {
        Ok(value) => println!("{}: {}", name, value),
        Err(err) => println!("{}: {}", name, err),
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        args.log,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let expr = Expression::parse(&args.formula)?;
    println!("expression: {}", expr);
    println!("tree: {:?}", expr);

    if let Some(path) = &args.dot {
        std::fs::write(path, expr.to_dot()?)?;
        println!("DOT written to {}", path.display());
    }

    let n = expr.variables().len();
    if n > MAX_VARIABLES {
        color_eyre::eyre::bail!("{} variables, at most {} are supported", n, MAX_VARIABLES);
    }

    let config = CalculatorConfig::default().with_memoize(!args.no_memoize);
    let calc = Calculator::with_config(expr, config);

    match calc.build_truth_table() {
        Ok(table) => print!("{}", table),
        Err(err) => println!("truth table: {}", err),
    }
    report("FCNF", calc.cast_to_fcnf());
    report("FDNF", calc.cast_to_fdnf());
    report("Zhegalkin", calc.cast_to_zhegalkin());
    if let Ok(primes) = calc.prime_implicants() {
        let primes: Vec<String> = primes.iter().map(|p| p.to_string()).collect();
        println!("prime implicants: {}", primes.join(" "));
    }
    println!("minimized: {}", calc.minimize());

    println!("\nAll done in {:.3} s", time_total.elapsed().as_secs_f64());
    Ok(())
}
