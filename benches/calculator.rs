//! Calculator benchmarks.
//!
//! Run with:
//! ```bash
//! cargo bench --bench calculator
//! ```

use boolcalc_rs::ast::{BinOp, ExprBoxed, Expression};
use boolcalc_rs::calculator::{Calculator, CalculatorConfig};
use boolcalc_rs::types::Var;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Parity of `n` variables: every prime implicant is a minterm.
fn parity(n: usize) -> Expression {
    let vars = ('a'..='z').take(n).map(|c| ExprBoxed::variable(Var::new(c)));
    Expression::from_boxed(&ExprBoxed::chain(BinOp::Xor, vars).expect("n > 0"))
}

/// Threshold "at least two of `n`": many overlapping prime implicants.
fn at_least_two(n: usize) -> Expression {
    let names: Vec<char> = ('a'..='z').take(n).collect();
    let pairs = names.iter().enumerate().flat_map(|(i, &x)| {
        names[i + 1..]
            .iter()
            .map(move |&y| ExprBoxed::and(ExprBoxed::variable(Var::new(x)), ExprBoxed::variable(Var::new(y))))
    });
    Expression::from_boxed(&ExprBoxed::chain(BinOp::Or, pairs).expect("n > 1"))
}

fn bench_parse(c: &mut Criterion) {
    let text = at_least_two(8).to_string();
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("at_least_two_8", |b| {
        b.iter(|| Expression::parse(black_box(&text)).unwrap())
    });
    group.finish();
}

fn bench_truth_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("truth_table");
    for n in [4, 8, 12] {
        let expr = parity(n);
        group.throughput(Throughput::Elements(1 << n));
        group.bench_with_input(BenchmarkId::new("parity", n), &expr, |b, expr| {
            b.iter(|| {
                let calc = Calculator::with_config(expr.clone(), CalculatorConfig::default().with_memoize(false));
                calc.build_truth_table().unwrap()
            })
        });
    }
    group.finish();
}

fn bench_minimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");
    for n in [4, 6, 8] {
        let expr = at_least_two(n);
        group.bench_with_input(BenchmarkId::new("at_least_two", n), &expr, |b, expr| {
            b.iter(|| Calculator::new(expr.clone()).minimize())
        });
    }
    group.finish();
}

fn bench_zhegalkin(c: &mut Criterion) {
    let mut group = c.benchmark_group("zhegalkin");
    for n in [4, 8, 10] {
        let expr = at_least_two(n);
        group.bench_with_input(BenchmarkId::new("at_least_two", n), &expr, |b, expr| {
            b.iter(|| Calculator::new(expr.clone()).cast_to_zhegalkin().unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_truth_table, bench_minimize, bench_zhegalkin);
criterion_main!(benches);
