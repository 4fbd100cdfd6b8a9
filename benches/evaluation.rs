use arith_eval::ast::{evaluate_tree, Parser};
use arith_eval::{evaluate, Bindings, Evaluator, EvaluatorConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evalexpr::*;

/// Benchmark simple arithmetic expressions
fn benchmark_simple_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simple arithmetic Expression Evaluation");

    let expr = "2 + 3";
    let bindings = Bindings::default();
    let mut cached = Evaluator::new(100);
    let mut uncached = Evaluator::new(0);
    let pretokenized = uncached.tokenize(expr).unwrap();
    let precompiled_evalexpr = build_operator_tree::<DefaultNumericTypes>(expr).unwrap();

    group.bench_function("sentinel_api", |b| {
        b.iter(|| evaluate(black_box(expr), black_box("[]")))
    });

    group.bench_function("stack_uncached", |b| {
        b.iter(|| uncached.evaluate_expression(black_box(expr), &bindings))
    });

    group.bench_function("stack_cached", |b| {
        b.iter(|| cached.evaluate_expression(black_box(expr), &bindings))
    });

    group.bench_function("stack_pretokenized", |b| {
        b.iter(|| uncached.evaluate_tokens(black_box(&pretokenized)))
    });

    group.bench_function("tree", |b| {
        b.iter(|| evaluate_tree(black_box(expr), &bindings, &EvaluatorConfig::default()))
    });

    group.bench_function("native_rust_arithmetic", |b| {
        b.iter(|| black_box(2.0 + 3.0))
    });

    group.bench_function("meval_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });

    group.bench_function("evalexpr_arithmetic", |b| {
        b.iter(|| evalexpr::eval(black_box(expr)).unwrap())
    });

    group.bench_function("precompiled_evalexpr_arithmetic", |b| {
        b.iter(|| precompiled_evalexpr.eval().unwrap())
    });
}

/// Benchmark complex arithmetic expressions
fn benchmark_complex_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Complex arithmetic Expression Evaluation");

    let expr = "(10 + 20) * 3 / (4 - 1) + 5 - -(2 * 8)";
    let bindings = Bindings::default();
    let config = EvaluatorConfig::default();
    let mut cached = Evaluator::new(100);
    let mut uncached = Evaluator::new(0);
    let pretokenized = uncached.tokenize(expr).unwrap();
    let preparsed = Parser::parse_expression(expr).unwrap();

    group.bench_function("stack_uncached", |b| {
        b.iter(|| uncached.evaluate_expression(black_box(expr), &bindings))
    });

    group.bench_function("stack_cached", |b| {
        b.iter(|| cached.evaluate_expression(black_box(expr), &bindings))
    });

    group.bench_function("stack_pretokenized", |b| {
        b.iter(|| uncached.evaluate_tokens(black_box(&pretokenized)))
    });

    group.bench_function("tree", |b| {
        b.iter(|| evaluate_tree(black_box(expr), &bindings, &config))
    });

    group.bench_function("tree_preparsed", |b| {
        b.iter(|| black_box(&preparsed).evaluate(&config))
    });

    group.bench_function("native_rust_complex_arithmetic", |b| {
        b.iter(|| black_box((10.0 + 20.0) * 3.0 / (4.0 - 1.0) + 5.0 - -(2.0 * 8.0)))
    });

    group.bench_function("meval_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });
}

/// Benchmark variable substitution
fn benchmark_bindings(c: &mut Criterion) {
    let mut group = c.benchmark_group("Variable Substitution");

    let expr = "1-(2*age)+1";
    let list = r#"[{"key":"age","value":18}]"#;
    let bindings = Bindings::from_json(list).unwrap();
    let mut cached = Evaluator::new(100);

    group.bench_function("sentinel_api_with_json", |b| {
        b.iter(|| evaluate(black_box(expr), black_box(list)))
    });

    group.bench_function("stack_cached_decoded_bindings", |b| {
        b.iter(|| cached.evaluate_expression(black_box(expr), &bindings))
    });

    group.bench_function("decode_bindings", |b| {
        b.iter(|| Bindings::from_json(black_box(list)).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_simple_arithmetic,
    benchmark_complex_arithmetic,
    benchmark_bindings,
);
criterion_main!(benches);
