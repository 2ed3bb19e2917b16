use RustedDerivPlot::derivative_tool::form::FormSubmission;
use RustedDerivPlot::derivative_tool::pipeline::{Expression, ToolState};
use RustedDerivPlot::derivative_tool::resolver::resolve_derivative;
use RustedDerivPlot::derivative_tool::sampler::sample;
use RustedDerivPlot::symbolic::symbolic_engine::Expr;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const INPUT: &str = "3x^3 - (x+1)/(x^2+1) + 2(x-4)^2";

fn bench_resolve(c: &mut Criterion) {
    let expr = Expression::new(INPUT);
    c.bench_function("resolve derivative", |b| b.iter(|| resolve_derivative(black_box(&expr))));
}

fn bench_sample(c: &mut Criterion) {
    let expr = Expression::new(INPUT);
    c.bench_function("sample 41 points", |b| b.iter(|| sample(black_box(&expr))));
}

fn bench_lambdify_vs_eval(c: &mut Criterion) {
    let f = Expr::parse_expression(INPUT).unwrap();
    let df = f.derivative("x").unwrap();
    let compiled = df.lambdify1D("x");
    let mut group = c.benchmark_group("derivative evaluation");
    group.bench_function("lambdify1D", |b| b.iter(|| compiled(black_box(1.5))));
    group.bench_function("eval_expression", |b| {
        let bindings = std::collections::HashMap::from([("x".to_string(), 1.5)]);
        b.iter(|| df.eval_expression(black_box(&bindings)))
    });
    group.finish();
}

fn bench_submit(c: &mut Criterion) {
    let state = ToolState::default();
    let submission = FormSubmission::new(INPUT);
    c.bench_function("submit", |b| b.iter(|| state.on_submit(black_box(&submission))));
}

criterion_group!(benches, bench_resolve, bench_sample, bench_lambdify_vs_eval, bench_submit);
criterion_main!(benches);
