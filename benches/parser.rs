use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jsminify::parser::Parser;
use jsminify::settings::Settings;
use std::hint::black_box;

const SMALL: &str = r#"
function add(a, b) {
    return a + b;
}
var result = add(1, 2);
"#;

const MEDIUM: &str = r#"
function Fibonacci(n) {
    if (n < 2) {
        return n;
    }
    return Fibonacci(n - 1) + Fibonacci(n - 2);
}

var cache = {};
function memoizedFibonacci(n) {
    if (cache[n] !== undefined) {
        return cache[n];
    }
    var value = Fibonacci(n);
    cache[n] = value;
    return value;
}

for (var i = 0; i < 20; i++) {
    console.log(memoizedFibonacci(i));
}

var Shape = function (name) {
    this.name = name;
};
Shape.prototype.describe = function () {
    return "This is a " + this.name;
};
"#;

fn large() -> String {
    MEDIUM.repeat(40)
}

fn parser_benchmarks(criterion: &mut Criterion) {
    let large_source = large();
    let settings = Settings::default();
    let samples: Vec<(&str, &str)> =
        vec![("small", SMALL), ("medium", MEDIUM), ("large", &large_source)];

    let mut group = criterion.benchmark_group("parser");
    for (name, source) in &samples {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |bench, source| {
            bench.iter(|| {
                let parser = Parser::new(0, black_box(source), &settings);
                black_box(parser.parse());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, parser_benchmarks);
criterion_main!(benches);
