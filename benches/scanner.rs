use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jsminify::scanner::{Scanner, TokenKind};
use std::hint::black_box;

// Small/medium/large JavaScript samples; this crate has no bundled JS test
// corpus, so the samples are inlined and the "large" one is the "medium"
// one repeated to reach a representative token count.

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

fn scanner_benchmarks(criterion: &mut Criterion) {
    let large_source = large();
    let samples: Vec<(&str, &str)> =
        vec![("small", SMALL), ("medium", MEDIUM), ("large", &large_source)];

    let mut group = criterion.benchmark_group("scanner");
    for (name, source) in &samples {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |bench, source| {
            bench.iter(|| {
                let mut scanner = Scanner::new(0, black_box(source), false);
                let mut expression_allowed = true;
                loop {
                    let token = scanner.next_token(expression_allowed).expect("scan error");
                    expression_allowed = !token.kind.ends_expression();
                    if token.kind == TokenKind::Eof {
                        break;
                    }
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, scanner_benchmarks);
criterion_main!(benches);
