//! Parse, generate and detect timings on a representative program.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pseudo_syntax::{GenerateOptions, SourceTag, TargetTag, detect_language, generate, parse};

const PROGRAM: &str = "\
// Count primes below a limit
constant LIMIT is 100
set count to 0
for n from 2 to LIMIT
    set prime to true
    set d to 2
    while d * d <= n and prime
        if n mod d is 0 then
            set prime to false
        end if
        increment d
    end while
    if prime then
        add 1 to count
    otherwise if n is greater than 90
        print \"no more primes below \" + n
    end if
end for
function report(total)
    print \"primes: \" + total
    return total
end function
report(count)
";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_natural", |b| {
        b.iter(|| parse(black_box(PROGRAM), Some(SourceTag::Natural)))
    });
}

fn bench_generate(c: &mut Criterion) {
    let tree = parse(PROGRAM, Some(SourceTag::Natural));
    let options = GenerateOptions::default();
    let mut group = c.benchmark_group("generate");
    for target in TargetTag::ALL {
        group.bench_function(target.name(), |b| {
            b.iter(|| generate(black_box(&tree), target, &options))
        });
    }
    group.finish();
}

fn bench_detect(c: &mut Criterion) {
    c.bench_function("detect_language", |b| {
        b.iter(|| detect_language(black_box(PROGRAM)))
    });
}

criterion_group!(benches, bench_parse, bench_generate, bench_detect);
criterion_main!(benches);
