use chisel_value::lexer::{Lexer, Token};
use criterion::{criterion_group, criterion_main, Criterion};
use pprof::criterion::{Output, PProfProfiler};
use std::fs;

macro_rules! build_lex_benchmark {
    ($func : tt, $filename : expr) => {
        fn $func() {
            let source = fs::read_to_string(format!("fixtures/json/valid/{}.json", $filename)).unwrap();
            let mut chars = source.chars();
            let mut lexer = Lexer::new(&mut chars);
            loop {
                match lexer.consume() {
                    Ok(t) => {
                        if t.0 == Token::EndOfInput {
                            break;
                        }
                    }
                    Err(err) => {
                        println!("error occurred: {:?}", err);
                        break;
                    }
                }
            }
        }
    };
}

build_lex_benchmark!(blog_entries, "blog_entries");
build_lex_benchmark!(numerics, "numerics");
build_lex_benchmark!(unicode, "unicode");

fn benchmark_blog_entries(c: &mut Criterion) {
    c.bench_function("lex of blog_entries", |b| b.iter(blog_entries));
}
fn benchmark_numerics(c: &mut Criterion) {
    c.bench_function("lex of numerics", |b| b.iter(numerics));
}
fn benchmark_unicode(c: &mut Criterion) {
    c.bench_function("lex of unicode", |b| b.iter(unicode));
}

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets= benchmark_blog_entries, benchmark_numerics, benchmark_unicode
}
criterion_main!(benches);
