use criterion::{criterion_group, criterion_main, Criterion};
use lorebook_engine::parsing::parse;

fn generate_field_text(sections: usize) -> String {
    let mut text = String::new();
    for i in 0..sections {
        text.push_str(&format!(
            "The province of Veldt-{i} lies beyond @{{Warden {i}|characters|w-{i}}} territory. \
             ![map-{i}](http://maps.example/v{i}.png width=400 height=300 \"Province {i}\")\n\n\
             **Holdings {i}**\n\n| Keep | Garrison |\n| --- | --- |\n| Stonegate | {i}00 |\n\n"
        ));
    }
    text
}

fn bench_parse_mixed_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let content = generate_field_text(100);
    group.bench_function("parse_mixed_field", |b| {
        b.iter(|| {
            let segments = parse(std::hint::black_box(&content));
            std::hint::black_box(segments);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse_mixed_field);
criterion_main!(benches);
