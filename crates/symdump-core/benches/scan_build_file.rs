use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use symdump_core::{SourceFile, scan};

fn bench_scan_large_build_file(c: &mut Criterion) {
    let mut text = String::new();
    for i in 0..1000 {
        text.push_str(&format!("include_defs(\"cell//defs/DEFS_{}\")\n", i % 10));
        text.push_str(&format!("CONSTANT_{i} = \"value {i}\"  # comment\n"));
        text.push_str(&format!(
            "java_library(\n    name = \"lib{i}\",\n    srcs = glob([\"src/**/*.java\"]),\n)\n"
        ));
        text.push_str("def macro():\n    nested = 'ignored'\n\n");
    }
    let source = SourceFile::from_text("/repo/BUCK", text);

    c.bench_function("scan_build_file_1000_blocks", |b| {
        b.iter(|| scan(black_box(&source)).unwrap());
    });
}

criterion_group!(benches, bench_scan_large_build_file);
criterion_main!(benches);
