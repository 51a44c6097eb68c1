//! benches/pipeline.rs
//! Full unseal runs over in-memory archives of growing bundle size
use bundle_unseal::{
    seal_bundle, BundleCollector, FixedPassword, KdfParams, MemoryArchive, MemorySink,
    PasswordString, UnsealOptions, Unsealer,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

const KDF: KdfParams = KdfParams::Pbkdf2Sha512 { iterations: 1_000 };

fn archive_with(size: usize, bundles: usize) -> MemoryArchive {
    let password = PasswordString::new("bench".to_string());
    let plaintext = vec![0xA5u8; size];
    let mut archive = MemoryArchive::new();
    for i in 0..bundles {
        let sealed = seal_bundle(&plaintext, &password, &KDF).unwrap();
        for (name, bytes) in sealed.into_entries(&format!("bundle{i}")) {
            archive.insert(name, bytes);
        }
    }
    archive
}

fn pipeline_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("unseal_run");

    for &size in &[1_024usize, 64 * 1024, 1024 * 1024] {
        let archive = archive_with(size, 4);
        let names = archive.names();
        group.throughput(Throughput::Bytes((size * 4) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut unsealer = Unsealer::new(
                    archive.clone(),
                    FixedPassword::new("bench"),
                    BundleCollector::new(),
                    MemorySink::new(),
                )
                .with_options(UnsealOptions::builder().with_kdf(KDF).build());
                black_box(unsealer.run(black_box(&names)));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, pipeline_benches);
criterion_main!(benches);
