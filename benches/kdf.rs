//! benches/kdf.rs
//! KDF cost: PBKDF2 iteration sweep + Argon2id memory sweep
use bundle_unseal::aliases::{PasswordString, Salt16};
use bundle_unseal::{derive_key, KdfParams};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::time::Duration;

fn kdf_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("KDF");
    group.measurement_time(Duration::from_secs(8));
    group.sample_size(20);

    let pw = PasswordString::new("benchmark-password".to_string());
    let salt = Salt16::new([0x42; 16]);

    for &iters in &[1_000u32, 10_000, 100_000, 300_000] {
        let params = KdfParams::Pbkdf2Sha512 { iterations: iters };
        let id = BenchmarkId::new("pbkdf2_iterations", iters);
        group.bench_with_input(id, &params, |b, params| {
            b.iter(|| black_box(derive_key(black_box(&pw), black_box(&salt), params).unwrap()));
        });
    }

    for &memory_kib in &[8 * 1024u32, 32 * 1024, 64 * 1024] {
        let params = KdfParams::Argon2id {
            memory_kib,
            iterations: 2,
            parallelism: 1,
        };
        let id = BenchmarkId::new("argon2id_memory_kib", memory_kib);
        group.bench_with_input(id, &params, |b, params| {
            b.iter(|| black_box(derive_key(black_box(&pw), black_box(&salt), params).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, kdf_benches);
criterion_main!(benches);
