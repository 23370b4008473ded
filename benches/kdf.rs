//! benches/kdf.rs
//! KDF benchmarks – every PBE scheme plus the MAC PBKDF2 across iteration counts
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pbe_container::crypto::kdf::derive_cipher_material;
use pbe_container::crypto::kdf::pbkdf2::derive_secure_mac_key;
use pbe_container::{CipherAlgorithm, MacAlgorithm};
use secure_gate::{Dynamic, Fixed};
use std::hint::black_box;
use std::time::Duration;

fn kdf_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("KDF");
    // Faster runs for slow high-iter benches
    group.measurement_time(Duration::from_secs(8));
    group.sample_size(20);

    let pw: Dynamic<String> = Dynamic::new("benchmark-password".to_string());
    let salt: Fixed<[u8; 8]> = Fixed::new([0x42; 8]);

    for &algorithm in CipherAlgorithm::ALL {
        for &iters in &[1_024u32, 10_000, 100_000] {
            let id = BenchmarkId::new(algorithm.name(), iters);
            group.bench_with_input(id, &iters, |b, &iters| {
                b.iter(|| {
                    let material =
                        derive_cipher_material(algorithm, black_box(&pw), black_box(&salt), iters)
                            .unwrap();
                    black_box(material);
                });
            });
        }
    }

    for &iters in &[1_024u32, 10_000, 100_000] {
        let id = BenchmarkId::new("mac_pbkdf2_sha1_hmac_sha256", iters);
        group.bench_with_input(id, &iters, |b, &iters| {
            b.iter(|| {
                let key = derive_secure_mac_key(black_box(&pw), iters, MacAlgorithm::HmacSha256.key_len()).unwrap();
                black_box(key);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, kdf_benches);
criterion_main!(benches);
