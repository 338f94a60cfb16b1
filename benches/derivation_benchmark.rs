//! Benchmark: the deliberate cost of credential-derived keys.
//!
//! Key derivation runs PBKDF2-HMAC-SHA256 at 100,000 iterations on
//! purpose — each attempt at a guessed identity tuple must cost real CPU
//! time. This benchmark makes that cost visible so deployments can size
//! worker concurrency, and contrasts it with a weakened iteration count
//! to show what the knob buys.
//!
//! Run with: `cargo bench --bench derivation_benchmark`
//!
//! Typical results:
//! - derive_key (100k iterations): tens of milliseconds
//! - derive_key (10k iterations): ~10x cheaper — and 10x cheaper to attack
//! - seal/open are dominated by derivation, not by AES or HMAC

use std::num::NonZeroU32;

use criterion::{black_box, criterion_group, criterion_main, Criterion, SamplingMode};
use serde_json::json;
use vitalseal::{derive_key, derive_key_with, keys, open, seal, Identity, KdfConfig};

fn bench_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("credential_kdf");
    group.sampling_mode(SamplingMode::Flat);
    group.sample_size(10); // Each iteration is tens of milliseconds.

    let identity = Identity::new("Jane", "Doe", "2000-01-01");

    group.bench_function("derive_key_100k_iterations", |b| {
        b.iter(|| derive_key(black_box(&identity)));
    });

    let weakened = KdfConfig {
        salt: keys::DEFAULT_SALT.to_vec(),
        iterations: NonZeroU32::new(10_000).unwrap(),
    };
    group.bench_function("derive_key_10k_iterations", |b| {
        b.iter(|| derive_key_with(black_box(&weakened), black_box(&identity)));
    });

    group.finish();
}

fn bench_seal_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_cipher");
    group.sampling_mode(SamplingMode::Flat);
    group.sample_size(10);

    let identity = Identity::new("Jane", "Doe", "2000-01-01");
    let payload = json!({
        "first_name": "Jane",
        "last_name": "Doe",
        "dob": "2000-01-01",
        "sex": "F"
    });

    group.bench_function("seal_demographics", |b| {
        b.iter(|| seal(black_box(&payload), black_box(&identity)).unwrap());
    });

    let token = seal(&payload, &identity).unwrap();
    group.bench_function("open_demographics", |b| {
        b.iter(|| {
            open::<serde_json::Value>(black_box(&token), black_box(&identity)).unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_derivation, bench_seal_open);
criterion_main!(benches);
