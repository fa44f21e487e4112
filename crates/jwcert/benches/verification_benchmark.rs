//! Certificate verification benchmark
//!
//! Measures verification of valid and tampered certificates for each RSA key
//! size, compared with `jsonwebtoken`, plus the cost of the fast rejection
//! paths and of parsing the PEM key on every call.

use criterion::{Criterion, criterion_group, criterion_main};
use jsonwebtoken::{Algorithm, Validation};
use jwcert::{CertificateVerifier, PublicKey};
use std::hint::black_box;
use std::time::Duration;

mod fixtures;
use fixtures::{BenchFixtures, corrupt_signature};

fn run_benchmarks(c: &mut Criterion) {
    let fixtures = BenchFixtures::load();

    for scenario in &fixtures.scenarios {
        let name = scenario.name();
        let verifier = CertificateVerifier::new().default_key(scenario.public_key_pem.clone());
        let tampered = corrupt_signature(&scenario.token);

        let mut group = c.benchmark_group("jwcert");
        group.measurement_time(Duration::from_secs(5));
        group.sample_size(100);

        group.bench_function(format!("valid-{name}"), |b| {
            b.iter(|| {
                let result = verifier.verify(black_box(&scenario.token), None);
                assert!(result.is_valid());
            });
        });

        group.bench_function(format!("tampered-{name}"), |b| {
            b.iter(|| {
                let result = verifier.verify(black_box(&tampered), None);
                assert!(!result.is_valid());
            });
        });

        let key = PublicKey::from_pem(&scenario.public_key_pem).unwrap();
        group.bench_function(format!("preparsed-key-{name}"), |b| {
            b.iter(|| {
                verifier
                    .check_with_key(black_box(&scenario.token), &key)
                    .unwrap();
            });
        });

        group.bench_function(format!("parse-key-{name}"), |b| {
            b.iter(|| PublicKey::from_pem(black_box(&scenario.public_key_pem)).unwrap());
        });
        group.finish();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        let mut group = c.benchmark_group("jsonwebtoken");
        group.measurement_time(Duration::from_secs(5));
        group.sample_size(100);

        group.bench_function(format!("valid-{name}"), |b| {
            b.iter(|| {
                jsonwebtoken::decode::<serde_json::Value>(
                    black_box(&scenario.token),
                    &scenario.decoding_key,
                    &validation,
                )
                .unwrap();
            });
        });
        group.finish();
    }

    let verifier = CertificateVerifier::new().default_key(fixtures.scenarios[0].public_key_pem.clone());
    let oversized = "A".repeat(100 * 1024);

    let mut group = c.benchmark_group("rejection");
    group.bench_function("not-a-jwt", |b| {
        b.iter(|| verifier.verify(black_box("not-a-jwt"), None));
    });
    group.bench_function("oversized", |b| {
        b.iter(|| verifier.verify(black_box(&oversized), None));
    });
    group.bench_function("missing-key", |b| {
        let verifier = CertificateVerifier::new();
        b.iter(|| verifier.verify(black_box(&fixtures.scenarios[0].token), None));
    });
    group.finish();
}

criterion_group!(benches, run_benchmarks);
criterion_main!(benches);
