//! # Pi Coin Benchmarks
//!
//! | Component | Operation |
//! |-----------|-----------|
//! | shared-crypto | Ed25519 sign / verify with the process key |
//! | pc-02 Supply Ledger | Mint under the cap lock |
//! | pc-03 Origin Verification | Sequential vs parallel batch verification |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;
use std::time::Duration;

use pc_03_origin_verification::VerificationRequest;
use pi_node::{NodeConfig, PiNode};
use shared_crypto::SignatureAuthority;

fn bench_signature_authority(c: &mut Criterion) {
    let mut group = c.benchmark_group("signature-authority");
    group.measurement_time(Duration::from_secs(5));

    let authority = SignatureAuthority::generate();
    let message = b"coin-00000001-10-mining";
    let signature = authority.sign(message);

    group.bench_function("sign", |b| b.iter(|| black_box(authority.sign(message))));
    group.bench_function("verify_own", |b| {
        b.iter(|| black_box(authority.verify_own(message, &signature)))
    });

    group.finish();
}

fn bench_mint(c: &mut Criterion) {
    let node = PiNode::new(NodeConfig::default()).expect("node");

    c.bench_function("ledger_mint", |b| {
        b.iter(|| black_box(node.mint(Decimal::ONE, "mining").is_ok()))
    });
}

fn bench_batch_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("origin-verification");
    let node = PiNode::new(NodeConfig::default()).expect("node");

    for size in [10usize, 100, 1_000] {
        let requests: Vec<_> = (0..size)
            .map(|i| {
                let source = if i % 4 == 0 { "exchange" } else { "mining" };
                VerificationRequest::new(source, format!("bench-{}", i))
            })
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("sequential", size), &requests, |b, reqs| {
            b.iter(|| {
                reqs.iter()
                    .map(|r| node.verify_origin(&r.source, &r.id, r.amount, r.frequency))
                    .filter(|ok| *ok)
                    .count()
            })
        });
        group.bench_with_input(BenchmarkId::new("batch", size), &requests, |b, reqs| {
            b.iter(|| black_box(node.batch_verify(reqs)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_signature_authority,
    bench_mint,
    bench_batch_verify
);
criterion_main!(benches);
