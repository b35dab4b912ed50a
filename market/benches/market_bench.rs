use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use helix_market::{BountyEscrowMarket, BountySpec};
use helix_nullables::NullAccounts;
use helix_registry::{GenomeAccessRegistry, MintRequest};
use helix_types::{ContentHash, Timestamp, WalletAddress};

fn addr(s: &str) -> WalletAddress {
    WalletAddress::new(format!("hlx_{s}"))
}

fn registry_with_tokens(n: usize) -> GenomeAccessRegistry {
    let mut registry = GenomeAccessRegistry::new(addr("admin"), 0);
    let mut accounts = NullAccounts::new();
    for i in 0..n {
        registry
            .mint(
                &addr(&format!("holder{i}")),
                MintRequest {
                    content_ref: "bafybeihelixbench".into(),
                    content_hash: ContentHash::new([1u8; 32]),
                    encryption_tag: "aes-256-gcm".into(),
                    category: "snp-array".into(),
                    size_bytes: 64,
                },
                0,
                &mut accounts,
                Timestamp::new(0),
            )
            .unwrap();
    }
    registry
}

fn market_with_bounties(n: usize) -> BountyEscrowMarket {
    let mut market = BountyEscrowMarket::new(addr("admin"), 250);
    let mut accounts = NullAccounts::new();
    for _ in 0..n {
        market
            .create_bounty(
                &addr("researcher"),
                BountySpec {
                    query_kind: "SNP_CHECK".into(),
                    query_params: "{}".into(),
                    reward_per_response: 100,
                    max_responses: 1_000,
                    duration_secs: 86_400,
                },
                200_000,
                &mut accounts,
                Timestamp::new(0),
            )
            .unwrap();
    }
    market
}

fn bench_respond(c: &mut Criterion) {
    let mut group = c.benchmark_group("market_respond");

    for bounty_count in [1, 100, 1_000] {
        let registry = registry_with_tokens(1);
        let holder = addr("holder0");

        group.bench_with_input(
            BenchmarkId::new("respond_to_bounty", bounty_count),
            &bounty_count,
            |b, &count| {
                b.iter_batched(
                    || (market_with_bounties(count), NullAccounts::new()),
                    |(mut market, mut accounts)| {
                        market
                            .respond_to_bounty(
                                1,
                                1,
                                true,
                                vec![],
                                black_box(&holder),
                                &registry,
                                &mut accounts,
                                Timestamp::new(10),
                            )
                            .unwrap()
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_can_respond(c: &mut Criterion) {
    let mut group = c.benchmark_group("market_can_respond");
    let registry = registry_with_tokens(1);

    for bounty_count in [1, 100, 1_000] {
        let market = market_with_bounties(bounty_count);

        group.bench_with_input(
            BenchmarkId::new("can_respond", bounty_count),
            &bounty_count,
            |b, _| {
                b.iter(|| {
                    black_box(market.can_respond(
                        black_box(1),
                        black_box(1),
                        &registry,
                        Timestamp::new(10),
                    ))
                });
            },
        );
    }

    group.finish();
}

fn bench_conservation_audit(c: &mut Criterion) {
    let mut group = c.benchmark_group("market_audit");

    for bounty_count in [10, 1_000] {
        let market = market_with_bounties(bounty_count);

        group.bench_with_input(
            BenchmarkId::new("audit_conservation", bounty_count),
            &bounty_count,
            |b, _| {
                b.iter(|| black_box(market.audit_conservation()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_respond, bench_can_respond, bench_conservation_audit);
criterion_main!(benches);
