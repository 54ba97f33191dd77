//! # Blue Carbon Pipeline Benchmarks
//!
//! | Subsystem | Operation | Target |
//! |-----------|-----------|--------|
//! | shared-types | Evidence digest + result sealing | < 1ms per MiB |
//! | bc-02 Analysis | Deterministic fallback | < 100µs |
//! | bc-03 Ledger | ABI encoding + EIP-155 signing | < 1ms |
//! | bc-04 Submission | Full submission, in-memory collaborators | < 5ms |

use std::sync::Arc;
use std::time::Duration;

use bc_01_result_store::InMemoryResultStore;
use bc_02_analysis::{fallback_content, UnconfiguredScorer};
use bc_03_ledger::domain::abi::{self, Token};
use bc_03_ledger::domain::{LedgerSigner, LegacyTransaction};
use bc_03_ledger::{Address, MockLedger};
use bc_04_submission::SubmissionApi;
use bc_tests::integration::fixtures::{
    orchestrator, png_evidence, sample_metadata, sample_submission, DEV_KEY,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use primitive_types::U256;
use shared_types::{AnalysisResult, EcosystemType, Evidence};

// ============================================================================
// Content addressing
// ============================================================================

fn bench_content_addressing(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-types-content-addressing");

    for size in [64 * 1024, 1024 * 1024, 10 * 1024 * 1024] {
        let evidence = Evidence::new(vec![0xA5; size], "image/png");
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("evidence_digest", size), &evidence, |b, e| {
            b.iter(|| black_box(e.digest()))
        });
    }

    let metadata = sample_metadata(12.5, EcosystemType::Mangrove);
    let content = fallback_content(&metadata, png_evidence("seal").digest(), 7);
    group.bench_function("seal_result", |b| {
        b.iter(|| black_box(AnalysisResult::seal(content.clone(), 1_700_000_000)))
    });

    group.finish();
}

// ============================================================================
// bc-02: Fallback analysis
// ============================================================================

fn bench_fallback_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("bc-02-analysis");
    let digest = png_evidence("fallback").digest();

    for ecosystem in [
        EcosystemType::Mangrove,
        EcosystemType::Seagrass,
        EcosystemType::Saltmarsh,
    ] {
        let metadata = sample_metadata(250.0, ecosystem);
        group.bench_with_input(
            BenchmarkId::new("fallback_content", ecosystem.as_str()),
            &metadata,
            |b, m| b.iter(|| black_box(fallback_content(m, digest.clone(), 42))),
        );
    }

    group.finish();
}

// ============================================================================
// bc-03: Ledger encoding
// ============================================================================

fn bench_ledger_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("bc-03-ledger");

    let args = vec![
        Token::String("Mangrove Bay".to_string()),
        Token::String("Sundarbans".to_string()),
        Token::Uint(U256::from(12u64)),
        Token::String("mangrove".to_string()),
        Token::String(png_evidence("abi").digest().to_string()),
    ];
    group.bench_function("encode_create_project", |b| {
        b.iter(|| black_box(abi::encode_call(abi::CREATE_PROJECT, &args)))
    });

    let signer = match LedgerSigner::from_hex(DEV_KEY) {
        Ok(signer) => signer,
        Err(e) => panic!("benchmark key rejected: {}", e),
    };
    let tx = LegacyTransaction {
        nonce: U256::from(3u64),
        gas_price: U256::from(1_000_000_000u64),
        gas_limit: U256::from(300_000u64),
        to: Address([0xC0; 20]),
        value: U256::zero(),
        data: abi::encode_call(abi::CREATE_PROJECT, &args),
        chain_id: 31337,
    };
    group.bench_function("sign_legacy_transaction", |b| {
        b.iter(|| black_box(tx.sign(&signer).is_ok()))
    });

    group.finish();
}

// ============================================================================
// bc-04: End-to-end submission
// ============================================================================

fn bench_submission(c: &mut Criterion) {
    let mut group = c.benchmark_group("bc-04-submission");
    group.measurement_time(Duration::from_secs(10));

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => panic!("tokio runtime: {}", e),
    };
    let service = orchestrator(
        Arc::new(UnconfiguredScorer),
        Arc::new(InMemoryResultStore::new()),
        Arc::new(MockLedger::new()),
    );

    group.bench_function("submit_fallback_mock_ledger", |b| {
        b.iter(|| {
            runtime.block_on(async {
                black_box(service.submit(sample_submission("bench")).await.is_ok())
            })
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_content_addressing,
    bench_fallback_analysis,
    bench_ledger_encoding,
    bench_submission,
);
criterion_main!(benches);
