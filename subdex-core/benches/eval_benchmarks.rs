use criterion::{Criterion, black_box, criterion_group, criterion_main};
use subdex_core::metrics::{normalized_dcg, precision};
use subdex_core::{EvaluationBatch, GoldSubjectSet, Hit};

fn corpus(docs: usize) -> (Vec<Vec<String>>, Vec<Vec<String>>) {
    (0..docs)
        .map(|d| {
            let selected = (0..10).map(|i| format!("s{}", (d + i) % 97)).collect();
            let relevant = (0..4).map(|i| format!("s{}", (d * 3 + i) % 97)).collect();
            (selected, relevant)
        })
        .unzip()
}

fn bench_metrics(c: &mut Criterion) {
    let (selected, relevant) = corpus(1_000);

    c.bench_function("precision_1k_docs", |b| {
        b.iter(|| precision(black_box(&selected), black_box(&relevant), None))
    });

    c.bench_function("precision_at_5_1k_docs", |b| {
        b.iter(|| precision(black_box(&selected), black_box(&relevant), Some(5)))
    });

    c.bench_function("ndcg_at_10_1k_docs", |b| {
        b.iter(|| normalized_dcg(black_box(&selected), black_box(&relevant), 10))
    });
}

fn bench_batch_results(c: &mut Criterion) {
    let (selected, relevant) = corpus(1_000);
    let mut batch = EvaluationBatch::new();
    for (sel, rel) in selected.into_iter().zip(relevant) {
        let hits = sel.into_iter().map(|uri| Hit::with_uri(uri, 0.5)).collect();
        batch.evaluate(hits, GoldSubjectSet::from_uris(rel));
    }

    c.bench_function("batch_results_1k_docs", |b| b.iter(|| black_box(&batch).results()));
}

criterion_group!(benches, bench_metrics, bench_batch_results);
criterion_main!(benches);
