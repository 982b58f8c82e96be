//! Metric library.
//!
//! Every function takes `selected` (per-document predicted keys, rank order) and
//! `relevant` (per-document gold keys), aligned by document index, and returns a
//! single corpus-level value. Degenerate denominators contribute `0` instead of
//! failing, and an empty corpus scores `0.0`.
//!
//! # Families
//!
//! - Set overlap: [`true_positives`], [`false_positives`], [`false_negatives`]
//!   are corpus sums over per-document set differences.
//! - Classification quality: [`precision`], [`recall`], [`f_measure`] are
//!   sample-averaged over multi-label indicator rows.
//! - Rank-aware gain: [`dcg`] for one document, [`normalized_dcg`] averaged
//!   over the corpus. `DCG@k = Σ rel_i / log2(i + 1)` for `i = 1..=k`.

use crate::encoding::{IndicatorRow, MultiLabelEncoder};
use std::collections::HashSet;
use std::hash::Hash;

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Per-document `(|sel ∩ rel|, |sel − rel|, |rel − sel|)`, treating both sides as sets.
fn overlap<K: Eq + Hash>(selected: &[K], relevant: &[K]) -> (usize, usize, usize) {
    let sel: HashSet<&K> = selected.iter().collect();
    let rel: HashSet<&K> = relevant.iter().collect();
    let common = sel.intersection(&rel).count();
    (common, sel.len() - common, rel.len() - common)
}

fn sum_overlap<K, F>(selected: &[Vec<K>], relevant: &[Vec<K>], pick: F) -> usize
where
    K: Eq + Hash,
    F: Fn((usize, usize, usize)) -> usize,
{
    debug_assert_eq!(selected.len(), relevant.len());
    selected
        .iter()
        .zip(relevant)
        .map(|(sel, rel)| pick(overlap(sel, rel)))
        .sum()
}

/// How many selected subjects were relevant.
pub fn true_positives<K: Eq + Hash>(selected: &[Vec<K>], relevant: &[Vec<K>]) -> usize {
    sum_overlap(selected, relevant, |(tp, _, _)| tp)
}

/// How many selected subjects were not relevant.
pub fn false_positives<K: Eq + Hash>(selected: &[Vec<K>], relevant: &[Vec<K>]) -> usize {
    sum_overlap(selected, relevant, |(_, fp, _)| fp)
}

/// How many relevant subjects were not selected.
pub fn false_negatives<K: Eq + Hash>(selected: &[Vec<K>], relevant: &[Vec<K>]) -> usize {
    sum_overlap(selected, relevant, |(_, _, fn_)| fn_)
}

/// Encode both sides against one vocabulary fitted on their union and average
/// `score(common, |pred|, |gold|)` over documents.
fn sample_average<K, F>(selected: &[Vec<K>], relevant: &[Vec<K>], score: F) -> f64
where
    K: Ord + Clone,
    F: Fn(usize, usize, usize) -> f64,
{
    debug_assert_eq!(selected.len(), relevant.len());
    let encoder = MultiLabelEncoder::fit(relevant.iter().chain(selected).map(Vec::as_slice));
    let y_true = encoder.transform(relevant);
    let y_pred = encoder.transform(selected);
    mean(
        y_pred
            .iter()
            .zip(&y_true)
            .map(|(pred, gold): (&IndicatorRow, &IndicatorRow)| {
                score(pred.intersection_len(gold), pred.len(), gold.len())
            }),
    )
}

/// Fraction of selected subjects that are relevant, averaged over documents.
///
/// With `at_k`, only each document's first `k` predictions are considered.
pub fn precision<K: Ord + Clone>(
    selected: &[Vec<K>],
    relevant: &[Vec<K>],
    at_k: Option<usize>,
) -> f64 {
    let precision_of = |common: usize, pred: usize, _gold: usize| ratio(common, pred);
    match at_k {
        Some(k) => {
            let truncated: Vec<Vec<K>> = selected
                .iter()
                .map(|subjects| subjects.iter().take(k).cloned().collect())
                .collect();
            sample_average(&truncated, relevant, precision_of)
        }
        None => sample_average(selected, relevant, precision_of),
    }
}

/// Fraction of relevant subjects that were selected, averaged over documents.
pub fn recall<K: Ord + Clone>(selected: &[Vec<K>], relevant: &[Vec<K>]) -> f64 {
    sample_average(selected, relevant, |common, _pred, gold| ratio(common, gold))
}

/// Harmonic mean of per-document precision and recall, averaged over documents.
pub fn f_measure<K: Ord + Clone>(selected: &[Vec<K>], relevant: &[Vec<K>]) -> f64 {
    sample_average(selected, relevant, |common, pred, gold| {
        ratio(2 * common, pred + gold)
    })
}

/// Discounted cumulative gain of one document's ranking, cut off at `k`.
pub fn dcg<K: Eq + Hash>(selected: &[K], relevant: &[K], k: usize) -> f64 {
    if selected.is_empty() || relevant.is_empty() {
        return 0.0;
    }
    let relevant: HashSet<&K> = relevant.iter().collect();
    selected
        .iter()
        .take(k)
        .enumerate()
        .filter(|(_, key)| relevant.contains(key))
        .map(|(i, _)| 1.0 / ((i + 2) as f64).log2())
        .sum()
}

/// Mean per-document `DCG@k / IDCG@k`, where the ideal ranking is the relevant
/// set itself. Documents with an ideal DCG of zero score `0`.
pub fn normalized_dcg<K: Eq + Hash>(selected: &[Vec<K>], relevant: &[Vec<K>], k: usize) -> f64 {
    debug_assert_eq!(selected.len(), relevant.len());
    mean(selected.iter().zip(relevant).map(|(sel, rel)| {
        let ideal = dcg(rel, rel, k);
        if ideal == 0.0 {
            0.0
        } else {
            dcg(sel, rel, k) / ideal
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(items: &[&[&'static str]]) -> Vec<Vec<&'static str>> {
        items.iter().map(|d| d.to_vec()).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_two_document_example() {
        let selected = docs(&[&["x", "y"], &["z"]]);
        let relevant = docs(&[&["x", "z"], &["z"]]);
        assert_eq!(true_positives(&selected, &relevant), 2);
        assert_eq!(false_positives(&selected, &relevant), 1);
        assert_eq!(false_negatives(&selected, &relevant), 1);
        assert_close(recall(&selected, &relevant), 0.75);
        assert_close(precision(&selected, &relevant, None), 0.75);
        // doc1: 2*1/(2+2) = 0.5, doc2: 1.0
        assert_close(f_measure(&selected, &relevant), 0.75);
    }

    #[test]
    fn test_precision_at_k() {
        let selected = docs(&[&["A", "B", "C"]]);
        let relevant = docs(&[&["A", "C"]]);
        assert_close(precision(&selected, &relevant, Some(1)), 1.0);
        assert_close(precision(&selected, &relevant, Some(3)), 2.0 / 3.0);
        assert_close(precision(&selected, &relevant, Some(10)), 2.0 / 3.0);
    }

    #[test]
    fn test_perfect_predictions() {
        let selected = docs(&[&["a", "b"], &["c"]]);
        assert_close(precision(&selected, &selected, None), 1.0);
        assert_close(recall(&selected, &selected), 1.0);
        assert_close(f_measure(&selected, &selected), 1.0);
        assert_close(normalized_dcg(&selected, &selected, 5), 1.0);
    }

    #[test]
    fn test_empty_sides_score_zero() {
        let selected = docs(&[&[], &["a"]]);
        let relevant = docs(&[&["a"], &[]]);
        assert_close(precision(&selected, &relevant, None), 0.0);
        assert_close(recall(&selected, &relevant), 0.0);
        assert_close(f_measure(&selected, &relevant), 0.0);
        assert_close(normalized_dcg(&selected, &relevant, 10), 0.0);
        assert_eq!(false_positives(&selected, &relevant), 1);
        assert_eq!(false_negatives(&selected, &relevant), 1);
    }

    #[test]
    fn test_empty_corpus_scores_zero() {
        let none: Vec<Vec<&str>> = Vec::new();
        assert_close(precision(&none, &none, None), 0.0);
        assert_close(normalized_dcg(&none, &none, 5), 0.0);
        assert_eq!(true_positives(&none, &none), 0);
    }

    #[test]
    fn test_duplicate_predictions_collapse_for_sets() {
        let selected = docs(&[&["a", "a", "b"]]);
        let relevant = docs(&[&["a"]]);
        assert_eq!(true_positives(&selected, &relevant), 1);
        assert_eq!(false_positives(&selected, &relevant), 1);
        assert_close(precision(&selected, &relevant, None), 0.5);
    }

    #[test]
    fn test_dcg_discounts_by_rank() {
        let relevant = ["a", "b"];
        assert_close(dcg(&["a", "x", "b"], &relevant, 10), 1.0 + 1.0 / 4f64.log2());
        assert_close(dcg(&["x", "a"], &relevant, 1), 0.0);
        assert_close(dcg::<&str>(&[], &relevant, 5), 0.0);
        assert_close(dcg(&["a"], &[], 5), 0.0);
    }

    #[test]
    fn test_ndcg_partial_ranking() {
        let selected = docs(&[&["x", "a"]]);
        let relevant = docs(&[&["a"]]);
        // 1/log2(3) over ideal 1/log2(2)
        assert_close(normalized_dcg(&selected, &relevant, 5), 1.0 / 3f64.log2());
        assert_close(normalized_dcg(&selected, &relevant, 1), 0.0);
    }

    #[test]
    fn test_ndcg_truncation_applies_to_ideal() {
        let selected = docs(&[&["a", "x", "y"]]);
        let relevant = docs(&[&["a", "b", "c", "d", "e", "f"]]);
        let ideal: f64 = (1..=5).map(|i| 1.0 / ((i + 1) as f64).log2()).sum();
        assert_close(normalized_dcg(&selected, &relevant, 5), 1.0 / ideal);
    }
}
