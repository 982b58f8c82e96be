//! Multi-label indicator encoding.
//!
//! A fitted encoder assigns one column per distinct key; each document becomes a
//! sparse indicator row holding the sorted column indices of the keys it contains.

use std::collections::BTreeMap;

/// Sparse indicator row: sorted, deduplicated column indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicatorRow(Vec<usize>);

impl IndicatorRow {
    pub fn columns(&self) -> &[usize] {
        &self.0
    }

    /// Number of set columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of columns set in both rows.
    pub fn intersection_len(&self, other: &IndicatorRow) -> usize {
        let (mut i, mut j, mut count) = (0, 0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].cmp(&other.0[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    count += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        count
    }
}

/// Maps keys to indicator columns.
#[derive(Debug, Clone)]
pub struct MultiLabelEncoder<K> {
    columns: BTreeMap<K, usize>,
}

impl<K: Ord + Clone> MultiLabelEncoder<K> {
    /// Fit one column per distinct key across all given documents, in key order.
    pub fn fit<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a [K]>,
        K: 'a,
    {
        let mut columns = BTreeMap::new();
        for doc in documents {
            for key in doc {
                if !columns.contains_key(key) {
                    columns.insert(key.clone(), 0);
                }
            }
        }
        for (index, column) in columns.values_mut().enumerate() {
            *column = index;
        }
        Self { columns }
    }

    pub fn column(&self, key: &K) -> Option<usize> {
        self.columns.get(key).copied()
    }

    /// Encode one document. Keys unseen during fitting are ignored.
    pub fn transform_one(&self, document: &[K]) -> IndicatorRow {
        let mut row: Vec<usize> = document.iter().filter_map(|k| self.column(k)).collect();
        row.sort_unstable();
        row.dedup();
        IndicatorRow(row)
    }

    pub fn transform(&self, documents: &[Vec<K>]) -> Vec<IndicatorRow> {
        documents.iter().map(|doc| self.transform_one(doc)).collect()
    }
}
