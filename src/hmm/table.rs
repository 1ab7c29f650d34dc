//! Sparse probability tables keyed by interned ids.
//!
//! Both the transition table (`state x state`) and the emission table
//! (`state x symbol`) are stored as a [`ProbTable`]. Rows keep their entries in
//! insertion order so that sampling over a row is reproducible for a given
//! random source.

use std::collections::HashMap;

/// One row of a [`ProbTable`]: destination id -> weight.
#[derive(Debug, Default, Clone)]
pub struct ProbRow {
    entries: Vec<(usize, f64)>,
    index: HashMap<usize, usize>,
}

impl ProbRow {
    /// Set the weight of `dst`, overwriting any earlier value.
    pub fn set(&mut self, dst: usize, weight: f64) {
        match self.index.get(&dst) {
            Some(&pos) => self.entries[pos].1 = weight,
            None => {
                self.index.insert(dst, self.entries.len());
                self.entries.push((dst, weight));
            }
        }
    }

    /// Weight of `dst`, or 0.0 when the row has no entry for it.
    #[inline]
    pub fn get(&self, dst: usize) -> f64 {
        self.index
            .get(&dst)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w).sum()
    }

    /// `(dst, weight)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }
}

/// Sparse `source x destination -> probability` map.
#[derive(Debug, Default, Clone)]
pub struct ProbTable {
    rows: Vec<Option<ProbRow>>,
}

impl ProbTable {
    pub fn set(&mut self, src: usize, dst: usize, weight: f64) {
        if self.rows.len() <= src {
            self.rows.resize(src + 1, None);
        }
        self.rows[src].get_or_insert_with(ProbRow::default).set(dst, weight);
    }

    pub fn row(&self, src: usize) -> Option<&ProbRow> {
        self.rows.get(src).and_then(Option::as_ref)
    }

    pub fn has_row(&self, src: usize) -> bool {
        self.row(src).is_some()
    }

    /// Probability of `src -> dst`.
    ///
    /// Absence is impossibility: a missing row, a missing entry or an id the
    /// table has never seen all resolve to 0.0.
    #[inline]
    pub fn prob(&self, src: Option<usize>, dst: Option<usize>) -> f64 {
        match (src.and_then(|s| self.row(s)), dst) {
            (Some(row), Some(d)) => row.get(d),
            _ => 0.0,
        }
    }

    /// `(src, row)` pairs in id order.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &ProbRow)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.as_ref().map(|r| (i, r)))
    }
}
