//! CPU kernels for brute-force neighbour search
//!
//! Each query is independent, so queries are spread over the Rayon pool when
//! the `rayon` feature is enabled. Distances are accumulated in f64.

use crate::dtype::Element;
use std::cmp::Ordering;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Skip Rayon when the total work is small
const PARALLEL_THRESHOLD: usize = 1 << 14;

/// Row-major point set with optional batch ids
#[derive(Clone, Copy)]
pub struct PointSet<'a, T> {
    pub data: &'a [T],
    pub batch: Option<&'a [i64]>,
    pub len: usize,
    pub dim: usize,
}

impl<T: Element> PointSet<'_, T> {
    #[inline]
    fn batch_of(&self, i: usize) -> i64 {
        self.batch.map_or(0, |b| b[i])
    }

    #[inline]
    fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }
}

/// Selection rule applied to each query
#[derive(Debug, Clone, Copy)]
pub enum Neighbourhood {
    /// The `k` closest candidates
    Nearest { k: usize },
    /// Candidates within squared distance `r2`, at most `max` of them
    Ball { r2: f64, max: usize },
}

#[inline]
fn squared_distance<T: Element>(a: &[T], b: &[T]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&p, &q)| {
            let d = p.to_f64() - q.to_f64();
            d * d
        })
        .sum()
}

#[inline]
fn by_distance_then_index(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

/// Neighbours of one query, closest first
fn query_neighbours<T: Element>(
    x: &PointSet<'_, T>,
    y: &PointSet<'_, T>,
    q: usize,
    rule: Neighbourhood,
    skip_self: bool,
) -> Vec<usize> {
    let query = y.row(q);
    let batch = y.batch_of(q);

    let mut candidates: Vec<(f64, usize)> = (0..x.len)
        .filter(|&j| x.batch_of(j) == batch && !(skip_self && j == q))
        .map(|j| (squared_distance(x.row(j), query), j))
        .collect();

    let limit = match rule {
        Neighbourhood::Nearest { k } => k,
        Neighbourhood::Ball { r2, max } => {
            candidates.retain(|&(d, _)| d <= r2);
            max
        }
    };

    if candidates.len() > limit {
        candidates.select_nth_unstable_by(limit - 1, by_distance_then_index);
        candidates.truncate(limit);
    }
    candidates.sort_unstable_by(by_distance_then_index);
    candidates.into_iter().map(|(_, j)| j).collect()
}

/// Search `x` for the neighbours of every row of `y`.
///
/// Returns `(row, col)` where `row[p]` is the query index into `y` and
/// `col[p]` the neighbour index into `x`. Queries appear in ascending order.
///
/// With `skip_self`, candidate `q` is never returned for query `q`; this is
/// only meaningful when `x` and `y` are the same point set.
pub fn neighbour_search_kernel<T: Element>(
    x: PointSet<'_, T>,
    y: PointSet<'_, T>,
    rule: Neighbourhood,
    skip_self: bool,
) -> (Vec<i64>, Vec<i64>) {
    let m = y.len;

    #[cfg(feature = "rayon")]
    let per_query: Vec<Vec<usize>> = if m * x.len >= PARALLEL_THRESHOLD {
        (0..m)
            .into_par_iter()
            .map(|q| query_neighbours(&x, &y, q, rule, skip_self))
            .collect()
    } else {
        (0..m)
            .map(|q| query_neighbours(&x, &y, q, rule, skip_self))
            .collect()
    };

    #[cfg(not(feature = "rayon"))]
    let per_query: Vec<Vec<usize>> = {
        let _ = PARALLEL_THRESHOLD;
        (0..m)
            .map(|q| query_neighbours(&x, &y, q, rule, skip_self))
            .collect()
    };

    let total: usize = per_query.iter().map(Vec::len).sum();
    let mut row = Vec::with_capacity(total);
    let mut col = Vec::with_capacity(total);
    for (q, neighbours) in per_query.into_iter().enumerate() {
        for j in neighbours {
            row.push(q as i64);
            col.push(j as i64);
        }
    }
    (row, col)
}
