//! Medoid-based centroid updates.
use std::cmp::Ordering;

use crate::assign::Partition;
use crate::document::Document;
use crate::errors::{KMedoidsError, Result};
use crate::token_set::{jaccard_distance_ratio, TokenSet};

/// The representative of a cluster.
///
/// A centroid is always the token set of an input document, never a set
/// synthesized from several members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Centroid {
    /// Position of the document the token set was taken from.
    pub document: usize,
    /// Token set of that document.
    pub tokens: TokenSet,
}

impl Centroid {
    /// Creates the centroid represented by the document at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn from_document(documents: &[Document], position: usize) -> Self {
        Self {
            document: position,
            tokens: documents[position].tokens.clone(),
        }
    }
}

/// Report of a cluster that lost all of its members during assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DegenerateCluster {
    /// Index of the empty cluster.
    pub cluster: usize,
    /// Iteration (1-based) in which the cluster was empty.
    pub iteration: usize,
}

/// Centroids computed from one partition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CentroidUpdate {
    /// New centroids, one per cluster.
    pub centroids: Vec<Centroid>,
    /// Indices of the empty clusters whose previous centroid was kept.
    pub empty_clusters: Vec<usize>,
}

/// Sum of Jaccard distances kept as a reduced fraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DistanceSum {
    num: u128,
    den: u128,
}

impl DistanceSum {
    const ZERO: Self = Self { num: 0, den: 1 };

    /// Adds `num / den`, or returns `None` on overflow.
    fn checked_add(self, num: u128, den: u128) -> Option<Self> {
        let g = gcd(self.den, den);
        let sum_den = (self.den / g).checked_mul(den)?;
        let sum_num = self
            .num
            .checked_mul(den / g)?
            .checked_add(num.checked_mul(self.den / g)?)?;
        let g = gcd(sum_num, sum_den);
        Some(Self {
            num: sum_num / g,
            den: sum_den / g,
        })
    }

    fn checked_cmp(&self, other: &Self) -> Option<Ordering> {
        let lhs = self.num.checked_mul(other.den)?;
        let rhs = other.num.checked_mul(self.den)?;
        Some(lhs.cmp(&rhs))
    }
}

const fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Row sum of a member: exact while it fits in `u128`, approximate always.
#[derive(Clone, Copy, Debug)]
struct RowSum {
    exact: Option<DistanceSum>,
    approx: f64,
}

impl RowSum {
    fn is_less_than(&self, other: &Self) -> bool {
        if let (Some(x), Some(y)) = (self.exact, other.exact) {
            if let Some(ord) = x.checked_cmp(&y) {
                return ord == Ordering::Less;
            }
        }
        self.approx < other.approx
    }
}

/// Finds the medoid of `members`, the member whose token set minimizes the sum of
/// distances to all the other members.
///
/// Sums are compared as exact fractions, so ties go to the earliest member in
/// `members` regardless of rounding. Returns `None` if `members` is empty.
pub fn medoid(documents: &[Document], members: &[usize]) -> Option<usize> {
    let n = members.len();
    // Distances in the upper triangle, row by row.
    let mut dists = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for (i, &x) in members.iter().enumerate() {
        for &y in &members[i + 1..] {
            dists.push(jaccard_distance_ratio(
                &documents[x].tokens,
                &documents[y].tokens,
            ));
        }
    }
    let pair_index = |i: usize, j: usize| {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        i * (2 * n - i - 1) / 2 + (j - i - 1)
    };

    let mut best: Option<(usize, RowSum)> = None;
    for i in 0..n {
        let mut sum = RowSum {
            exact: Some(DistanceSum::ZERO),
            approx: 0.,
        };
        for j in (0..n).filter(|&j| j != i) {
            let (num, den) = dists[pair_index(i, j)];
            sum.exact = sum
                .exact
                .and_then(|s| s.checked_add(num as u128, den as u128));
            sum.approx += num as f64 / den as f64;
        }
        match best {
            Some((_, min_sum)) if !sum.is_less_than(&min_sum) => {}
            _ => best = Some((i, sum)),
        }
    }
    best.map(|(i, _)| members[i])
}

/// Computes the new centroid of every cluster in `partition`.
///
/// A non-empty cluster is represented by its [`medoid`]. An empty cluster keeps
/// its centroid from `previous`, so the number of centroids never changes; the
/// indices of such clusters are reported in [`CentroidUpdate::empty_clusters`].
///
/// # Arguments
///
/// * `documents` - Documents the partition refers to.
/// * `partition` - Current assignment of documents to clusters.
/// * `previous` - Centroids the partition was assigned against, one per cluster.
///
/// # Errors
///
/// [`KMedoidsError::Input`] is returned when the numbers of clusters and
/// previous centroids differ.
pub fn update(
    documents: &[Document],
    partition: &Partition,
    previous: &[Centroid],
) -> Result<CentroidUpdate> {
    if partition.num_clusters() != previous.len() {
        return Err(KMedoidsError::input(format!(
            "{} clusters were given with {} previous centroids.",
            partition.num_clusters(),
            previous.len()
        )));
    }
    let mut centroids = Vec::with_capacity(previous.len());
    let mut empty_clusters = vec![];
    for (i, (members, prev)) in partition.clusters().iter().zip(previous).enumerate() {
        match medoid(documents, members) {
            Some(position) => centroids.push(Centroid::from_document(documents, position)),
            None => {
                empty_clusters.push(i);
                centroids.push(prev.clone());
            }
        }
    }
    Ok(CentroidUpdate {
        centroids,
        empty_clusters,
    })
}
