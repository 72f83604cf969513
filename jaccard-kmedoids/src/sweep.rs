//! Clustering the same documents for several numbers of clusters.
use rand::{RngCore, SeedableRng};

use crate::document::Document;
use crate::errors::Result;
use crate::kmedoids::{Clustering, KMedoids, KMedoidsConfig};

/// Result of one run in a sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepEntry {
    /// Number of clusters.
    pub k: usize,
    /// Result of the run.
    pub clustering: Clustering,
    /// Sum of squared errors of [`SweepEntry::clustering`].
    pub sse: f64,
}

/// Runs the clustering once for every value in `ks`.
///
/// Every run is scored and returned as is, so the reported partition is the
/// one the score was computed from. Seeds of the runs are derived from
/// `seed`, or from a random value if it is `None`.
///
/// # Arguments
///
/// * `documents` - Documents to be clustered.
/// * `ks` - Numbers of clusters to try.
/// * `max_iterations` - Cap on the number of iterations of each run.
/// * `seed` - Seed value for random values.
///
/// # Errors
///
/// Fails on the first `k` whose configuration is invalid, without running
/// any later value.
pub fn sweep(
    documents: &[Document],
    ks: &[usize],
    max_iterations: usize,
    seed: Option<u64>,
) -> Result<Vec<SweepEntry>> {
    let seed = seed.unwrap_or_else(rand::random::<u64>);
    let mut seeder = rand_xoshiro::SplitMix64::seed_from_u64(seed);
    let mut entries = Vec::with_capacity(ks.len());
    for &k in ks {
        let config = KMedoidsConfig::new(k)
            .max_iterations(max_iterations)
            .seed(seeder.next_u64());
        let clustering = KMedoids::new(config)?.fit(documents)?;
        let sse = clustering.sse(documents)?;
        log::info!("[sweep] k={k}, sse={sse:.4}");
        entries.push(SweepEntry {
            k,
            clustering,
            sse,
        });
    }
    Ok(entries)
}
