//! Quality of a clustering, for comparing runs with different numbers of clusters.
use crate::assign::Partition;
use crate::document::Document;
use crate::errors::{KMedoidsError, Result};
use crate::medoid::Centroid;
use crate::token_set::jaccard_distance;

/// Computes the sum of squared Jaccard distances from every document to the
/// centroid of its cluster.
///
/// The `i`-th cluster of `partition` is measured against `centroids[i]`.
/// Empty clusters contribute nothing.
///
/// # Errors
///
/// [`KMedoidsError::Input`] is returned when the numbers of clusters and
/// centroids differ or a member is out of `documents`.
pub fn sum_of_squared_errors(
    documents: &[Document],
    partition: &Partition,
    centroids: &[Centroid],
) -> Result<f64> {
    if partition.num_clusters() != centroids.len() {
        return Err(KMedoidsError::input(format!(
            "{} clusters were given with {} centroids.",
            partition.num_clusters(),
            centroids.len()
        )));
    }
    let mut total_error = 0.;
    for (members, centroid) in partition.clusters().iter().zip(centroids) {
        for &p in members {
            let document = documents.get(p).ok_or_else(|| {
                KMedoidsError::input(format!(
                    "Member {p} is out of {} documents.",
                    documents.len()
                ))
            })?;
            total_error += jaccard_distance(&document.tokens, &centroid.tokens).powi(2);
        }
    }
    Ok(total_error)
}
