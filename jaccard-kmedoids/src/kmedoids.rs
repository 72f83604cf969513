//! Iterative k-medoids clustering in the Jaccard space.
use hashbrown::HashMap;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::assign::{assign, Partition};
use crate::document::Document;
use crate::errors::{KMedoidsError, Result};
use crate::medoid::{update, Centroid, DegenerateCluster};
use crate::quality::sum_of_squared_errors;
use crate::token_set::TokenSet;

/// Default cap on the number of assignment/update iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Parameters of a clustering run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KMedoidsConfig {
    /// Number of clusters.
    pub k: usize,
    /// Cap on the number of iterations.
    pub max_iterations: usize,
    /// Seed for the initial sampling. If `None`, a random seed is drawn.
    pub seed: Option<u64>,
}

impl KMedoidsConfig {
    /// Creates a configuration for `k` clusters with the default iteration cap.
    pub const fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
        }
    }

    /// Sets the cap on the number of iterations.
    pub const fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the seed for the initial sampling.
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// How a clustering run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The centroids stopped changing.
    Converged,
    /// The iteration cap was reached first.
    Exhausted,
}

/// Result of a clustering run.
#[derive(Clone, Debug, PartialEq)]
pub struct Clustering {
    /// Partition computed in the last iteration.
    pub partition: Partition,
    /// Centroids updated from [`Clustering::partition`], one per cluster.
    pub centroids: Vec<Centroid>,
    /// How the run stopped.
    pub termination: Termination,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Seed used for the initial sampling, if sampling took place.
    pub seed: Option<u64>,
    /// Empty clusters encountered over the run.
    pub degenerate_clusters: Vec<DegenerateCluster>,
}

impl Clustering {
    /// Gets the number of clusters.
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Checks if the run reached a fixed point.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Gets the identifiers of the documents in the `i`-th cluster.
    pub fn member_ids<'a>(&self, documents: &'a [Document], i: usize) -> Vec<&'a str> {
        self.partition
            .cluster(i)
            .unwrap_or(&[])
            .iter()
            .map(|&p| documents[p].id.as_str())
            .collect()
    }

    /// Computes the sum of squared errors of this result.
    pub fn sse(&self, documents: &[Document]) -> Result<f64> {
        sum_of_squared_errors(documents, &self.partition, &self.centroids)
    }
}

/// Clusterer of documents into `k` groups around medoids.
///
/// # Examples
///
/// ```
/// use jaccard_kmedoids::{Document, KMedoids, KMedoidsConfig};
///
/// let documents = vec![
///     Document::from_text("d1", "a b"),
///     Document::from_text("d2", "a b c"),
///     Document::from_text("d3", "x y"),
///     Document::from_text("d4", "x y z"),
/// ];
/// let kmedoids = KMedoids::new(KMedoidsConfig::new(2).seed(42)).unwrap();
/// let clustering = kmedoids.fit(&documents).unwrap();
/// assert_eq!(clustering.partition.num_documents(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct KMedoids {
    config: KMedoidsConfig,
}

impl KMedoids {
    /// Creates an instance.
    ///
    /// # Errors
    ///
    /// [`KMedoidsError::InvalidConfiguration`] is returned when `k` or the
    /// iteration cap is 0.
    pub fn new(config: KMedoidsConfig) -> Result<Self> {
        if config.k == 0 {
            return Err(KMedoidsError::config("k must not be 0.".to_string()));
        }
        if config.max_iterations == 0 {
            return Err(KMedoidsError::config(
                "max_iterations must not be 0.".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Gets the configuration.
    pub const fn config(&self) -> KMedoidsConfig {
        self.config
    }

    /// Clusters `documents`, sampling the initial medoids with the configured seed.
    ///
    /// # Errors
    ///
    /// [`KMedoidsError::InvalidConfiguration`] is returned when `k` exceeds the
    /// number of documents.
    pub fn fit(&self, documents: &[Document]) -> Result<Clustering> {
        let seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut clustering = self.fit_with_rng(documents, &mut rng)?;
        clustering.seed = Some(seed);
        Ok(clustering)
    }

    /// Clusters `documents`, sampling the initial medoids from `rng`.
    ///
    /// # Errors
    ///
    /// [`KMedoidsError::InvalidConfiguration`] is returned when `k` exceeds the
    /// number of documents.
    pub fn fit_with_rng<R>(&self, documents: &[Document], rng: &mut R) -> Result<Clustering>
    where
        R: Rng + ?Sized,
    {
        self.check_size(documents)?;
        let initial = index::sample(rng, documents.len(), self.config.k).into_vec();
        self.iterate(documents, &initial)
    }

    /// Clusters `documents` starting from the documents at `initial` as medoids.
    ///
    /// # Errors
    ///
    /// [`KMedoidsError::InvalidConfiguration`] is returned when `k` exceeds the
    /// number of documents, and [`KMedoidsError::Input`] when `initial` is not a
    /// list of `k` distinct positions in `documents`.
    pub fn fit_from(&self, documents: &[Document], initial: &[usize]) -> Result<Clustering> {
        self.check_size(documents)?;
        if initial.len() != self.config.k {
            return Err(KMedoidsError::input(format!(
                "{} initial medoids were given for k={}.",
                initial.len(),
                self.config.k
            )));
        }
        for (i, &p) in initial.iter().enumerate() {
            if p >= documents.len() {
                return Err(KMedoidsError::input(format!(
                    "Initial medoid {p} is out of {} documents.",
                    documents.len()
                )));
            }
            if initial[..i].contains(&p) {
                return Err(KMedoidsError::input(format!(
                    "Initial medoid {p} is given twice."
                )));
            }
        }
        self.iterate(documents, initial)
    }

    fn check_size(&self, documents: &[Document]) -> Result<()> {
        if self.config.k > documents.len() {
            return Err(KMedoidsError::config(format!(
                "k={} exceeds the number of documents {}.",
                self.config.k,
                documents.len()
            )));
        }
        Ok(())
    }

    fn iterate(&self, documents: &[Document], initial: &[usize]) -> Result<Clustering> {
        let mut centroids: Vec<_> = initial
            .iter()
            .map(|&p| Centroid::from_document(documents, p))
            .collect();
        let mut degenerate_clusters = vec![];
        let mut iteration = 0;
        loop {
            iteration += 1;
            let partition = assign(documents, &centroids);
            let next = update(documents, &partition, &centroids)?;
            for &cluster in &next.empty_clusters {
                log::warn!(
                    "[KMedoids::iterate] cluster {cluster} is empty in iteration {iteration}; keeping its centroid"
                );
                degenerate_clusters.push(DegenerateCluster { cluster, iteration });
            }
            log::debug!(
                "[KMedoids::iterate] k={}, iteration={iteration}, sizes={:?}",
                self.config.k,
                partition.sizes()
            );

            let termination = if same_centroids(&centroids, &next.centroids) {
                Some(Termination::Converged)
            } else if iteration >= self.config.max_iterations {
                Some(Termination::Exhausted)
            } else {
                None
            };
            if let Some(termination) = termination {
                log::info!(
                    "[KMedoids::iterate] k={}: {termination:?} after {iteration} iterations",
                    self.config.k
                );
                return Ok(Clustering {
                    partition,
                    centroids: next.centroids,
                    termination,
                    iterations: iteration,
                    seed: None,
                    degenerate_clusters,
                });
            }
            centroids = next.centroids;
        }
    }
}

/// Checks if two lists hold the same token sets, ignoring order.
pub fn same_centroids(lhs: &[Centroid], rhs: &[Centroid]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }
    let mut counter: HashMap<&TokenSet, isize> = HashMap::new();
    for c in lhs {
        *counter.entry(&c.tokens).or_insert(0) += 1;
    }
    for c in rhs {
        *counter.entry(&c.tokens).or_insert(0) -= 1;
    }
    counter.values().all(|&c| c == 0)
}
