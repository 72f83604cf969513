//! k-medoids clustering of short documents in the Jaccard space.
//!
//! Documents are compared as sets of distinct words. Clusters are represented by
//! medoids, the members closest in total to the rest of their cluster, so every
//! representative is the token set of a real document.
#![deny(missing_docs)]

pub mod assign;
pub mod document;
pub mod errors;
pub mod kmedoids;
pub mod medoid;
pub mod quality;
pub mod sweep;
pub mod token_set;

pub use assign::{assign, Partition};
pub use document::{load_documents, normalize, Document};
pub use errors::{KMedoidsError, Result};
pub use kmedoids::{Clustering, KMedoids, KMedoidsConfig, Termination};
pub use medoid::{update, Centroid};
pub use quality::sum_of_squared_errors;
pub use sweep::{sweep, SweepEntry};
pub use token_set::{jaccard_distance, jaccard_distance_ratio, TokenSet};
