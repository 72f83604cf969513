//! Assignment of documents to their nearest centroids.
use crate::document::Document;
use crate::medoid::Centroid;
use crate::token_set::jaccard_distance;

/// A division of documents into disjoint clusters.
///
/// Members are positions in the document collection the partition was built
/// from, listed in ascending order within each cluster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
    clusters: Vec<Vec<usize>>,
}

impl Partition {
    /// Creates a partition from member lists, one per cluster.
    pub fn new(clusters: Vec<Vec<usize>>) -> Self {
        Self { clusters }
    }

    /// Gets the member positions of every cluster.
    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.clusters
    }

    /// Gets the member positions of the `i`-th cluster.
    pub fn cluster(&self, i: usize) -> Option<&[usize]> {
        self.clusters.get(i).map(Vec::as_slice)
    }

    /// Gets the number of clusters, including empty ones.
    pub fn num_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Gets the number of documents over all clusters.
    pub fn num_documents(&self) -> usize {
        self.clusters.iter().map(Vec::len).sum()
    }

    /// Gets the size of each cluster.
    pub fn sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Vec::len).collect()
    }

    /// Gets the indices of clusters without members.
    pub fn empty_clusters(&self) -> Vec<usize> {
        self.clusters
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.is_empty().then_some(i))
            .collect()
    }

    /// Finds the cluster containing the document at `position`.
    pub fn cluster_of(&self, position: usize) -> Option<usize> {
        self.clusters
            .iter()
            .position(|c| c.binary_search(&position).is_ok())
    }
}

/// Finds the centroid nearest to `document`.
///
/// Ties go to the lowest-indexed centroid, so the result does not depend on
/// anything but the order of `centroids`. Returns `None` only if `centroids`
/// is empty.
pub fn nearest_centroid(document: &Document, centroids: &[Centroid]) -> Option<(usize, f64)> {
    let mut nearest = None;
    for (i, centroid) in centroids.iter().enumerate() {
        let dist = jaccard_distance(&document.tokens, &centroid.tokens);
        match nearest {
            Some((_, min_dist)) if dist >= min_dist => {}
            _ => nearest = Some((i, dist)),
        }
    }
    nearest
}

/// Labels every document with its nearest centroid.
///
/// The result always has exactly `centroids.len()` clusters, some of which may
/// be empty. Neither the documents nor the centroids are modified.
pub fn assign(documents: &[Document], centroids: &[Centroid]) -> Partition {
    let mut clusters = vec![vec![]; centroids.len()];
    for (position, document) in documents.iter().enumerate() {
        if let Some((i, _)) = nearest_centroid(document, centroids) {
            clusters[i].push(position);
        }
    }
    Partition::new(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_documents() -> Vec<Document> {
        vec![
            Document::from_text("d1", "a b"),
            Document::from_text("d2", "a b c"),
            Document::from_text("d3", "x y"),
            Document::from_text("d4", "x y z"),
        ]
    }

    fn centroids_at(documents: &[Document], positions: &[usize]) -> Vec<Centroid> {
        positions
            .iter()
            .map(|&p| Centroid::from_document(documents, p))
            .collect()
    }

    #[test]
    fn test_assign() {
        let docs = example_documents();
        let centroids = centroids_at(&docs, &[0, 2]);
        let partition = assign(&docs, &centroids);
        assert_eq!(partition.clusters(), &[vec![0, 1], vec![2, 3]]);
        assert_eq!(partition.sizes(), vec![2, 2]);
        assert_eq!(partition.cluster_of(3), Some(1));
    }

    #[test]
    fn test_ties_go_to_first_centroid() {
        let docs = vec![
            Document::from_text("p", "a"),
            Document::from_text("q", "b"),
            Document::from_text("r", "c"),
        ];
        // "c" is at distance 1 from both centroids.
        let centroids = centroids_at(&docs, &[1, 0]);
        let partition = assign(&docs, &centroids);
        assert_eq!(partition.clusters(), &[vec![1, 2], vec![0]]);
    }

    #[test]
    fn test_duplicate_centroids_leave_empty_cluster() {
        let docs = vec![
            Document::from_text("p", "a b"),
            Document::from_text("q", "b a"),
            Document::from_text("r", "c"),
        ];
        let centroids = centroids_at(&docs, &[0, 1]);
        let partition = assign(&docs, &centroids);
        assert_eq!(partition.num_clusters(), 2);
        assert_eq!(partition.clusters(), &[vec![0, 1, 2], vec![]]);
        assert_eq!(partition.empty_clusters(), vec![1]);
    }

    #[test]
    fn test_partition_is_exhaustive_and_disjoint() {
        let mut docs = example_documents();
        docs.push(Document::from_text("d5", ""));
        docs.push(Document::from_text("d6", "a x"));
        let centroids = centroids_at(&docs, &[1, 3, 4]);
        let partition = assign(&docs, &centroids);
        assert_eq!(partition.num_clusters(), 3);
        assert_eq!(partition.num_documents(), docs.len());
        for position in 0..docs.len() {
            let owners = partition
                .clusters()
                .iter()
                .filter(|c| c.contains(&position))
                .count();
            assert_eq!(owners, 1);
        }
    }

    #[test]
    fn test_nearest_centroid() {
        let docs = example_documents();
        let centroids = centroids_at(&docs, &[0, 2]);
        let (i, dist) = nearest_centroid(&docs[3], &centroids).unwrap();
        assert_eq!(i, 1);
        assert!((dist - 1. / 3.).abs() < 1e-12);
        assert_eq!(nearest_centroid(&docs[0], &[]), None);
    }
}
