//! Sets of distinct tokens and the Jaccard distance between them.
use std::cmp::Ordering;

/// A finite set of distinct tokens.
///
/// Tokens are kept sorted and de-duplicated, so two sets built from the same
/// tokens in any order or multiplicity compare equal and hash identically.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenSet {
    tokens: Vec<String>,
}

impl TokenSet {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Builds the set of whitespace-delimited tokens in `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use jaccard_kmedoids::TokenSet;
    ///
    /// let set = TokenSet::from_text("flu shot  flu season");
    /// assert_eq!(set.len(), 3);
    /// assert!(set.contains("season"));
    /// ```
    pub fn from_text<S>(text: S) -> Self
    where
        S: AsRef<str>,
    {
        text.as_ref().split_whitespace().collect()
    }

    /// Gets the number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Checks if the set has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Checks if `token` is a member.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens
            .binary_search_by(|t| t.as_str().cmp(token))
            .is_ok()
    }

    /// Iterates the tokens in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Counts the tokens shared with `other`.
    pub fn intersection_len(&self, other: &Self) -> usize {
        let (mut i, mut j) = (0, 0);
        let mut shared = 0;
        while i < self.tokens.len() && j < other.tokens.len() {
            match self.tokens[i].cmp(&other.tokens[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    shared += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        shared
    }

    /// Counts the tokens in either set.
    pub fn union_len(&self, other: &Self) -> usize {
        self.len() + other.len() - self.intersection_len(other)
    }
}

impl<S> FromIterator<S> for TokenSet
where
    S: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        let mut tokens: Vec<String> = iter.into_iter().map(Into::into).collect();
        tokens.sort_unstable();
        tokens.dedup();
        Self { tokens }
    }
}

/// Computes the Jaccard distance `1 - |A ∩ B| / |A ∪ B|`, in the range of [0,1].
///
/// Two empty sets are treated as identical and have distance 0, which keeps the
/// metric defined where the union is empty.
///
/// # Examples
///
/// ```
/// use jaccard_kmedoids::{jaccard_distance, TokenSet};
///
/// let x = TokenSet::from_text("a b");
/// let y = TokenSet::from_text("a b c");
/// assert!((jaccard_distance(&x, &y) - 1. / 3.).abs() < 1e-12);
/// assert_eq!(jaccard_distance(&TokenSet::new(), &TokenSet::new()), 0.);
/// ```
pub fn jaccard_distance(lhs: &TokenSet, rhs: &TokenSet) -> f64 {
    let (num, den) = jaccard_distance_ratio(lhs, rhs);
    num as f64 / den as f64
}

/// Computes the Jaccard distance as the exact fraction `|A △ B| / |A ∪ B|`,
/// returned as `(numerator, denominator)`.
///
/// Two empty sets give `(0, 1)`.
pub fn jaccard_distance_ratio(lhs: &TokenSet, rhs: &TokenSet) -> (usize, usize) {
    let shared = lhs.intersection_len(rhs);
    let union = lhs.len() + rhs.len() - shared;
    if union == 0 {
        return (0, 1);
    }
    (union - shared, union)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_sets() -> Vec<TokenSet> {
        vec![
            TokenSet::new(),
            TokenSet::from_text("a"),
            TokenSet::from_text("a b"),
            TokenSet::from_text("a b c"),
            TokenSet::from_text("x y"),
            TokenSet::from_text("x y z a"),
            TokenSet::from_text("flu vaccine season"),
        ]
    }

    #[test]
    fn test_from_text_collapses_duplicates() {
        let set = TokenSet::from_text("b a  b\ta\nc");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(set, TokenSet::from_text("c b a"));
    }

    #[test]
    fn test_from_blank_text() {
        assert!(TokenSet::from_text("").is_empty());
        assert!(TokenSet::from_text(" \t\n ").is_empty());
    }

    #[test]
    fn test_contains() {
        let set = TokenSet::from_text("health news today");
        assert!(set.contains("news"));
        assert!(!set.contains("new"));
    }

    #[test]
    fn test_set_sizes() {
        let x = TokenSet::from_text("a b c d");
        let y = TokenSet::from_text("c d e");
        assert_eq!(x.intersection_len(&y), 2);
        assert_eq!(x.union_len(&y), 5);
    }

    #[test]
    fn test_distance_values() {
        let x = TokenSet::from_text("a b");
        let y = TokenSet::from_text("a b c");
        let z = TokenSet::from_text("x y");
        assert!((jaccard_distance(&x, &y) - 1. / 3.).abs() < 1e-12);
        assert_eq!(jaccard_distance(&x, &z), 1.);
        assert_eq!(jaccard_distance(&x, &TokenSet::new()), 1.);
    }

    #[test]
    fn test_distance_ratio() {
        let x = TokenSet::from_text("a b c d");
        let y = TokenSet::from_text("c d e");
        assert_eq!(jaccard_distance_ratio(&x, &y), (3, 5));
        assert_eq!(jaccard_distance_ratio(&x, &x), (0, 4));
        assert_eq!(jaccard_distance_ratio(&TokenSet::new(), &TokenSet::new()), (0, 1));
    }

    #[test]
    fn test_empty_sets_are_identical() {
        let empty = TokenSet::from_text("");
        assert_eq!(jaccard_distance(&empty, &empty), 0.);
        assert_eq!(jaccard_distance(&empty, &TokenSet::new()), 0.);
    }

    #[test]
    fn test_identity() {
        for x in example_sets() {
            assert_eq!(jaccard_distance(&x, &x), 0.);
        }
    }

    #[test]
    fn test_symmetry_and_bounds() {
        let sets = example_sets();
        for x in &sets {
            for y in &sets {
                let d = jaccard_distance(x, y);
                assert_eq!(d, jaccard_distance(y, x));
                assert!((0. ..=1.).contains(&d));
            }
        }
    }
}
