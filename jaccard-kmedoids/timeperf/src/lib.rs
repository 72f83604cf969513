use jaccard_kmedoids::{Document, TokenSet};
use rand::Rng;

/// Generates tweet-like documents drawn around `num_topics` topics.
///
/// Each document takes most of its words from the vocabulary slice of one
/// topic and the rest from the whole vocabulary.
pub fn synthetic_documents<R>(
    rng: &mut R,
    num_documents: usize,
    num_topics: usize,
    num_words: usize,
) -> Vec<Document>
where
    R: Rng,
{
    const VOCAB_PER_TOPIC: usize = 50;
    let vocab_size = VOCAB_PER_TOPIC * num_topics;
    (0..num_documents)
        .map(|i| {
            let topic = rng.gen_range(0..num_topics);
            let tokens: TokenSet = (0..num_words)
                .map(|_| {
                    let w = if rng.gen_bool(0.8) {
                        topic * VOCAB_PER_TOPIC + rng.gen_range(0..VOCAB_PER_TOPIC)
                    } else {
                        rng.gen_range(0..vocab_size)
                    };
                    format!("w{w}")
                })
                .collect();
            Document::new(i.to_string(), tokens)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_synthetic_documents() {
        let mut rng = StdRng::seed_from_u64(0);
        let docs = synthetic_documents(&mut rng, 20, 4, 10);
        assert_eq!(docs.len(), 20);
        assert!(docs.iter().all(|d| !d.tokens.is_empty() && d.tokens.len() <= 10));
    }
}
