use jaccard_kmedoids::{normalize, Document, KMedoids, KMedoidsConfig, Termination};

fn main() {
    let tweets = vec![
        "Flu season starts early this year http://t.co/a1",
        "Get your #flu shot early this year, says @CDCgov",
        "New study links sugar to obesity",
        "Sugar tax may curb #obesity http://t.co/b2",
    ];
    let documents: Vec<_> = tweets
        .iter()
        .enumerate()
        .map(|(i, text)| Document::from_text(i.to_string(), normalize(text)))
        .collect();

    // Starts from the first and the third tweets as medoids.
    let kmedoids = KMedoids::new(KMedoidsConfig::new(2)).unwrap();
    let clustering = kmedoids.fit_from(&documents, &[0, 2]).unwrap();

    assert_eq!(clustering.termination, Termination::Converged);
    assert_eq!(clustering.member_ids(&documents, 0), vec!["0", "1"]);
    assert_eq!(clustering.member_ids(&documents, 1), vec!["2", "3"]);
    println!("sse = {:.4}", clustering.sse(&documents).unwrap());
}
