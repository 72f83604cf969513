use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use jaccard_kmedoids::kmedoids::DEFAULT_MAX_ITERATIONS;
use jaccard_kmedoids::{load_documents, sweep, Termination};

#[derive(Parser, Debug)]
#[clap(
    name = "jaccard-kmedoids",
    about = "A program to cluster tweets by the Jaccard distance between their word sets."
)]
struct Args {
    /// File path to the tweets, one `id|timestamp|text` record per line.
    #[clap(short = 'i', long)]
    document_path: PathBuf,

    /// Numbers of clusters to try, separated by commas.
    #[clap(
        short = 'k',
        long,
        use_value_delimiter = true,
        value_delimiter = ',',
        default_value = "2,3,5,7,10"
    )]
    ks: Vec<usize>,

    /// Cap on the number of iterations of each run (must be more than 0).
    #[clap(short = 'm', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Seed value for random values.
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// Uses the texts as they are, without removing mentions, URLs, and hashtag markers.
    #[clap(long)]
    raw: bool,

    /// Prints the medoid text of every cluster.
    #[clap(long)]
    show_medoids: bool,

    /// Shows debug logs.
    #[clap(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    pretty_env_logger::formatted_timed_builder()
        .filter_level(level)
        .init();

    let documents = {
        log::info!("Loading documents...");
        let start = Instant::now();
        let file = File::open(&args.document_path)
            .with_context(|| format!("Failed to open {}", args.document_path.display()))?;
        let documents = load_documents(BufReader::new(file), !args.raw)?;
        log::info!(
            "Loaded {} documents in {} sec",
            documents.len(),
            start.elapsed().as_secs_f64()
        );
        documents
    };

    log::info!("Clustering for k in {:?}...", args.ks);
    let start = Instant::now();
    let entries = sweep(&documents, &args.ks, args.max_iterations, args.seed)?;
    log::info!("Done in {} sec", start.elapsed().as_secs_f64());

    for entry in entries {
        let clustering = &entry.clustering;
        println!("K: {}, Sum of squared errors: {:.4}", entry.k, entry.sse);
        match clustering.termination {
            Termination::Converged => {
                println!("Converged after {} iterations", clustering.iterations)
            }
            Termination::Exhausted => {
                println!("Stopped after {} iterations", clustering.iterations)
            }
        }
        println!("Size of each cluster:");
        for (i, size) in clustering.partition.sizes().into_iter().enumerate() {
            println!("{}: {size} tweets", i + 1);
        }
        if args.show_medoids {
            println!("Medoid of each cluster:");
            for (i, centroid) in clustering.centroids.iter().enumerate() {
                let medoid = &documents[centroid.document];
                let tokens: Vec<_> = medoid.tokens.iter().collect();
                println!("{}: [{}] {}", i + 1, medoid.id, tokens.join(" "));
            }
        }
        println!();
    }

    Ok(())
}
