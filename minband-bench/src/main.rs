mod generate_corpus;
mod metrics;

use std::collections::HashSet;
use std::time::Instant;

use itertools::Itertools;
use minband::lsh::lsh;
use minband::minhash::{compute_minhash_similarity, jaccard, minhash_with_family, HashFamily, DEFAULT_SEED};
use rayon::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::generate_corpus::{CorpusGenerator, DifferenceMode};
use crate::metrics::{MetricResult, Metrics};

const JACCARD_THRESHOLD: f64 = 0.5;

/// Documents whose exact jaccard similarity with each document reaches `threshold`.
fn ground_truth(documents: &[Vec<String>], threshold: f64) -> Vec<HashSet<usize>> {
    (0..documents.len())
        .into_par_iter()
        .map(|i| {
            (0..documents.len())
                .filter(|&j| j != i && jaccard(&documents[i], &documents[j]) >= threshold)
                .collect()
        })
        .collect()
}

/// Evaluates raw LSH candidates and candidates whose signature similarity
/// reaches `threshold`.
fn run_lsh(
    documents: &[Vec<String>],
    truth: &[HashSet<usize>],
    num_hashes: usize,
    num_bands: usize,
    threshold: f64,
) -> minband::Result<(MetricResult, MetricResult)> {
    let family = HashFamily::generate(num_hashes);
    let now = Instant::now();
    let signatures = minhash_with_family(documents, &family)?;
    let candidates = lsh(&signatures, num_bands)?.find_candidates();
    let elapsed = now.elapsed();
    info!(
        num_hashes,
        num_bands,
        millis = elapsed.as_millis() as u64,
        documents = documents.len(),
        "ran minhash lsh"
    );

    let columns = (0..documents.len()).map(|d| signatures.column(d)).collect_vec();
    let mut raw = Metrics::new();
    let mut verified = Metrics::new();
    for (document, reference) in truth.iter().enumerate() {
        let found: HashSet<usize> = candidates
            .get_by_key(document)
            .iter()
            .map(|candidate| candidate.index)
            .collect();
        let filtered: HashSet<usize> = found
            .iter()
            .copied()
            .filter(|&other| compute_minhash_similarity(&columns[document], &columns[other]) >= threshold)
            .collect();
        raw.update_metrics(&found, reference);
        verified.update_metrics(&filtered, reference);
    }
    Ok((raw.get_result(), verified.get_result()))
}

fn run_mode(mode: DifferenceMode) -> minband::Result<()> {
    let generator = CorpusGenerator::new(0.6, 10, 50, 100, 1_000_000, mode, DEFAULT_SEED);
    let clusters = generator.generate();
    let similarities = clusters
        .iter()
        .flat_map(|cluster| {
            debug!(cluster = cluster.id, members = cluster.documents.len(), "generated cluster");
            cluster.documents.iter().map(move |(_, shingles)| jaccard(shingles, &cluster.centroid))
        })
        .collect_vec();
    let documents: Vec<Vec<String>> = clusters
        .into_iter()
        .flat_map(|cluster| cluster.documents.into_iter().map(|(_, shingles)| shingles))
        .collect();
    println!(
        "{:?}: generated {} documents, mean jaccard to centroid {:.3}",
        mode,
        documents.len(),
        similarities.iter().sum::<f64>() / similarities.len().max(1) as f64
    );

    let now = Instant::now();
    let truth = ground_truth(&documents, JACCARD_THRESHOLD);
    let num_pairs: usize = truth.iter().map(HashSet::len).sum::<usize>() / 2;
    println!(
        "Ground truth: {} pairs with jaccard >= {} in {} millis",
        num_pairs,
        JACCARD_THRESHOLD,
        now.elapsed().as_millis()
    );

    for (num_hashes, num_bands) in [(50, 10), (100, 20), (100, 25), (120, 40)] {
        let (raw, verified) = run_lsh(&documents, &truth, num_hashes, num_bands, JACCARD_THRESHOLD)?;
        println!("hashes {} bands {} candidates {:?}", num_hashes, num_bands, raw);
        println!("hashes {} bands {} verified   {:?}", num_hashes, num_bands, verified);
    }
    Ok(())
}

fn main() -> minband::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    for mode in [DifferenceMode::SameIndices, DifferenceMode::DiffIndices] {
        run_mode(mode)?;
    }
    Ok(())
}
