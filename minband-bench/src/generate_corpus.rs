use rand::distributions::Uniform;
use rand::prelude::Distribution;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use rayon::prelude::*;
use tracing::debug;

pub struct GeneratedCluster {
    pub id: usize,
    /// `(document index, shingles)` of every cluster member.
    pub documents: Vec<(usize, Vec<String>)>,

    // The initial document from which the members were derived
    pub centroid: Vec<String>,
}

/// DifferenceMode indicates whether the members of a cluster differ from the
/// centroid in the same or in different positions.
///
/// With SameIndices, num_changes random positions are chosen once per
/// cluster and every member gets new shingles in exactly those positions.
/// With DiffIndices, positions are chosen again for every member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceMode {
    SameIndices,
    DiffIndices,
}

/// Generates clusters of shingle sets whose members are at least
/// `jaccard_similarity` similar to the cluster centroid.
///
/// Generation is reproducible: cluster `i` always draws from a generator
/// seeded with `seed + i`.
pub struct CorpusGenerator {
    pub jaccard_similarity: f64,
    pub cluster_size: usize,
    pub set_size: usize,
    pub num_clusters: usize,
    pub vocabulary_size: usize,
    pub num_changes: usize,
    pub mode: DifferenceMode,
    pub seed: u64,
}

impl CorpusGenerator {
    pub fn new(
        jaccard_similarity: f64,
        cluster_size: usize,
        set_size: usize,
        num_clusters: usize,
        vocabulary_size: usize,
        mode: DifferenceMode,
        seed: u64,
    ) -> Self {
        let mut generator = CorpusGenerator {
            jaccard_similarity,
            cluster_size,
            set_size,
            num_clusters,
            vocabulary_size,
            num_changes: 0,
            mode,
            seed,
        };
        generator.num_changes = generator.num_changes();
        generator
    }

    pub fn generate(&self) -> Vec<GeneratedCluster> {
        debug!(
            clusters = self.num_clusters,
            cluster_size = self.cluster_size,
            num_changes = self.num_changes,
            mode = ?self.mode,
            "generating corpus"
        );
        (0..self.num_clusters)
            .into_par_iter()
            .map(|id| self.generate_cluster(id))
            .collect()
    }

    /// Computes the maximum number of elements changed in a set of
    /// `set_size` elements that keeps the jaccard similarity above the
    /// required one.
    fn num_changes(&self) -> usize {
        let mut k = 1;
        let n = self.set_size as f64;
        while (n - k as f64) / (n + k as f64) > self.jaccard_similarity {
            k += 1;
        }
        k - 1
    }

    fn generate_cluster(&self, id: usize) -> GeneratedCluster {
        let mut rng = Pcg64::seed_from_u64(self.seed.wrapping_add(id as u64));
        let values = Uniform::new(0, self.vocabulary_size);
        let indices = Uniform::new(0, self.set_size);
        let centroid: Vec<usize> = values.sample_iter(&mut rng).take(self.set_size).collect();
        let same_indices: Vec<usize> = indices.sample_iter(&mut rng).take(self.num_changes).collect();

        let first_document = id * self.cluster_size;
        let documents = (0..self.cluster_size)
            .map(|member| {
                let mut items = centroid.clone();
                for change in 0..self.num_changes {
                    let position = match self.mode {
                        DifferenceMode::SameIndices => same_indices[change],
                        DifferenceMode::DiffIndices => indices.sample(&mut rng),
                    };
                    items[position] = values.sample(&mut rng);
                }
                (first_document + member, to_shingles(&items))
            })
            .collect();

        GeneratedCluster {
            id,
            documents,
            centroid: to_shingles(&centroid),
        }
    }
}

fn to_shingles(items: &[usize]) -> Vec<String> {
    items.iter().map(|item| format!("s{}", item)).collect()
}
