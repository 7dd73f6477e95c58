use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

/// Averages precision, recall and F-score over many queries.
#[derive(Debug, Default)]
pub struct Metrics {
    precisions: Vec<f64>,
    recalls: Vec<f64>,
    fscores: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricResult {
    pub precision: f64,
    pub recall: f64,
    pub fscore: f64,
}

fn fscore(precision: f64, recall: f64) -> f64 {
    if precision == 0.0 || recall == 0.0 {
        return 0.0;
    }
    2.0 / (1.0 / precision + 1.0 / recall)
}

fn mean(list: &[f64]) -> f64 {
    if list.is_empty() {
        return 0.0;
    }
    list.iter().sum::<f64>() / list.len() as f64
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one query. Queries where both sets are empty are skipped.
    pub fn update_metrics<T, S1, S2>(&mut self, found: &HashSet<T, S1>, reference: &HashSet<T, S2>)
    where
        T: Eq + Hash,
        S1: BuildHasher,
        S2: BuildHasher,
    {
        if found.is_empty() && reference.is_empty() {
            return;
        }
        let intersection = reference.iter().filter(|item| found.contains(*item)).count() as f64;
        let precision = if found.is_empty() { 0.0 } else { intersection / found.len() as f64 };
        let recall = if reference.is_empty() { 1.0 } else { intersection / reference.len() as f64 };

        self.precisions.push(precision);
        self.recalls.push(recall);
        self.fscores.push(fscore(precision, recall));
    }

    pub fn num_queries(&self) -> usize {
        self.precisions.len()
    }

    pub fn get_result(&self) -> MetricResult {
        MetricResult {
            precision: mean(&self.precisions),
            recall: mean(&self.recalls),
            fscore: mean(&self.fscores),
        }
    }
}
