//! Display-only cross-validated accuracy
//!
//! Reproduces the historical headline number: k-fold cross-validation
//! over the authoritative rows with a seeded shuffle, reported as a
//! mean percentage. With the shipped catalog every species has exactly
//! one row, so held-out species are never learnable and the number is
//! 0.0; it is surfaced for continuity and drives no behavior.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::catalog::Catalog;
use crate::encoding::FeatureSchema;
use crate::error::Result;
use crate::tree::DecisionTree;

/// Number of folds (capped at the sample count)
pub const FOLDS: usize = 5;

/// Fixed shuffle seed, so the number is stable across runs
pub const SHUFFLE_SEED: u64 = 42;

/// Mean k-fold accuracy over the authoritative rows, as a percentage.
///
/// Fewer than two rows cannot be folded and score 0.0.
pub fn display_accuracy(catalog: &Catalog) -> Result<f32> {
    let schema = FeatureSchema::from_selections(catalog.resolved_entries().map(|e| &e.traits));

    let mut ids: HashMap<&str, usize> = HashMap::new();
    let mut labels = Vec::with_capacity(catalog.resolved_len());
    let mut vectors = Vec::with_capacity(catalog.resolved_len());
    for entry in catalog.resolved_entries() {
        let next = ids.len();
        let id = *ids.entry(entry.species.as_str()).or_insert(next);
        labels.push(id);
        vectors.push(schema.encode(&entry.traits)?);
    }
    let n_classes = ids.len();

    let n = vectors.len();
    if n < 2 {
        return Ok(0.0);
    }
    let folds = FOLDS.min(n);

    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(SHUFFLE_SEED);
    order.shuffle(&mut rng);

    // Contiguous chunks of the shuffled order; the first n % folds
    // chunks absorb the remainder.
    let base = n / folds;
    let extra = n % folds;
    let mut start = 0;
    let mut score_sum = 0.0f32;
    for fold in 0..folds {
        let size = base + usize::from(fold < extra);
        let test = &order[start..start + size];
        start += size;

        let mut train_vectors = Vec::with_capacity(n - size);
        let mut train_labels = Vec::with_capacity(n - size);
        for &i in &order {
            if !test.contains(&i) {
                train_vectors.push(vectors[i].clone());
                train_labels.push(labels[i]);
            }
        }
        let tree = DecisionTree::fit(&train_vectors, &train_labels, n_classes)?;

        let mut correct = 0usize;
        for &i in test {
            if tree.predict(&vectors[i])?.class == labels[i] {
                correct += 1;
            }
        }
        score_sum += correct as f32 / size as f32;
    }

    Ok(score_sum / folds as f32 * 100.0)
}
