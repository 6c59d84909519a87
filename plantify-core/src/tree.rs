//! Decision tree classifier (CART with Gini impurity)
//!
//! A small, deterministic tree trained from the catalog at startup.
//! Splits are axis-aligned thresholds chosen by exhaustive search over
//! the midpoints of consecutive observed feature values; the first
//! split with the lowest weighted impurity wins, so repeated training
//! on the same data always yields the same tree. Leaves keep the full
//! class histogram so predictions carry a posterior alongside the
//! winning class.

use crate::error::{Error, Result};

/// Tree node: an internal threshold test or a leaf histogram
#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf {
        counts: Vec<u32>,
        total: u32,
    },
}

/// Classification result: winning class and its leaf posterior
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub class: usize,
    pub posterior: f32,
}

/// Trained classifier over fixed-width feature vectors
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    n_features: usize,
    n_classes: usize,
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Train a tree on feature vectors and class labels.
    ///
    /// Splitting continues until nodes are pure or no feature varies;
    /// samples with identical features but different labels end in a
    /// shared mixed leaf.
    pub fn fit(features: &[Vec<f32>], labels: &[usize], n_classes: usize) -> Result<Self> {
        if features.is_empty() {
            return Err(Error::Training("no training samples".to_string()));
        }
        if features.len() != labels.len() {
            return Err(Error::Training(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        if n_classes == 0 {
            return Err(Error::Training("no classes".to_string()));
        }
        let n_features = features[0].len();
        for (i, row) in features.iter().enumerate() {
            if row.len() != n_features {
                return Err(Error::Training(format!(
                    "row {i} has {} columns, expected {n_features}",
                    row.len()
                )));
            }
        }
        for (i, &label) in labels.iter().enumerate() {
            if label >= n_classes {
                return Err(Error::Training(format!(
                    "label {label} at row {i} outside 0..{n_classes}"
                )));
            }
        }

        let mut nodes = Vec::new();
        let indices: Vec<usize> = (0..features.len()).collect();
        grow(&mut nodes, features, labels, n_classes, &indices);
        Ok(DecisionTree {
            n_features,
            n_classes,
            nodes,
        })
    }

    /// Expected feature vector width
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of classes the tree distinguishes
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Number of leaf nodes
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// Classify one feature vector
    pub fn predict(&self, x: &[f32]) -> Result<Prediction> {
        if x.len() != self.n_features {
            return Err(Error::SchemaMismatch {
                expected: self.n_features,
                actual: x.len(),
            });
        }
        let mut at = 0;
        loop {
            match &self.nodes[at] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    at = if x[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Node::Leaf { counts, total } => {
                    // Lowest class id wins ties, so the argmax is stable.
                    let mut class = 0;
                    let mut best = 0;
                    for (c, &n) in counts.iter().enumerate() {
                        if n > best {
                            best = n;
                            class = c;
                        }
                    }
                    let posterior = best as f32 / *total as f32;
                    return Ok(Prediction { class, posterior });
                }
            }
        }
    }
}

/// Recursively grow the subtree for `indices`, returning its root index
fn grow(
    nodes: &mut Vec<Node>,
    features: &[Vec<f32>],
    labels: &[usize],
    n_classes: usize,
    indices: &[usize],
) -> usize {
    let counts = class_counts(labels, n_classes, indices);
    let pure = counts.iter().filter(|&&n| n > 0).count() <= 1;

    let split = if pure {
        None
    } else {
        best_split(features, labels, n_classes, indices)
    };

    match split {
        None => {
            let total = indices.len() as u32;
            nodes.push(Node::Leaf { counts, total });
            nodes.len() - 1
        }
        Some((feature, threshold)) => {
            let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                .iter()
                .partition(|&&i| features[i][feature] <= threshold);
            let at = nodes.len();
            nodes.push(Node::Split {
                feature,
                threshold,
                left: 0,
                right: 0,
            });
            let left = grow(nodes, features, labels, n_classes, &left_idx);
            let right = grow(nodes, features, labels, n_classes, &right_idx);
            if let Node::Split {
                left: l, right: r, ..
            } = &mut nodes[at]
            {
                *l = left;
                *r = right;
            }
            at
        }
    }
}

fn class_counts(labels: &[usize], n_classes: usize, indices: &[usize]) -> Vec<u32> {
    let mut counts = vec![0u32; n_classes];
    for &i in indices {
        counts[labels[i]] += 1;
    }
    counts
}

fn gini(counts: &[u32]) -> f64 {
    let total: u32 = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    let sum_sq: f64 = counts
        .iter()
        .map(|&n| {
            let p = n as f64 / total;
            p * p
        })
        .sum();
    1.0 - sum_sq
}

/// Exhaustive best-split search: lowest weighted Gini impurity, with
/// the earliest (feature, threshold) kept on ties. Returns None when no
/// feature varies over the node's samples.
fn best_split(
    features: &[Vec<f32>],
    labels: &[usize],
    n_classes: usize,
    indices: &[usize],
) -> Option<(usize, f32)> {
    let n_features = features[indices[0]].len();
    let n_total = indices.len() as f64;
    let mut best: Option<(f64, usize, f32)> = None;

    for feature in 0..n_features {
        let mut values: Vec<f32> = indices.iter().map(|&i| features[i][feature]).collect();
        values.sort_by(f32::total_cmp);
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;
            let mut left = vec![0u32; n_classes];
            let mut right = vec![0u32; n_classes];
            for &i in indices {
                if features[i][feature] <= threshold {
                    left[labels[i]] += 1;
                } else {
                    right[labels[i]] += 1;
                }
            }
            let n_left: u32 = left.iter().sum();
            let n_right: u32 = right.iter().sum();
            if n_left == 0 || n_right == 0 {
                continue;
            }
            let score = (n_left as f64 / n_total) * gini(&left)
                + (n_right as f64 / n_total) * gini(&right);
            let better = match best {
                None => true,
                Some((current, _, _)) => score < current,
            };
            if better {
                best = Some((score, feature, threshold));
            }
        }
    }

    best.map(|(_, feature, threshold)| (feature, threshold))
}
