// ============================================================
// Layer 5 — CART Decision Tree
// ============================================================
// A binary classification tree grown with Gini impurity.
//
// Nodes live in a flat Vec (index 0 is the root). A split node
// sends a row left when row[feature] <= threshold. A leaf keeps
// the class distribution of the training samples that reached
// it, so the forest can average probabilities across trees.
//
// Growth rules:
//   - stop when the node is pure, has fewer than
//     min_samples_split samples, or hits max_depth
//   - at each node, shuffle the features and scan them in that
//     order; stop after max_features once a valid split exists
//   - thresholds are midpoints between consecutive distinct
//     sorted values
//
// `samples` holds row indices and may contain duplicates (a
// bootstrap draw); a duplicate simply counts twice.

use std::cmp::Ordering;

use rand::{rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::domain::features::N_FEATURES;

/// One feature row in FEATURE_COLUMNS order.
pub type Row = [f64; N_FEATURES];

const PURITY_EPSILON: f64 = 1e-12;

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    pub max_depth:         Option<usize>,
    pub min_samples_split: usize,
    pub max_features:      usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Leaf {
        /// Fraction of samples per class, indexed by class id
        distribution: Vec<f64>,
    },
    Split {
        feature:   usize,
        threshold: f64,
        left:      usize,
        right:     usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Grow a tree over `samples` (indices into `rows`/`labels`).
    pub fn fit(
        rows:      &[Row],
        labels:    &[usize],
        samples:   &mut [usize],
        n_classes: usize,
        params:    TreeParams,
        rng:       &mut StdRng,
    ) -> Self {
        let mut builder = Builder {
            rows,
            labels,
            n_classes,
            params,
            rng,
            nodes: Vec::new(),
        };
        builder.grow(samples, 0);
        Self { nodes: builder.nodes }
    }

    /// Class distribution of the leaf `row` lands in.
    ///
    /// Returns None if the tree references a node or feature that
    /// does not exist, or a child that does not come after its
    /// parent. Both only happen with a corrupted artifact.
    pub fn predict_proba(&self, row: &[f64]) -> Option<&[f64]> {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx)? {
                Node::Leaf { distribution } => return Some(distribution),
                Node::Split { feature, threshold, left, right } => {
                    let value = *row.get(*feature)?;
                    let next  = if value <= *threshold { *left } else { *right };
                    // Children are always pushed after their parent
                    if next <= idx {
                        return None;
                    }
                    idx = next;
                }
            }
        }
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }
}

// ─── Tree builder ─────────────────────────────────────────────────────────────

struct Split {
    feature:   usize,
    threshold: f64,
    impurity:  f64,
}

struct Builder<'a> {
    rows:      &'a [Row],
    labels:    &'a [usize],
    n_classes: usize,
    params:    TreeParams,
    rng:       &'a mut StdRng,
    nodes:     Vec<Node>,
}

impl Builder<'_> {
    /// Push the node for `samples` (and its subtree); return its index.
    fn grow(&mut self, samples: &mut [usize], depth: usize) -> usize {
        let id     = self.nodes.len();
        let counts = self.class_counts(samples);
        self.nodes.push(Node::Leaf { distribution: distribution(&counts) });

        if !self.should_split(&counts, samples.len(), depth) {
            return id;
        }
        let Some(split) = self.best_split(samples, &counts) else {
            return id;
        };

        let rows = self.rows;
        let mid  = partition(samples, |i| rows[i][split.feature] <= split.threshold);
        let (left_samples, right_samples) = samples.split_at_mut(mid);

        let left  = self.grow(left_samples, depth + 1);
        let right = self.grow(right_samples, depth + 1);

        self.nodes[id] = Node::Split {
            feature:   split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    fn should_split(&self, counts: &[usize], n_samples: usize, depth: usize) -> bool {
        if n_samples < self.params.min_samples_split {
            return false;
        }
        if self.params.max_depth.is_some_and(|max| depth >= max) {
            return false;
        }
        gini(counts, n_samples as f64) > PURITY_EPSILON
    }

    fn class_counts(&self, samples: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &i in samples {
            counts[self.labels[i]] += 1;
        }
        counts
    }

    /// Lowest weighted child impurity over the sampled features.
    fn best_split(&mut self, samples: &[usize], parent: &[usize]) -> Option<Split> {
        let rows   = self.rows;
        let labels = self.labels;
        let total  = samples.len() as f64;

        let mut features: Vec<usize> = (0..N_FEATURES).collect();
        features.shuffle(&mut *self.rng);

        let mut sorted = samples.to_vec();
        let mut best: Option<Split> = None;

        for (visited, &feature) in features.iter().enumerate() {
            if visited >= self.params.max_features && best.is_some() {
                break;
            }

            sorted.sort_by(|&a, &b| rows[a][feature].total_cmp(&rows[b][feature]));

            let mut left  = vec![0usize; self.n_classes];
            let mut right = parent.to_vec();

            for pos in 0..sorted.len().saturating_sub(1) {
                let label = labels[sorted[pos]];
                left[label]  += 1;
                right[label] -= 1;

                let lo = rows[sorted[pos]][feature];
                let hi = rows[sorted[pos + 1]][feature];
                if lo.partial_cmp(&hi) != Some(Ordering::Less) {
                    continue;
                }

                let n_left   = (pos + 1) as f64;
                let n_right  = total - n_left;
                let impurity = (n_left * gini(&left, n_left) + n_right * gini(&right, n_right)) / total;

                if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                    best = Some(Split { feature, threshold: midpoint(lo, hi), impurity });
                }
            }
        }

        best
    }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Gini impurity: 1 - Σ p_k²
fn gini(counts: &[usize], n: f64) -> f64 {
    if n <= 0.0 {
        return 0.0;
    }
    1.0 - counts.iter().map(|&c| (c as f64 / n).powi(2)).sum::<f64>()
}

fn distribution(counts: &[usize]) -> Vec<f64> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    counts.iter().map(|&c| c as f64 / total as f64).collect()
}

/// Midpoint of lo < hi. Falls back to `lo` when rounding lands on `hi`.
fn midpoint(lo: f64, hi: f64) -> f64 {
    let mid = lo / 2.0 + hi / 2.0;
    if mid >= hi || !mid.is_finite() { lo } else { mid }
}

/// Move every index that goes left to the front; return the boundary.
fn partition(samples: &mut [usize], goes_left: impl Fn(usize) -> bool) -> usize {
    let mut mid = 0;
    for i in 0..samples.len() {
        if goes_left(samples[i]) {
            samples.swap(mid, i);
            mid += 1;
        }
    }
    mid
}
