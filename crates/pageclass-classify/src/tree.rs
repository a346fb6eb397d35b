//! C4.5 decision tree
//!
//! Induction over the ten continuous attributes of a [`FeatureVector`]:
//!
//! - Every split is binary, `attribute <= threshold` versus `>`, with the
//!   threshold taken from a training value.
//! - Among the attributes whose split has at least average information
//!   gain, the one with the highest gain ratio wins. The gain of each
//!   split is reduced by `log2(candidates) / n` to penalize attributes
//!   with many distinct values.
//! - Each branch keeps at least `min_leaf` training examples.
//! - After growing, subtrees whose pessimistic error estimate (upper
//!   confidence limit at 25%) is not better than that of a single leaf are
//!   replaced by that leaf.

use crate::class::{BlockClass, NUM_CLASSES};
use crate::classifier::Classifier;
use crate::dataset::LabeledVector;
use crate::error::{ClassifyError, ClassifyResult};
use log::{debug, info};
use pageclass_features::{ATTRIBUTE_NAMES, FEATURE_COUNT, FeatureVector};
use std::fmt;

/// Normal deviate for a one-sided 25% confidence limit
const PRUNING_Z: f64 = 0.6744897501960817;
/// Confidence factor of the pruning estimate
const PRUNING_CONFIDENCE: f64 = 0.25;
/// Upper bound on the minimum branch size derived from the node size
const MAX_MIN_SPLIT: f64 = 25.0;

/// Options for [`DecisionTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    /// Minimum number of training examples per branch (at least 1)
    pub min_leaf: usize,
    /// Prune the grown tree
    pub pruning: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            min_leaf: 2,
            pruning: true,
        }
    }
}

impl TreeOptions {
    /// Set the minimum branch size.
    pub fn with_min_leaf(mut self, min_leaf: usize) -> Self {
        self.min_leaf = min_leaf.max(1);
        self
    }

    /// Enable or disable pruning.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }
}

type Distribution = [usize; NUM_CLASSES];

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        class: BlockClass,
        distribution: Distribution,
    },
    Split {
        attribute: usize,
        threshold: f64,
        distribution: Distribution,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn leaf(distribution: Distribution) -> Self {
        Node::Leaf {
            class: majority(&distribution),
            distribution,
        }
    }

    fn distribution(&self) -> &Distribution {
        match self {
            Node::Leaf { distribution, .. } | Node::Split { distribution, .. } => distribution,
        }
    }

    fn classify(&self, vector: &FeatureVector) -> BlockClass {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { class, .. } => return *class,
                Node::Split {
                    attribute,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    node = if vector.get(*attribute) <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    fn num_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { left, right, .. } => left.num_leaves() + right.num_leaves(),
        }
    }

    fn size(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { left, right, .. } => 1 + left.size() + right.size(),
        }
    }
}

/// A candidate binary split
#[derive(Debug, Clone, Copy)]
struct Candidate {
    attribute: usize,
    threshold: f64,
    gain: f64,
    gain_ratio: f64,
}

/// C4.5 decision tree classifier
#[derive(Debug, Clone, Default)]
pub struct DecisionTree {
    options: TreeOptions,
    root: Option<Node>,
}

impl DecisionTree {
    /// Create an unbuilt tree with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unbuilt tree with the given options.
    pub fn with_options(options: TreeOptions) -> Self {
        Self {
            options,
            root: None,
        }
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    pub fn is_built(&self) -> bool {
        self.root.is_some()
    }

    /// Number of leaves (0 when unbuilt).
    pub fn num_leaves(&self) -> usize {
        self.root.as_ref().map_or(0, Node::num_leaves)
    }

    /// Number of nodes (0 when unbuilt).
    pub fn size(&self) -> usize {
        self.root.as_ref().map_or(0, Node::size)
    }

    fn grow(&self, examples: &[&LabeledVector]) -> Node {
        let distribution = class_distribution(examples);
        let n = examples.len();
        let min_leaf = self.options.min_leaf.max(1);

        if n < 2 * min_leaf || distribution.iter().any(|&c| c == n) {
            return Node::leaf(distribution);
        }

        let Some(best) = self.select_split(examples, &distribution) else {
            return Node::leaf(distribution);
        };

        let (left, right): (Vec<&LabeledVector>, Vec<&LabeledVector>) = examples
            .iter()
            .copied()
            .partition(|e| e.vector.get(best.attribute) <= best.threshold);

        Node::Split {
            attribute: best.attribute,
            threshold: best.threshold,
            distribution,
            left: Box::new(self.grow(&left)),
            right: Box::new(self.grow(&right)),
        }
    }

    fn select_split(
        &self,
        examples: &[&LabeledVector],
        distribution: &Distribution,
    ) -> Option<Candidate> {
        let candidates: Vec<Candidate> = (0..FEATURE_COUNT)
            .filter_map(|attribute| self.best_split_on(examples, distribution, attribute))
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let average_gain =
            candidates.iter().map(|c| c.gain).sum::<f64>() / candidates.len() as f64;

        candidates
            .into_iter()
            .filter(|c| c.gain >= average_gain - 1e-3 && c.gain_ratio > 0.0)
            .fold(None, |best: Option<Candidate>, c| match best {
                Some(b) if b.gain_ratio >= c.gain_ratio => Some(b),
                _ => Some(c),
            })
    }

    /// Best `<=` split on one attribute, if any split is admissible.
    fn best_split_on(
        &self,
        examples: &[&LabeledVector],
        distribution: &Distribution,
        attribute: usize,
    ) -> Option<Candidate> {
        let n = examples.len();
        let min_split = min_split(n, self.options.min_leaf.max(1));
        if (n as f64) < 2.0 * min_split {
            return None;
        }

        let mut sorted: Vec<(f64, BlockClass)> = examples
            .iter()
            .map(|e| (e.vector.get(attribute), e.class))
            .collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let total_info = entropy(distribution);
        let mut left = [0usize; NUM_CLASSES];
        let mut right = *distribution;
        let mut best: Option<(usize, f64)> = None;
        let mut positions = 0usize;

        for i in 0..n - 1 {
            let class = sorted[i].1.index();
            left[class] += 1;
            right[class] -= 1;

            if sorted[i].0 + 1e-5 >= sorted[i + 1].0 {
                continue;
            }
            positions += 1;

            let left_n = i + 1;
            if (left_n as f64) < min_split || ((n - left_n) as f64) < min_split {
                continue;
            }
            let split_info = (left_n as f64 * entropy(&left)
                + (n - left_n) as f64 * entropy(&right))
                / n as f64;
            let gain = total_info - split_info;
            if best.is_none_or(|(_, g)| gain > g) {
                best = Some((i, gain));
            }
        }

        let (index, gain) = best?;
        let gain = gain - (positions as f64).log2() / n as f64;
        if gain <= 0.0 {
            return None;
        }

        let left_n = index + 1;
        let split_entropy = entropy(&[left_n, n - left_n]);
        if split_entropy <= 0.0 {
            return None;
        }

        Some(Candidate {
            attribute,
            threshold: sorted[index].0,
            gain,
            gain_ratio: gain / split_entropy,
        })
    }

    fn write_node(
        f: &mut fmt::Formatter<'_>,
        node: &Node,
        depth: usize,
    ) -> fmt::Result {
        let Node::Split {
            attribute,
            threshold,
            left,
            right,
            ..
        } = node
        else {
            return writeln!(f, ": {}", leaf_label(node));
        };

        for (branch, op) in [(left, "<="), (right, ">")] {
            writeln!(f)?;
            for _ in 0..depth {
                write!(f, "|   ")?;
            }
            write!(f, "{} {} {}", ATTRIBUTE_NAMES[*attribute], op, threshold)?;
            match branch.as_ref() {
                leaf @ Node::Leaf { .. } => write!(f, ": {}", leaf_label(leaf))?,
                split => Self::write_node(f, split, depth + 1)?,
            }
        }
        Ok(())
    }
}

impl Classifier for DecisionTree {
    fn build(&mut self, examples: &[LabeledVector]) -> ClassifyResult<()> {
        if examples.is_empty() {
            return Err(ClassifyError::EmptyDataset);
        }
        let refs: Vec<&LabeledVector> = examples.iter().collect();
        let mut root = self.grow(&refs);
        debug!(
            "grown tree: {} leaves, size {}",
            root.num_leaves(),
            root.size()
        );
        if self.options.pruning {
            prune(&mut root);
        }
        info!(
            "built decision tree from {} examples: {} leaves, size {}",
            examples.len(),
            root.num_leaves(),
            root.size()
        );
        self.root = Some(root);
        Ok(())
    }

    fn classify_one(&self, vector: &FeatureVector) -> ClassifyResult<BlockClass> {
        self.root
            .as_ref()
            .map(|root| root.classify(vector))
            .ok_or(ClassifyError::NotBuilt)
    }
}

/// J48-style listing of the tree.
impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = &self.root else {
            return writeln!(f, "No model built yet.");
        };
        writeln!(f, "decision tree")?;
        write!(f, "------------------")?;
        match root {
            Node::Leaf { .. } => {
                writeln!(f)?;
                writeln!(f, ": {}", leaf_label(root))?;
            }
            split => {
                Self::write_node(f, split, 0)?;
                writeln!(f)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "Number of Leaves  : \t{}", root.num_leaves())?;
        writeln!(f)?;
        writeln!(f, "Size of the tree : \t{}", root.size())
    }
}

fn leaf_label(node: &Node) -> String {
    let Node::Leaf {
        class,
        distribution,
    } = node
    else {
        return String::new();
    };
    let n: usize = distribution.iter().sum();
    let errors = n - distribution[class.index()];
    if errors == 0 {
        format!("{} ({:.1})", class, n as f64)
    } else {
        format!("{} ({:.1}/{:.1})", class, n as f64, errors as f64)
    }
}

fn class_distribution(examples: &[&LabeledVector]) -> Distribution {
    let mut distribution = [0; NUM_CLASSES];
    for e in examples {
        distribution[e.class.index()] += 1;
    }
    distribution
}

/// Most frequent class; ties go to the lower index.
fn majority(distribution: &Distribution) -> BlockClass {
    let mut best = 0;
    for (i, &count) in distribution.iter().enumerate() {
        if count > distribution[best] {
            best = i;
        }
    }
    BlockClass::ALL[best]
}

/// Entropy in bits of a count vector.
fn entropy(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}

fn min_split(n: usize, min_leaf: usize) -> f64 {
    let m = 0.1 * n as f64 / NUM_CLASSES as f64;
    if m <= min_leaf as f64 {
        min_leaf as f64
    } else {
        m.min(MAX_MIN_SPLIT)
    }
}

/// Extra errors predicted for a node of `n` examples with `e` training
/// errors, at the pruning confidence.
fn added_errors(n: f64, e: f64) -> f64 {
    if e < 1.0 {
        let base = n * (1.0 - PRUNING_CONFIDENCE.powf(1.0 / n));
        if e == 0.0 {
            return base;
        }
        return base + e * (added_errors(n, 1.0) - base);
    }
    if e + 0.5 >= n {
        return (n - e).max(0.0);
    }
    let z = PRUNING_Z;
    let f = (e + 0.5) / n;
    let r = (f + z * z / (2.0 * n) + z * (f / n - f * f / n + z * z / (4.0 * n * n)).sqrt())
        / (1.0 + z * z / n);
    r * n - e
}

fn leaf_error_estimate(distribution: &Distribution) -> f64 {
    let n: usize = distribution.iter().sum();
    let e = n - distribution.iter().max().copied().unwrap_or(0);
    e as f64 + added_errors(n as f64, e as f64)
}

fn tree_error_estimate(node: &Node) -> f64 {
    match node {
        Node::Leaf { distribution, .. } => leaf_error_estimate(distribution),
        Node::Split { left, right, .. } => tree_error_estimate(left) + tree_error_estimate(right),
    }
}

/// Bottom-up subtree replacement.
fn prune(node: &mut Node) {
    if let Node::Split { left, right, .. } = node {
        prune(left);
        prune(right);
    } else {
        return;
    }

    let as_leaf = leaf_error_estimate(node.distribution());
    if as_leaf <= tree_error_estimate(node) + 0.1 {
        *node = Node::leaf(*node.distribution());
    }
}
