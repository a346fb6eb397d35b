//! Classifier evaluation

use crate::class::{BlockClass, NUM_CLASSES};
use std::fmt;

/// Accumulated results of classifying a test set
///
/// `confusion[actual][predicted]` counts test examples of class `actual`
/// that were classified as `predicted`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    confusion: [[u64; NUM_CLASSES]; NUM_CLASSES],
}

impl Evaluation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classified example.
    pub fn record(&mut self, actual: BlockClass, predicted: BlockClass) {
        self.confusion[actual.index()][predicted.index()] += 1;
    }

    /// Confusion matrix, rows by actual class and columns by prediction.
    pub fn confusion_matrix(&self) -> &[[u64; NUM_CLASSES]; NUM_CLASSES] {
        &self.confusion
    }

    /// Number of recorded examples.
    pub fn total(&self) -> u64 {
        self.confusion.iter().flatten().sum()
    }

    /// Number of correctly classified examples.
    pub fn correct(&self) -> u64 {
        (0..NUM_CLASSES).map(|i| self.confusion[i][i]).sum()
    }

    /// Number of misclassified examples.
    pub fn incorrect(&self) -> u64 {
        self.total() - self.correct()
    }

    /// Percentage of correctly classified examples (0 when empty).
    pub fn pct_correct(&self) -> f64 {
        self.percent(self.correct())
    }

    /// Percentage of misclassified examples (0 when empty).
    pub fn pct_incorrect(&self) -> f64 {
        self.percent(self.incorrect())
    }

    fn percent(&self, count: u64) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            100.0 * count as f64 / total as f64
        }
    }

    /// Cohen's kappa: agreement between predictions and actual classes,
    /// corrected for chance.
    pub fn kappa(&self) -> f64 {
        let total = self.total() as f64;
        if total == 0.0 {
            return 0.0;
        }
        let observed = self.correct() as f64 / total;
        let chance: f64 = (0..NUM_CLASSES)
            .map(|k| {
                let actual: u64 = self.confusion[k].iter().sum();
                let predicted: u64 = self.confusion.iter().map(|row| row[k]).sum();
                actual as f64 * predicted as f64
            })
            .sum::<f64>()
            / (total * total);

        if chance < 1.0 {
            (observed - chance) / (1.0 - chance)
        } else {
            1.0
        }
    }

    /// Mean absolute error of the one-hot predicted class distribution.
    pub fn mean_absolute_error(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        // A miss is off by one on two of the NUM_CLASSES outputs
        2.0 * self.incorrect() as f64 / (total as f64 * NUM_CLASSES as f64)
    }

    /// Root mean squared error of the one-hot predicted class distribution.
    pub fn root_mean_squared_error(&self) -> f64 {
        self.mean_absolute_error().sqrt()
    }

    /// Render the confusion matrix.
    pub fn matrix_string(&self) -> String {
        let letters = ['a', 'b', 'c', 'd', 'e'];
        let width = self
            .confusion
            .iter()
            .flatten()
            .map(|n| n.to_string().len())
            .max()
            .unwrap_or(1)
            .max(3);

        let mut out = String::from("=== Confusion Matrix ===\n\n");
        for letter in letters {
            out.push_str(&format!(" {:>width$}", letter, width = width));
        }
        out.push_str("   <-- classified as\n");
        for (class, row) in BlockClass::ALL.iter().zip(&self.confusion) {
            for n in row {
                out.push_str(&format!(" {:>width$}", n, width = width));
            }
            out.push_str(&format!(" |   {} = {}\n", letters[class.index()], class));
        }
        out
    }
}

/// Summary report followed by the confusion matrix.
impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Correctly Classified Instances    {:>8}    {:>10.4} %",
            self.correct(),
            self.pct_correct()
        )?;
        writeln!(
            f,
            "Incorrectly Classified Instances  {:>8}    {:>10.4} %",
            self.incorrect(),
            self.pct_incorrect()
        )?;
        writeln!(f, "Kappa statistic                   {:>12.4}", self.kappa())?;
        writeln!(
            f,
            "Mean absolute error               {:>12.4}",
            self.mean_absolute_error()
        )?;
        writeln!(
            f,
            "Root mean squared error           {:>12.4}",
            self.root_mean_squared_error()
        )?;
        writeln!(f, "Total Number of Instances         {:>8}", self.total())?;
        writeln!(f)?;
        write!(f, "{}", self.matrix_string())
    }
}
