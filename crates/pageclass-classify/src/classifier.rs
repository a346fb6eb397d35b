//! The classifier abstraction
//!
//! Anything that can learn from labeled vectors and then label new ones
//! implements [`Classifier`]. The rest of the crate, and the command line
//! tool, only talk to this trait.

use crate::class::BlockClass;
use crate::dataset::LabeledVector;
use crate::error::ClassifyResult;
use crate::evaluation::Evaluation;
use log::debug;
use pageclass_core::Pix;
use pageclass_features::{FeatureVector, feature_vector};

/// A trainable block classifier
pub trait Classifier {
    /// Train on labeled examples, replacing any previous model.
    fn build(&mut self, examples: &[LabeledVector]) -> ClassifyResult<()>;

    /// Predict the class of one feature vector.
    fn classify_one(&self, vector: &FeatureVector) -> ClassifyResult<BlockClass>;

    /// Train on `train`, then classify every example of `test`.
    fn evaluate(
        &mut self,
        train: &[LabeledVector],
        test: &[LabeledVector],
    ) -> ClassifyResult<Evaluation> {
        self.build(train)?;
        self.test(test)
    }

    /// Classify every example of `test` with the current model.
    fn test(&self, test: &[LabeledVector]) -> ClassifyResult<Evaluation> {
        let mut evaluation = Evaluation::new();
        for example in test {
            evaluation.record(example.class, self.classify_one(&example.vector)?);
        }
        Ok(evaluation)
    }
}

/// Extract the features of a block and classify them.
pub fn classify_image<C: Classifier + ?Sized>(
    classifier: &C,
    pix: &Pix,
) -> ClassifyResult<BlockClass> {
    let vector = feature_vector(pix)?;
    let class = classifier.classify_one(&vector)?;
    debug!("{}x{} block classified as {}", pix.width(), pix.height(), class);
    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageclass_core::{InitColor, PixelFormat};
    use std::cell::RefCell;

    /// Answers by aspect ratio and remembers what it was asked
    #[derive(Default)]
    struct MockClassifier {
        built_with: usize,
        seen: RefCell<Vec<FeatureVector>>,
    }

    impl Classifier for MockClassifier {
        fn build(&mut self, examples: &[LabeledVector]) -> ClassifyResult<()> {
            self.built_with = examples.len();
            Ok(())
        }

        fn classify_one(&self, vector: &FeatureVector) -> ClassifyResult<BlockClass> {
            self.seen.borrow_mut().push(*vector);
            Ok(if vector.eccentricity > 5.0 {
                BlockClass::HorizontalLine
            } else if vector.eccentricity < 0.2 {
                BlockClass::VerticalLine
            } else {
                BlockClass::Text
            })
        }
    }

    #[test]
    fn test_classify_image_uses_features() {
        let mock = MockClassifier::default();
        let rule = Pix::new_with_init(60, 2, PixelFormat::Rgb, InitColor::Black).unwrap();
        assert_eq!(
            classify_image(&mock, &rule).unwrap(),
            BlockClass::HorizontalLine
        );
        let seen = mock.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].width, 60.0);
        assert_eq!(seen[0].black_count, 120.0);
    }

    #[test]
    fn test_classify_image_dyn() {
        let mock = MockClassifier::default();
        let classifier: &dyn Classifier = &mock;
        let column = Pix::new_with_init(2, 40, PixelFormat::Rgb, InitColor::Black).unwrap();
        assert_eq!(
            classify_image(classifier, &column).unwrap(),
            BlockClass::VerticalLine
        );
    }

    #[test]
    fn test_default_evaluate() {
        let mut mock = MockClassifier::default();
        let wide = FeatureVector {
            eccentricity: 10.0,
            ..Default::default()
        };
        let square = FeatureVector {
            eccentricity: 1.0,
            ..Default::default()
        };
        let train = vec![LabeledVector::new(square, BlockClass::Text)];
        let test = vec![
            LabeledVector::new(wide, BlockClass::HorizontalLine),
            LabeledVector::new(square, BlockClass::Picture),
        ];
        let evaluation = mock.evaluate(&train, &test).unwrap();
        assert_eq!(mock.built_with, 1);
        assert_eq!(evaluation.total(), 2);
        assert_eq!(evaluation.correct(), 1);
        assert_eq!(evaluation.confusion_matrix()[2][0], 1);
    }
}
