use std::path::Path;

use log::info;
use pageclass_classify::{BlockClass, Classifier, Dataset};

use crate::cli::TreeArgs;
use crate::shared::{load_dataset, report, tree_from_args};

/// Train on `train`, test on `test`.
pub fn run(train: &Path, test: &Path, tree_args: &TreeArgs) -> Result<(), i32> {
    let train = load_dataset(train)?;
    let test = load_dataset(test)?;
    evaluate(&train, &test, tree_args)
}

/// Where `evaluate-self` cuts the dataset.
#[derive(Debug, Clone, Copy)]
pub enum Split {
    /// Leading fraction used for training
    Fraction(f64),
    /// Number of leading examples used for training
    Position(usize),
}

/// Train on the leading part of `dataset`, test on the rest.
///
/// Test examples of an excluded class are dropped before evaluating.
pub fn run_self(
    dataset: &Path,
    split: Split,
    exclude: &[String],
    tree_args: &TreeArgs,
) -> Result<(), i32> {
    let excluded = exclude
        .iter()
        .map(|name| name.parse::<BlockClass>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(report("invalid --exclude-class"))?;

    let dataset = load_dataset(dataset)?;
    let (train, mut test) = match split {
        Split::Fraction(fraction) => dataset
            .split(fraction)
            .map_err(report("invalid training fraction"))?,
        Split::Position(position) => dataset
            .split_at(position)
            .map_err(report("invalid split position"))?,
    };
    for class in excluded {
        let removed = test.remove_class(class);
        info!("excluded {} {} examples from the test set", removed, class);
    }
    evaluate(&train, &test, tree_args)
}

fn evaluate(train: &Dataset, test: &Dataset, tree_args: &TreeArgs) -> Result<(), i32> {
    let mut tree = tree_from_args(tree_args);
    let evaluation = tree
        .evaluate(train.examples(), test.examples())
        .map_err(report("evaluation failed"))?;
    if tree_args.show_tree {
        println!("{tree}");
    }
    println!("{evaluation}");
    Ok(())
}
