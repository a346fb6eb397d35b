use std::path::Path;

use log::info;
use pageclass_classify::{Classifier, classify_image};

use crate::cli::TreeArgs;
use crate::shared::{load_dataset, load_image, report, tree_from_args};

pub fn run(dataset: &Path, image: &Path, tree_args: &TreeArgs) -> Result<(), i32> {
    let dataset = load_dataset(dataset)?;
    let mut tree = tree_from_args(tree_args);
    tree.build(dataset.examples())
        .map_err(report("failed to build classifier"))?;
    if tree_args.show_tree {
        eprintln!("{tree}");
    }

    let pix = load_image(image)?;
    let class = classify_image(&tree, &pix).map_err(report("failed to classify image"))?;
    info!("{} -> {}", image.display(), class);
    println!("{class}");
    Ok(())
}
