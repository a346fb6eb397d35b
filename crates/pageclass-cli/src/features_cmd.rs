use std::path::PathBuf;

use pageclass_features::{ATTRIBUTE_NAMES, feature_vector};

use crate::shared::{load_image, report};

pub fn run(images: &[PathBuf]) -> Result<(), i32> {
    println!("{}", ATTRIBUTE_NAMES.join("\t"));
    for path in images {
        let pix = load_image(path)?;
        let vector = feature_vector(&pix).map_err(report("feature extraction failed"))?;
        println!("{vector}");
    }
    Ok(())
}
