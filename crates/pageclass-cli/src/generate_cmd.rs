use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use pageclass_classify::{BlockClass, Dataset};
use pageclass_features::feature_vector;

use crate::shared::{format_from_path, load_dataset, load_image, report};

pub fn run(
    output: &Path,
    image_dir: &Path,
    class: Option<&str>,
    append: bool,
) -> Result<(), i32> {
    if !image_dir.is_dir() {
        eprintln!("Error: not a directory: {}", image_dir.display());
        return Err(1);
    }

    let mut dataset = if append && output.exists() {
        load_dataset(output)?
    } else {
        Dataset::default()
    };
    let before = dataset.len();

    let labeled: Vec<(PathBuf, BlockClass)> = match class {
        Some(name) => {
            let class: BlockClass = name.parse().map_err(report("invalid --class"))?;
            image_files(image_dir)?
                .into_iter()
                .map(|path| (path, class))
                .collect()
        }
        None => images_by_class_directory(image_dir)?,
    };

    for (path, class) in labeled {
        let pix = load_image(&path)?;
        let vector = feature_vector(&pix).map_err(report("feature extraction failed"))?;
        info!("{}: {}", path.display(), class);
        dataset.add(vector, class);
    }

    dataset
        .save(output)
        .map_err(report("failed to write dataset"))?;
    println!(
        "wrote {} examples ({} new) to {}",
        dataset.len(),
        dataset.len() - before,
        output.display()
    );
    Ok(())
}

/// Readable image files directly inside `dir`, sorted by name.
///
/// Subdirectories are ignored. Files whose extension names no format
/// this build can decode are skipped with a warning.
fn image_files(dir: &Path) -> Result<Vec<PathBuf>, i32> {
    let mut files = Vec::new();
    for path in sorted_entries(dir)? {
        if path.is_dir() {
            continue;
        }
        if !pageclass_io::can_read(format_from_path(&path)) {
            warn!("skipping unsupported file {}", path.display());
            continue;
        }
        files.push(path);
    }
    Ok(files)
}

/// Images of every subdirectory of `dir` whose name is a class.
fn images_by_class_directory(dir: &Path) -> Result<Vec<(PathBuf, BlockClass)>, i32> {
    let mut labeled = Vec::new();
    for path in sorted_entries(dir)? {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !path.is_dir() {
            warn!("skipping {}: no class directory", path.display());
            continue;
        }
        match name.parse::<BlockClass>() {
            Ok(class) => {
                for file in image_files(&path)? {
                    labeled.push((file, class));
                }
            }
            Err(_) => warn!("skipping directory {}: not a class name", path.display()),
        }
    }
    if labeled.is_empty() {
        warn!("no labeled images found under {}", dir.display());
    }
    Ok(labeled)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, i32> {
    let entries = fs::read_dir(dir).map_err(report("failed to list directory"))?;
    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(report("failed to list directory"))?;
    paths.sort();
    Ok(paths)
}
