//! Integration tests for `generate`, `classify`, `evaluate` and
//! `evaluate-self`.

use assert_cmd::Command;
use pageclass_core::{ImageFormat, InitColor, Pix, PixelFormat, color};
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn cmd() -> Command {
    Command::cargo_bin("pageclass").unwrap()
}

fn solid(width: u32, height: u32) -> Pix {
    Pix::new_with_init(width, height, PixelFormat::Rgb, InitColor::Black).unwrap()
}

fn text_block(width: u32, lines: u32) -> Pix {
    let height = lines * 5;
    let data = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| {
            let black = y % 5 < 3 && x % 4 != 3 && x % 13 < 10 && (x + y) % 3 != 0;
            if black { color::BLACK } else { color::WHITE }
        })
        .collect();
    Pix::from_data(width, height, PixelFormat::Rgb, data).unwrap()
}

fn save(pix: &Pix, path: &Path) {
    pageclass_io::write_image(pix, path, ImageFormat::Png).unwrap();
}

/// `root/{text,horizontal-line,vertical_line}/*.png` plus a stray file.
fn labeled_tree(root: &Path) {
    let text = root.join("text");
    let hline = root.join("horizontal-line");
    let vline = root.join("vertical_line");
    for dir in [&text, &hline, &vline] {
        fs::create_dir_all(dir).unwrap();
    }
    for i in 0..4u32 {
        save(&text_block(30 + 6 * i, 2 + i % 2), &text.join(format!("t{i}.png")));
        save(&solid(40 + 10 * i, 2 + i % 2), &hline.join(format!("h{i}.png")));
        save(&solid(2 + i % 2, 40 + 10 * i), &vline.join(format!("v{i}.png")));
    }
    fs::write(text.join("notes.txt"), "not an image").unwrap();
    fs::write(root.join("README"), "unlabeled").unwrap();
}

#[test]
fn generate_from_class_directories() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    labeled_tree(&images);
    let dataset = dir.path().join("blocks.arff");

    cmd()
        .arg("generate")
        .arg(&dataset)
        .arg(&images)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 12 examples"));

    let text = fs::read_to_string(&dataset).unwrap();
    assert!(text.starts_with("@relation page-blocks"));
    assert!(text.contains("@attribute class {1,2,3,4,5}"));
    let rows: Vec<&str> = text
        .lines()
        .skip_while(|l| *l != "@data")
        .skip(1)
        .collect();
    assert_eq!(rows.len(), 12);
    // Directories are visited in name order
    assert!(rows[0].ends_with(",2"));
    assert!(rows[4].ends_with(",1"));
    assert!(rows[8].ends_with(",4"));
}

#[test]
fn generate_with_class_and_append() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    labeled_tree(&images);
    let dataset = dir.path().join("blocks.arff");

    cmd()
        .arg("generate")
        .arg(&dataset)
        .arg(images.join("text"))
        .args(["--class", "picture"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 4 examples"));

    cmd()
        .arg("generate")
        .arg(&dataset)
        .arg(images.join("horizontal-line"))
        .args(["--class", "2", "--append"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 8 examples (4 new)"));
}

#[test]
fn generate_reads_jpeg_and_skips_undecodable() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir_all(&images).unwrap();
    save(&text_block(32, 2), &images.join("a.png"));
    pageclass_io::write_image(&solid(16, 8), images.join("b.jpg"), ImageFormat::Jpeg).unwrap();
    fs::write(images.join("c.tif"), b"II\x2a\x00\x08\x00\x00\x00").unwrap();
    let dataset = dir.path().join("o.arff");

    cmd()
        .arg("generate")
        .arg(&dataset)
        .arg(&images)
        .args(["--class", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 2 examples"))
        .stderr(predicate::str::contains("skipping unsupported file"))
        .stderr(predicate::str::contains("c.tif"));

    let back = pageclass_classify::Dataset::read(&dataset).unwrap();
    assert_eq!(back.len(), 2);
    // The JPEG block: 8 rows of 16 solid pixels
    let jpeg_row = back.examples()[1].vector;
    assert_eq!((jpeg_row.height, jpeg_row.width), (8.0, 16.0));
    assert_eq!(jpeg_row.black_count, 128.0);
}

#[test]
fn generate_rejects_unknown_class() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    labeled_tree(&images);

    cmd()
        .arg("generate")
        .arg(dir.path().join("out.arff"))
        .arg(&images)
        .args(["--class", "table"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown class"));
}

#[test]
fn classify_and_evaluate() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    labeled_tree(&images);
    let dataset = dir.path().join("blocks.arff");
    cmd()
        .arg("generate")
        .arg(&dataset)
        .arg(&images)
        .assert()
        .success();

    let rule = dir.path().join("rule.png");
    save(&solid(55, 2), &rule);
    cmd()
        .arg("classify")
        .arg(&dataset)
        .arg(&rule)
        .assert()
        .success()
        .stdout("horizontal line\n");

    cmd()
        .arg("evaluate")
        .arg(&dataset)
        .arg(&dataset)
        .arg("--show-tree")
        .assert()
        .success()
        .stdout(predicate::str::contains("Number of Leaves"))
        .stdout(predicate::str::contains("Correctly Classified Instances"))
        .stdout(predicate::str::is_match(r"Total Number of Instances\s+12\n").unwrap());

    cmd()
        .arg("evaluate-self")
        .arg(&dataset)
        .args(["--training-fraction", "0.75"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Total Number of Instances\s+3\n").unwrap());
}

#[test]
fn evaluate_self_split_position_and_excluded_class() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    labeled_tree(&images);
    let dataset = dir.path().join("blocks.arff");
    cmd()
        .arg("generate")
        .arg(&dataset)
        .arg(&images)
        .assert()
        .success();

    // Rows 6..12 are two text blocks and four vertical lines
    cmd()
        .arg("evaluate-self")
        .arg(&dataset)
        .args(["--split-position", "6"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Total Number of Instances\s+6\n").unwrap());

    cmd()
        .arg("evaluate-self")
        .arg(&dataset)
        .args(["--split-position", "6", "--exclude-class", "text"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Total Number of Instances\s+4\n").unwrap());

    cmd()
        .arg("evaluate-self")
        .arg(&dataset)
        .args(["--split-position", "13"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("split position"));

    cmd()
        .arg("evaluate-self")
        .arg(&dataset)
        .args(["--exclude-class", "table"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown class"));
}

#[test]
fn evaluate_self_rejects_bad_fraction() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = dir.path().join("tiny.data");
    fs::write(&dataset, "5 7 35 1.4 .4 .657 2.33 14 23 6 1\n").unwrap();

    cmd()
        .arg("evaluate-self")
        .arg(&dataset)
        .args(["--training-fraction", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("training fraction"));
}

#[test]
fn classify_missing_dataset() {
    cmd()
        .args(["classify", "missing.arff", "block.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}
