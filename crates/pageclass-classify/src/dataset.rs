//! Labeled feature datasets
//!
//! Two text formats are understood:
//!
//! - ARFF: an `@relation` line, ten numeric `@attribute`s, a nominal class
//!   attribute with five values and comma-separated `@data` rows. A row's
//!   class is the position of its value in the declared list, so
//!   `{0,1,2,3,4}` and `{1,2,3,4,5}` both decode. Lines starting with `%`
//!   are comments.
//! - The UCI `page-blocks.data` layout: eleven whitespace-separated numbers
//!   per line, the last one the class code.
//!
//! Datasets are always written as ARFF with class codes `1` to `5`.

use crate::class::{BlockClass, NUM_CLASSES};
use crate::error::{ClassifyError, ClassifyResult};
use log::{info, warn};
use pageclass_features::{ATTRIBUTE_NAMES, FEATURE_COUNT, FeatureVector};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Relation name of datasets created from scratch
pub const DEFAULT_RELATION: &str = "page-blocks";

/// A feature vector with its class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledVector {
    pub vector: FeatureVector,
    pub class: BlockClass,
}

impl LabeledVector {
    pub fn new(vector: FeatureVector, class: BlockClass) -> Self {
        Self { vector, class }
    }
}

/// An ordered collection of labeled vectors
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    relation: String,
    examples: Vec<LabeledVector>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new(DEFAULT_RELATION)
    }
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new(relation: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            examples: Vec::new(),
        }
    }

    /// Relation name.
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// All examples, in insertion order.
    pub fn examples(&self) -> &[LabeledVector] {
        &self.examples
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Append one example.
    pub fn add(&mut self, vector: FeatureVector, class: BlockClass) {
        self.examples.push(LabeledVector::new(vector, class));
    }

    /// An empty dataset with the same relation name.
    pub fn structure(&self) -> Self {
        Self::new(self.relation.clone())
    }

    /// Split into training and test sets.
    ///
    /// The first `floor(len * training_fraction)` examples form the
    /// training set and the rest the test set. Order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::InvalidParameter`] unless
    /// `0 <= training_fraction <= 1`.
    pub fn split(&self, training_fraction: f64) -> ClassifyResult<(Dataset, Dataset)> {
        if !(0.0..=1.0).contains(&training_fraction) {
            return Err(ClassifyError::InvalidParameter(format!(
                "training fraction must be in [0, 1], got {}",
                training_fraction
            )));
        }
        let cut = (self.len() as f64 * training_fraction).floor() as usize;
        self.split_at(cut.min(self.len()))
    }

    /// Split before the example at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::InvalidParameter`] if `position > len`.
    pub fn split_at(&self, position: usize) -> ClassifyResult<(Dataset, Dataset)> {
        if position > self.len() {
            return Err(ClassifyError::InvalidParameter(format!(
                "split position {} is past the {} examples",
                position,
                self.len()
            )));
        }
        let (train, test) = self.examples.split_at(position);
        Ok((
            Dataset {
                relation: self.relation.clone(),
                examples: train.to_vec(),
            },
            Dataset {
                relation: self.relation.clone(),
                examples: test.to_vec(),
            },
        ))
    }

    /// Drop every example of `class`, returning how many were removed.
    pub fn remove_class(&mut self, class: BlockClass) -> usize {
        let before = self.len();
        self.examples.retain(|e| e.class != class);
        before - self.len()
    }

    /// Number of examples of each class, by class index.
    pub fn class_counts(&self) -> [usize; NUM_CLASSES] {
        let mut counts = [0; NUM_CLASSES];
        for example in &self.examples {
            counts[example.class.index()] += 1;
        }
        counts
    }

    /// Read a dataset file, ARFF or UCI layout.
    pub fn read<P: AsRef<Path>>(path: P) -> ClassifyResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let dataset = Self::parse(&text)?;
        info!("read {} examples from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Parse dataset text, detecting the layout from the first line that
    /// is neither blank nor a comment.
    pub fn parse(text: &str) -> ClassifyResult<Self> {
        let is_arff = text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('%'))
            .is_some_and(|line| line.starts_with('@'));
        if is_arff {
            Self::from_arff_str(text)
        } else {
            Self::from_uci_str(text)
        }
    }

    /// Parse ARFF text.
    pub fn from_arff_str(text: &str) -> ClassifyResult<Self> {
        let mut relation = DEFAULT_RELATION.to_string();
        let mut attributes: Vec<(String, String)> = Vec::new();
        let mut examples = Vec::new();
        let mut class_values = Vec::new();
        let mut in_data = false;

        for (i, raw) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('%') {
                continue;
            }

            if !in_data {
                let (keyword, rest) = split_keyword(line);
                match keyword.to_ascii_lowercase().as_str() {
                    "@relation" => relation = unquote(rest).to_string(),
                    "@attribute" => {
                        let (name, kind) = split_attribute(rest).ok_or_else(|| {
                            ClassifyError::Parse {
                                line: line_no,
                                message: format!("malformed attribute: {}", rest),
                            }
                        })?;
                        attributes.push((name.to_string(), kind.to_string()));
                    }
                    "@data" => {
                        class_values = check_attributes(&attributes, line_no)?;
                        in_data = true;
                    }
                    _ => {
                        return Err(ClassifyError::Parse {
                            line: line_no,
                            message: format!("unexpected header line: {}", line),
                        });
                    }
                }
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let decode = |value: &str| {
                let value = unquote(value);
                class_values
                    .iter()
                    .position(|declared| declared == value)
                    .and_then(BlockClass::from_index)
            };
            if let Some(example) = parse_row(&fields, line_no, decode)? {
                examples.push(example);
            }
        }

        if !in_data {
            return Err(ClassifyError::Parse {
                line: text.lines().count(),
                message: "missing @data section".to_string(),
            });
        }
        Ok(Self { relation, examples })
    }

    /// Parse the whitespace-separated UCI layout.
    pub fn from_uci_str(text: &str) -> ClassifyResult<Self> {
        let mut examples = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('%') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if let Some(example) = parse_row(&fields, i + 1, |v| v.parse().ok())? {
                examples.push(example);
            }
        }
        Ok(Self {
            relation: DEFAULT_RELATION.to_string(),
            examples,
        })
    }

    /// Render as ARFF.
    pub fn to_arff_string(&self) -> String {
        self.to_string()
    }

    /// Write as ARFF to any writer.
    pub fn write_arff<W: Write>(&self, mut writer: W) -> ClassifyResult<()> {
        writer.write_all(self.to_arff_string().as_bytes())?;
        Ok(())
    }

    /// Write as ARFF to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ClassifyResult<()> {
        let path = path.as_ref();
        let file = fs::File::create(path)?;
        self.write_arff(std::io::BufWriter::new(file))?;
        info!("wrote {} examples to {}", self.len(), path.display());
        Ok(())
    }
}

/// ARFF rendering with class codes `1` to `5`.
impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@relation {}", quote_if_needed(&self.relation))?;
        writeln!(f)?;
        for name in ATTRIBUTE_NAMES {
            writeln!(f, "@attribute {} numeric", name)?;
        }
        let codes: Vec<String> = BlockClass::ALL
            .iter()
            .map(|c| c.code().to_string())
            .collect();
        writeln!(f, "@attribute class {{{}}}", codes.join(","))?;
        writeln!(f)?;
        writeln!(f, "@data")?;
        for example in &self.examples {
            for value in example.vector.to_array() {
                write!(f, "{},", value)?;
            }
            writeln!(f, "{}", example.class.code())?;
        }
        Ok(())
    }
}

impl Extend<LabeledVector> for Dataset {
    fn extend<T: IntoIterator<Item = LabeledVector>>(&mut self, iter: T) {
        self.examples.extend(iter);
    }
}

fn split_keyword(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(pos) => (&line[..pos], line[pos..].trim()),
        None => (line, ""),
    }
}

/// Split `name type`, where the name may be quoted.
fn split_attribute(rest: &str) -> Option<(&str, &str)> {
    let rest = rest.trim();
    let quote = rest.chars().next().filter(|c| *c == '\'' || *c == '"');
    match quote {
        Some(q) => {
            let end = rest[1..].find(q)? + 1;
            Some((&rest[1..end], rest[end + 1..].trim()))
        }
        None => {
            let (name, kind) = split_keyword(rest);
            (!kind.is_empty()).then_some((name, kind))
        }
    }
}

/// Validate the header and return the declared class values in order.
fn check_attributes(
    attributes: &[(String, String)],
    line: usize,
) -> ClassifyResult<Vec<String>> {
    if attributes.len() != FEATURE_COUNT + 1 {
        return Err(ClassifyError::Parse {
            line,
            message: format!(
                "expected {} attributes, found {}",
                FEATURE_COUNT + 1,
                attributes.len()
            ),
        });
    }
    for (name, kind) in &attributes[..FEATURE_COUNT] {
        let kind = kind.to_ascii_lowercase();
        if !matches!(kind.as_str(), "numeric" | "real" | "integer") {
            return Err(ClassifyError::Parse {
                line,
                message: format!("attribute {} is not numeric", name),
            });
        }
    }
    let (name, kind) = &attributes[FEATURE_COUNT];
    let Some(values) = kind
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    else {
        return Err(ClassifyError::Parse {
            line,
            message: format!("class attribute {} is not nominal", name),
        });
    };
    let values: Vec<String> = values
        .split(',')
        .map(|v| unquote(v).to_string())
        .collect();
    let distinct = values
        .iter()
        .enumerate()
        .all(|(i, v)| !v.is_empty() && !values[..i].contains(v));
    if values.len() != NUM_CLASSES || !distinct {
        return Err(ClassifyError::Parse {
            line,
            message: format!(
                "class attribute {} must declare {} distinct values, found {{{}}}",
                name,
                NUM_CLASSES,
                values.join(",")
            ),
        });
    }
    Ok(values)
}

/// Parse one data row; rows with missing values (`?`) are skipped.
fn parse_row<F>(
    fields: &[&str],
    line: usize,
    decode_class: F,
) -> ClassifyResult<Option<LabeledVector>>
where
    F: Fn(&str) -> Option<BlockClass>,
{
    if fields.len() != FEATURE_COUNT + 1 {
        return Err(ClassifyError::Parse {
            line,
            message: format!("expected {} values, found {}", FEATURE_COUNT + 1, fields.len()),
        });
    }
    if fields.contains(&"?") {
        warn!("skipping row with missing values at line {}", line);
        return Ok(None);
    }

    let mut values = [0.0; FEATURE_COUNT];
    for (value, field) in values.iter_mut().zip(fields) {
        *value = field.parse().map_err(|_| ClassifyError::Parse {
            line,
            message: format!("not a number: {}", field),
        })?;
    }
    let class = decode_class(fields[FEATURE_COUNT]).ok_or_else(|| ClassifyError::Parse {
        line,
        message: format!("unknown class: {}", fields[FEATURE_COUNT]),
    })?;
    Ok(Some(LabeledVector::new(FeatureVector::from_array(values), class)))
}

fn unquote(s: &str) -> &str {
    let s = s.trim();
    for q in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

fn quote_if_needed(s: &str) -> String {
    if s.is_empty() || s.contains(char::is_whitespace) || s.contains(',') {
        format!("'{}'", s)
    } else {
        s.to_string()
    }
}
