//! Block classes

use crate::error::ClassifyError;
use std::fmt;
use std::str::FromStr;

/// Number of block classes
pub const NUM_CLASSES: usize = 5;

/// Kind of content in a page block
///
/// The discriminants are the class indices used throughout the crate. In
/// data files each class is written as its 1-based code (`index + 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockClass {
    Text = 0,
    HorizontalLine = 1,
    Picture = 2,
    VerticalLine = 3,
    Graphic = 4,
}

impl BlockClass {
    /// All classes in index order
    pub const ALL: [BlockClass; NUM_CLASSES] = [
        BlockClass::Text,
        BlockClass::HorizontalLine,
        BlockClass::Picture,
        BlockClass::VerticalLine,
        BlockClass::Graphic,
    ];

    /// Class index in `0..NUM_CLASSES`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Class with the given index, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// 1-based code used in data files.
    pub fn code(self) -> u32 {
        self as u32 + 1
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            BlockClass::Text => "text",
            BlockClass::HorizontalLine => "horizontal line",
            BlockClass::Picture => "picture",
            BlockClass::VerticalLine => "vertical line",
            BlockClass::Graphic => "graphic",
        }
    }
}

impl fmt::Display for BlockClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a class name (case-insensitive, `-` or `_` in place of the
/// space) or a 1-based class code.
impl FromStr for BlockClass {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<usize>() {
            return code
                .checked_sub(1)
                .and_then(Self::from_index)
                .ok_or_else(|| ClassifyError::UnknownClass(s.to_string()));
        }

        let normalized = trimmed.to_ascii_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|class| class.name() == normalized)
            .ok_or_else(|| ClassifyError::UnknownClass(s.to_string()))
    }
}
