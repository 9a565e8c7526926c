//! Typed partitions and flip selections.
//!
//! Free-text vertex lists are parsed here, once, with a lenient policy:
//! tokens are split on `,` and each token contributes the leading run of
//! digits after optional whitespace and sign (`"3abc"` reads as 3, `"2.5"`
//! as 2, `"+3"` as 3, `"-0"` as 0). Tokens without leading digits (`"abc"`,
//! `""`) and negative ids (`"-1"`) are dropped instead of rejecting the list.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Number of partitions a player works with.
pub const PARTITION_COUNT: usize = 3;

/// Index of one of the three partitions (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PartitionIndex(usize);

impl PartitionIndex {
    pub fn new(index: usize) -> Option<Self> {
        (index < PARTITION_COUNT).then_some(Self(index))
    }

    /// Parse the 1-based label shown to players (`"1"` .. `"3"`).
    pub fn from_label(label: &str) -> Option<Self> {
        let number: usize = label.trim().parse().ok()?;
        number.checked_sub(1).and_then(Self::new)
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn label(self) -> usize {
        self.0 + 1
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..PARTITION_COUNT).map(Self)
    }
}

impl TryFrom<usize> for PartitionIndex {
    type Error = String;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index)
            .ok_or_else(|| format!("partition index {index} out of range 0..{PARTITION_COUNT}"))
    }
}

impl From<PartitionIndex> for usize {
    fn from(index: PartitionIndex) -> Self {
        index.0
    }
}

impl std::fmt::Display for PartitionIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "partition {}", self.label())
    }
}

/// Which pairs a flip touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipSelection {
    /// Pairs across two partitions. Both sides must differ.
    Between(PartitionIndex, PartitionIndex),
    /// Pairs inside a single partition.
    Within(PartitionIndex),
}

/// The three user-supplied vertex groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partitions {
    groups: [Vec<usize>; PARTITION_COUNT],
}

impl Partitions {
    pub fn new(groups: [Vec<usize>; PARTITION_COUNT]) -> Self {
        Self { groups }
    }

    /// Parse three free-text lists with [`parse_vertex_list`].
    pub fn parse<S: AsRef<str>>(texts: &[S; PARTITION_COUNT]) -> Self {
        Self {
            groups: std::array::from_fn(|i| parse_vertex_list(texts[i].as_ref())),
        }
    }

    pub fn group(&self, index: PartitionIndex) -> &[usize] {
        &self.groups[index.0]
    }

    pub fn set_group(&mut self, index: PartitionIndex, group: Vec<usize>) {
        self.groups[index.0] = group;
    }

    pub fn groups(&self) -> &[Vec<usize>; PARTITION_COUNT] {
        &self.groups
    }
}

/// Parse a comma-separated vertex list, silently dropping unreadable tokens.
pub fn parse_vertex_list(text: &str) -> Vec<usize> {
    text.split(',').filter_map(parse_vertex_token).collect()
}

fn parse_vertex_token(token: &str) -> Option<usize> {
    static LEADING_DIGITS: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\s*([+-]?)(\d+)").unwrap());
    let caps = LEADING_DIGITS.captures(token)?;
    let value: usize = caps.get(2)?.as_str().parse().ok()?;
    let negative = caps.get(1).is_some_and(|sign| sign.as_str() == "-");
    (!negative || value == 0).then_some(value)
}
