//! Panel ordering applied before packing.
//!
//! Every strategy puts the hardest-to-place panels first. All sorts are
//! stable, so equal keys keep their input order and ordering twice is a no-op.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OptimizeError;
use crate::types::Panel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    #[default]
    Area,
    Perimeter,
    Width,
    Height,
    /// Squarest first; the only ascending order.
    Aspect,
}

impl SortStrategy {
    pub const ALL: [SortStrategy; 5] = [
        SortStrategy::Area,
        SortStrategy::Perimeter,
        SortStrategy::Width,
        SortStrategy::Height,
        SortStrategy::Aspect,
    ];

    fn compare(self, a: &Panel, b: &Panel) -> Ordering {
        match self {
            SortStrategy::Area => b.area().cmp(&a.area()),
            SortStrategy::Perimeter => {
                (b.width as u64 + b.height as u64).cmp(&(a.width as u64 + a.height as u64))
            }
            SortStrategy::Width => b.width.cmp(&a.width),
            SortStrategy::Height => b.height.cmp(&a.height),
            SortStrategy::Aspect => {
                // max_a / min_a vs max_b / min_b without floats
                let (long_a, short_a) = long_short(a);
                let (long_b, short_b) = long_short(b);
                (long_a * short_b).cmp(&(long_b * short_a))
            }
        }
    }
}

fn long_short(p: &Panel) -> (u64, u64) {
    let long = p.width.max(p.height) as u64;
    let short = p.width.min(p.height) as u64;
    (long, short)
}

impl std::fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SortStrategy::Area => "area",
            SortStrategy::Perimeter => "perimeter",
            SortStrategy::Width => "width",
            SortStrategy::Height => "height",
            SortStrategy::Aspect => "aspect",
        };
        f.write_str(s)
    }
}

impl FromStr for SortStrategy {
    type Err = OptimizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "area" => Ok(SortStrategy::Area),
            "perimeter" => Ok(SortStrategy::Perimeter),
            "width" => Ok(SortStrategy::Width),
            "height" => Ok(SortStrategy::Height),
            "aspect" => Ok(SortStrategy::Aspect),
            _ => Err(OptimizeError::Parse(format!(
                "invalid sort strategy '{s}', expected: area, perimeter, width, height, or aspect"
            ))),
        }
    }
}

/// Returns the panels in packing order for `strategy`.
pub fn order(panels: &[Panel], strategy: SortStrategy) -> Vec<Panel> {
    let mut ordered = panels.to_vec();
    ordered.sort_by(|a, b| strategy.compare(a, b));
    ordered
}
