use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{OptimizeError, Result};
use crate::sort::SortStrategy;
use crate::solver::Variant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub w: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub h: u32,
}

impl Rect {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    pub fn rotated(&self) -> Self {
        Self {
            w: self.h,
            h: self.w,
        }
    }

    pub fn fits_in(&self, other: &Rect) -> bool {
        self.w <= other.w && self.h <= other.h
    }

    pub fn is_square(&self) -> bool {
        self.w == self.h
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

impl FromStr for Rect {
    type Err = OptimizeError;

    /// Parses `WxH`, e.g. `2800x2070`.
    fn from_str(s: &str) -> Result<Self> {
        let (w, h) = s
            .split_once('x')
            .ok_or_else(|| OptimizeError::Parse(format!("invalid dimensions '{s}', expected WxH")))?;
        let w = w
            .trim()
            .parse::<u32>()
            .map_err(|_| OptimizeError::Parse(format!("invalid width in '{s}'")))?;
        let h = h
            .trim()
            .parse::<u32>()
            .map_err(|_| OptimizeError::Parse(format!("invalid height in '{s}'")))?;
        Ok(Rect::new(w, h))
    }
}

/// Accepts JSON integers as well as integral floats (`600.0`), which
/// spreadsheet exports tend to produce.
pub fn deserialize_u32_from_number<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).map_err(serde::de::Error::custom);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 => Ok(f as u32),
        _ => Err(serde::de::Error::custom(format!(
            "expected a non-negative integer, got {value}"
        ))),
    }
}

/// One rectangular piece waiting to be cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    /// Caller label, copied onto the placement.
    pub id: usize,
    pub width: u32,
    pub height: u32,
    /// False when the material grain forbids turning the piece.
    pub rotatable: bool,
    /// True while `width`/`height` are swapped relative to the request.
    pub rotated: bool,
}

impl Panel {
    pub fn new(width: u32, height: u32, rotatable: bool) -> Self {
        Self {
            id: 0,
            width,
            height,
            rotatable,
            rotated: false,
        }
    }

    pub fn with_id(mut self, id: usize) -> Self {
        self.id = id;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.width, self.height)
    }

    pub fn area(&self) -> u64 {
        self.rect().area()
    }

    /// The panel in its requested orientation.
    pub fn original(mut self) -> Self {
        if self.rotated {
            std::mem::swap(&mut self.width, &mut self.height);
            self.rotated = false;
        }
        self
    }

    /// Fixes the orientation so the packer will not reconsider it.
    pub fn locked(self, rotated: bool) -> Self {
        let mut panel = self.original();
        if rotated {
            std::mem::swap(&mut panel.width, &mut panel.height);
            panel.rotated = true;
        }
        panel.rotatable = false;
        panel
    }

    /// Whether any permitted orientation fits inside `board`.
    pub fn fits_board(&self, board: &Rect) -> bool {
        self.rect().fits_in(board) || (self.rotatable && self.rect().rotated().fits_in(board))
    }
}

/// Grain direction of a requested piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grain {
    #[default]
    None,
    Length,
    Width,
}

impl FromStr for Grain {
    type Err = OptimizeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" | "" => Ok(Grain::None),
            "length" => Ok(Grain::Length),
            "width" => Ok(Grain::Width),
            _ => Err(OptimizeError::Parse(format!(
                "invalid grain '{s}', expected: none, length, or width"
            ))),
        }
    }
}

/// A quote line: `qty` copies of one panel design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demand {
    #[serde(default)]
    pub id: usize,
    pub rect: Rect,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub qty: u32,
    #[serde(default)]
    pub grain: Grain,
}

impl Demand {
    pub fn new(rect: Rect, qty: u32, grain: Grain) -> Self {
        Self {
            id: 0,
            rect,
            qty,
            grain,
        }
    }

    pub fn expand(&self) -> impl Iterator<Item = Panel> + '_ {
        let rotatable = self.grain == Grain::None;
        (0..self.qty).map(move |_| Panel::new(self.rect.w, self.rect.h, rotatable).with_id(self.id))
    }
}

pub fn expand_demands(demands: &[Demand]) -> Vec<Panel> {
    demands.iter().flat_map(Demand::expand).collect()
}

/// Usable board dimensions plus the blade thickness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSpec {
    pub width: u32,
    pub height: u32,
    pub kerf: u32,
}

impl BoardSpec {
    pub fn new(width: u32, height: u32, kerf: u32) -> Self {
        Self {
            width,
            height,
            kerf,
        }
    }

    /// Raw stock minus a trim margin on every edge.
    pub fn from_stock(stock: Rect, trim: u32, kerf: u32) -> Self {
        Self::new(
            stock.w.saturating_sub(trim.saturating_mul(2)),
            stock.h.saturating_sub(trim.saturating_mul(2)),
            kerf,
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.width, self.height)
    }

    pub fn area(&self) -> u64 {
        self.rect().area()
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.kerf >= self.width || self.kerf >= self.height
        {
            return Err(OptimizeError::InvalidBoard {
                width: self.width,
                height: self.height,
                kerf: self.kerf,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Placement {
    pub id: usize,
    pub rect: Rect,
    pub x: u32,
    pub y: u32,
    pub rotated: bool,
}

impl Placement {
    pub fn overlaps(&self, other: &Placement) -> bool {
        self.x < other.x + other.rect.w
            && other.x < self.x + self.rect.w
            && self.y < other.y + other.rect.h
            && other.y < self.y + self.rect.h
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardLayout {
    pub placements: Vec<Placement>,
    pub used_area: u64,
    pub waste_area: u64,
    pub utilization: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub boards: Vec<BoardLayout>,
    pub spec: BoardSpec,
    pub variant: Variant,
    pub sort: SortStrategy,
}

impl Solution {
    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    pub fn panel_count(&self) -> usize {
        self.boards.iter().map(|b| b.placements.len()).sum()
    }

    pub fn total_waste_area(&self) -> u64 {
        self.boards.iter().map(|b| b.waste_area).sum()
    }

    pub fn total_waste_percent(&self) -> f64 {
        let total_stock_area = self.spec.area() * self.boards.len() as u64;
        if total_stock_area == 0 {
            return 0.0;
        }
        self.total_waste_area() as f64 / total_stock_area as f64 * 100.0
    }

    pub fn utilization(&self) -> f64 {
        let total_stock_area = self.spec.area() * self.boards.len() as u64;
        if total_stock_area == 0 {
            return 0.0;
        }
        let used: u64 = self.boards.iter().map(|b| b.used_area).sum();
        used as f64 / total_stock_area as f64
    }
}
