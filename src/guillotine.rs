use crate::types::{BoardLayout, BoardSpec, Panel, Placement, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeRect {
    pub x: u32,
    pub y: u32,
    pub rect: Rect,
}

impl FreeRect {
    fn area(&self) -> u64 {
        self.rect.area()
    }
}

/// One stock sheet: what has been cut from it and what is still free.
///
/// Every board owns its free list outright, so cloning a board gives an
/// independent copy that can be packed speculatively.
#[derive(Debug, Clone)]
pub struct Board {
    spec: BoardSpec,
    score: ScoreStrategy,
    free_rects: Vec<FreeRect>,
    placements: Vec<Placement>,
    /// Committed panels in requested orientation, parallel to `placements`.
    panels: Vec<Panel>,
    kerf_area: u64,
}

/// How a free rect is chosen among those that can host a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::enum_variant_names)]
pub enum ScoreStrategy {
    #[default]
    BestAreaFit,
    BestShortSideFit,
    BestLongSideFit,
}

#[derive(Debug, Clone, Copy)]
pub struct ScoredPlacement {
    pub free_idx: usize,
    pub rotated: bool,
    pub score: (u64, u64),
}

impl Board {
    pub fn new(spec: BoardSpec) -> Self {
        Self {
            spec,
            score: ScoreStrategy::default(),
            free_rects: vec![FreeRect {
                x: 0,
                y: 0,
                rect: spec.rect(),
            }],
            placements: Vec::new(),
            panels: Vec::new(),
            kerf_area: 0,
        }
    }

    pub fn with_score(mut self, score: ScoreStrategy) -> Self {
        self.score = score;
        self
    }

    pub fn spec(&self) -> BoardSpec {
        self.spec
    }

    pub fn area(&self) -> u64 {
        self.spec.area()
    }

    pub fn used_area(&self) -> u64 {
        self.placements.iter().map(|p| p.rect.area()).sum()
    }

    pub fn free_area(&self) -> u64 {
        self.free_rects.iter().map(FreeRect::area).sum()
    }

    /// Area destroyed by saw cuts, including slivers thinner than the blade.
    pub fn kerf_area(&self) -> u64 {
        self.kerf_area
    }

    pub fn waste_area(&self) -> u64 {
        self.area() - self.used_area()
    }

    pub fn utilization(&self) -> f64 {
        let area = self.area();
        if area == 0 {
            return 0.0;
        }
        self.used_area() as f64 / area as f64
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn find_best(&self, panel: &Panel) -> Option<ScoredPlacement> {
        let piece = panel.rect();
        let try_rotated = panel.rotatable && !piece.is_square();
        let mut best: Option<ScoredPlacement> = None;

        for (idx, free) in self.free_rects.iter().enumerate() {
            let orientations: &[bool] = if try_rotated { &[false, true] } else { &[false] };
            for &rotated in orientations {
                let candidate = if rotated { piece.rotated() } else { piece };
                if !candidate.fits_in(&free.rect) {
                    continue;
                }
                let score = Self::score(candidate, free.rect, self.score);
                if best.is_none_or(|b| score < b.score) {
                    best = Some(ScoredPlacement {
                        free_idx: idx,
                        rotated,
                        score,
                    });
                }
            }
        }

        best
    }

    fn score(piece: Rect, free: Rect, strategy: ScoreStrategy) -> (u64, u64) {
        let dw = (free.w - piece.w) as u64;
        let dh = (free.h - piece.h) as u64;
        match strategy {
            ScoreStrategy::BestAreaFit => (free.area() - piece.area(), dw.min(dh)),
            ScoreStrategy::BestShortSideFit => (dw.min(dh), dw.max(dh)),
            ScoreStrategy::BestLongSideFit => (dw.max(dh), dw.min(dh)),
        }
    }

    pub fn can_accept(&self, panel: &Panel) -> bool {
        self.find_best(panel).is_some()
    }

    /// Places `panel` if some free rect can host it.
    pub fn insert(&mut self, panel: &Panel) -> bool {
        match self.find_best(panel) {
            Some(scored) => {
                self.place(scored, panel);
                true
            }
            None => false,
        }
    }

    /// Free area left over if `panel` were inserted now, or `None` if it
    /// does not fit. The board is not modified.
    pub fn waste_if_inserted(&self, panel: &Panel) -> Option<u64> {
        let scored = self.find_best(panel)?;
        let free = self.free_rects[scored.free_idx];
        let placed = oriented(panel.rect(), scored.rotated);
        let remainders: u64 = split_remainders(free, placed, self.spec.kerf)
            .iter()
            .flatten()
            .map(FreeRect::area)
            .sum();
        Some(self.free_area() - free.area() + remainders)
    }

    pub fn place(&mut self, scored: ScoredPlacement, panel: &Panel) -> Placement {
        let free = self.free_rects[scored.free_idx];
        let placed = oriented(panel.rect(), scored.rotated);

        let placement = Placement {
            id: panel.id,
            rect: placed,
            x: free.x,
            y: free.y,
            rotated: panel.rotated != scored.rotated,
        };
        tracing::trace!(
            panel = %panel.rect(),
            x = placement.x,
            y = placement.y,
            rotated = placement.rotated,
            "placed panel"
        );

        self.free_rects.swap_remove(scored.free_idx);
        let mut remaining = 0;
        for rem in split_remainders(free, placed, self.spec.kerf).into_iter().flatten() {
            remaining += rem.area();
            self.free_rects.push(rem);
        }
        self.kerf_area += free.area() - placed.area() - remaining;
        self.placements.push(placement);
        self.panels.push(panel.original());
        self.merge_free_rects();

        placement
    }

    pub fn free_rects(&self) -> &[FreeRect] {
        &self.free_rects
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Committed panels in their requested orientation.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn into_layout(self) -> BoardLayout {
        let used_area = self.used_area();
        let utilization = self.utilization();
        BoardLayout {
            waste_area: self.area() - used_area,
            used_area,
            utilization,
            placements: self.placements,
        }
    }

    fn merge_free_rects(&mut self) {
        let mut merged = true;
        while merged {
            merged = false;
            'outer: for i in 0..self.free_rects.len() {
                for j in (i + 1)..self.free_rects.len() {
                    if let Some(m) = Self::try_merge(self.free_rects[i], self.free_rects[j]) {
                        self.free_rects[i] = m;
                        self.free_rects.swap_remove(j);
                        merged = true;
                        break 'outer;
                    }
                }
            }
        }
    }

    fn try_merge(a: FreeRect, b: FreeRect) -> Option<FreeRect> {
        // Side by side with the same vertical span
        if a.y == b.y && a.rect.h == b.rect.h {
            if a.x + a.rect.w == b.x {
                return Some(FreeRect {
                    x: a.x,
                    y: a.y,
                    rect: Rect::new(a.rect.w + b.rect.w, a.rect.h),
                });
            }
            if b.x + b.rect.w == a.x {
                return Some(FreeRect {
                    x: b.x,
                    y: b.y,
                    rect: Rect::new(a.rect.w + b.rect.w, a.rect.h),
                });
            }
        }
        // Stacked with the same horizontal span
        if a.x == b.x && a.rect.w == b.rect.w {
            if a.y + a.rect.h == b.y {
                return Some(FreeRect {
                    x: a.x,
                    y: a.y,
                    rect: Rect::new(a.rect.w, a.rect.h + b.rect.h),
                });
            }
            if b.y + b.rect.h == a.y {
                return Some(FreeRect {
                    x: b.x,
                    y: b.y,
                    rect: Rect::new(a.rect.w, a.rect.h + b.rect.h),
                });
            }
        }
        None
    }
}

fn oriented(rect: Rect, rotated: bool) -> Rect {
    if rotated { rect.rotated() } else { rect }
}

/// Guillotine split of `free` after cutting `placed` from its origin.
///
/// Each cut eats `kerf` beyond the panel edge. The split runs along the
/// shorter leftover so the larger remainder keeps its full span.
fn split_remainders(free: FreeRect, placed: Rect, kerf: u32) -> [Option<FreeRect>; 2] {
    let right_w = free.rect.w.saturating_sub(placed.w.saturating_add(kerf));
    let bottom_h = free.rect.h.saturating_sub(placed.h.saturating_add(kerf));

    // Only built for a non-empty remainder, where the origin plus its extent
    // ends at the free rect's edge and cannot overflow.
    let right = |h: u32| FreeRect {
        x: free.x + placed.w + kerf,
        y: free.y,
        rect: Rect::new(right_w, h),
    };
    let bottom = |w: u32| FreeRect {
        x: free.x,
        y: free.y + placed.h + kerf,
        rect: Rect::new(w, bottom_h),
    };

    match (right_w > 0, bottom_h > 0) {
        (true, true) => {
            if free.rect.w - placed.w < free.rect.h - placed.h {
                // Horizontal cut first: the bottom strip spans the full width
                [Some(right(placed.h)), Some(bottom(free.rect.w))]
            } else {
                // Vertical cut first: the right strip spans the full height
                [Some(right(free.rect.h)), Some(bottom(placed.w))]
            }
        }
        (true, false) => [Some(right(free.rect.h)), None],
        (false, true) => [None, Some(bottom(free.rect.w))],
        (false, false) => [None, None],
    }
}
