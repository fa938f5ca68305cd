//! Board-count optimization over the guillotine [`Board`] primitive.
//!
//! Four placement policies share one signature and are selected through
//! [`Variant`]:
//!
//! | variant | policy |
//! |---|---|
//! | `FirstFit` | first board that accepts the panel |
//! | `BestFit` | accepting board with the least free area left afterwards |
//! | `TwoPhase` | best fit, then try to dissolve an underfilled last board |
//! | `Lookahead` | first fit twice, with the leading panel locked in each orientation |

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{OptimizeError, Result};
use crate::guillotine::{Board, ScoreStrategy};
use crate::sort::{SortStrategy, order};
use crate::types::{BoardSpec, Demand, Panel, Solution, expand_demands};

/// Last-board utilization below which the two-phase variant tries to
/// redistribute its panels.
pub const UNDERFILL_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    FirstFit,
    BestFit,
    #[default]
    TwoPhase,
    Lookahead,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::FirstFit,
        Variant::BestFit,
        Variant::TwoPhase,
        Variant::Lookahead,
    ];

    /// Validates the input, orders it and packs it onto boards of `spec`.
    pub fn pack(self, panels: &[Panel], spec: BoardSpec, sort: SortStrategy) -> Result<Vec<Board>> {
        validate(panels, &spec)?;
        let ordered = order(panels, sort);
        let run = self.run(&ordered, Stock::new(spec, ScoreStrategy::default()), sort);
        Ok(run.boards)
    }

    fn run(self, ordered: &[Panel], stock: Stock, sort: SortStrategy) -> Run {
        let run = match self {
            Variant::FirstFit => first_fit(ordered, stock),
            Variant::BestFit => best_fit(ordered, stock),
            Variant::TwoPhase => two_phase(ordered, stock, sort),
            Variant::Lookahead => lookahead(ordered, stock),
        };
        debug!(
            variant = %self,
            %sort,
            panels = ordered.len(),
            boards = run.boards.len(),
            waste = run.total_waste(),
            "packing finished"
        );
        run
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Variant::FirstFit => "first-fit",
            Variant::BestFit => "best-fit",
            Variant::TwoPhase => "two-phase",
            Variant::Lookahead => "lookahead",
        };
        f.write_str(s)
    }
}

impl FromStr for Variant {
    type Err = OptimizeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "first-fit" => Ok(Variant::FirstFit),
            "best-fit" => Ok(Variant::BestFit),
            "two-phase" => Ok(Variant::TwoPhase),
            "lookahead" => Ok(Variant::Lookahead),
            _ => Err(OptimizeError::Parse(format!(
                "invalid variant '{s}', expected: first-fit, best-fit, two-phase, or lookahead"
            ))),
        }
    }
}

pub fn pack_first_fit(panels: &[Panel], spec: BoardSpec, sort: SortStrategy) -> Result<Vec<Board>> {
    Variant::FirstFit.pack(panels, spec, sort)
}

pub fn pack_best_fit(panels: &[Panel], spec: BoardSpec, sort: SortStrategy) -> Result<Vec<Board>> {
    Variant::BestFit.pack(panels, spec, sort)
}

pub fn pack_two_phase(panels: &[Panel], spec: BoardSpec, sort: SortStrategy) -> Result<Vec<Board>> {
    Variant::TwoPhase.pack(panels, spec, sort)
}

pub fn pack_lookahead(panels: &[Panel], spec: BoardSpec, sort: SortStrategy) -> Result<Vec<Board>> {
    Variant::Lookahead.pack(panels, spec, sort)
}

/// Rejects boards with no usable area and panels that can never be placed.
pub fn validate(panels: &[Panel], spec: &BoardSpec) -> Result<()> {
    spec.validate()?;
    let board = spec.rect();
    for (index, panel) in panels.iter().enumerate() {
        if panel.width == 0 || panel.height == 0 || !panel.fits_board(&board) {
            return Err(OptimizeError::InvalidPanel {
                index,
                width: panel.width,
                height: panel.height,
                board_width: spec.width,
                board_height: spec.height,
            });
        }
    }
    Ok(())
}

/// Factory for fresh boards of one size.
#[derive(Debug, Clone, Copy)]
struct Stock {
    spec: BoardSpec,
    score: ScoreStrategy,
}

impl Stock {
    fn new(spec: BoardSpec, score: ScoreStrategy) -> Self {
        Self { spec, score }
    }

    fn board(&self) -> Board {
        Board::new(self.spec).with_score(self.score)
    }
}

#[derive(Debug, Clone, Default)]
struct Run {
    boards: Vec<Board>,
    /// Panels that did not fit even an empty board.
    unplaced: Vec<Panel>,
}

impl Run {
    fn total_waste(&self) -> u64 {
        self.boards.iter().map(Board::waste_area).sum()
    }

    fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Complete runs beat incomplete ones, then fewer boards, then less waste.
    fn is_better_than(&self, other: &Run) -> bool {
        match (self.is_complete(), other.is_complete()) {
            (true, false) => true,
            (false, true) => false,
            _ => {
                (self.boards.len(), self.total_waste()) < (other.boards.len(), other.total_waste())
            }
        }
    }
}

fn open_board(boards: &mut Vec<Board>, panel: &Panel, stock: Stock) -> bool {
    let mut board = stock.board();
    if !board.insert(panel) {
        return false;
    }
    boards.push(board);
    true
}

fn first_fit_into(boards: &mut Vec<Board>, panel: &Panel, stock: Stock) -> bool {
    if boards.iter_mut().any(|b| b.insert(panel)) {
        return true;
    }
    open_board(boards, panel, stock)
}

/// Inserts into the accepting board with the least remaining free area;
/// earlier boards win ties.
fn best_fit_into(boards: &mut [Board], panel: &Panel) -> bool {
    let best = boards
        .iter()
        .enumerate()
        .filter_map(|(i, b)| b.waste_if_inserted(panel).map(|waste| (i, waste)))
        .min_by_key(|&(_, waste)| waste);
    match best {
        Some((i, _)) => boards[i].insert(panel),
        None => false,
    }
}

fn first_fit(ordered: &[Panel], stock: Stock) -> Run {
    let mut run = Run::default();
    for panel in ordered {
        if !first_fit_into(&mut run.boards, panel, stock) {
            run.unplaced.push(*panel);
        }
    }
    run
}

fn best_fit(ordered: &[Panel], stock: Stock) -> Run {
    let mut run = Run::default();
    for panel in ordered {
        if !best_fit_into(&mut run.boards, panel) && !open_board(&mut run.boards, panel, stock) {
            run.unplaced.push(*panel);
        }
    }
    run
}

fn two_phase(ordered: &[Panel], stock: Stock, sort: SortStrategy) -> Run {
    redistribute_last(best_fit(ordered, stock), stock, sort)
}

/// Moves the panels of an underfilled last board into the other boards.
/// Whatever does not fit is first-fit onto fresh boards; the result is kept
/// only if it beats `run`.
fn redistribute_last(run: Run, stock: Stock, sort: SortStrategy) -> Run {
    let Some((last, rest)) = run.boards.split_last() else {
        return run;
    };
    if rest.is_empty() || last.utilization() >= UNDERFILL_THRESHOLD {
        return run;
    }

    let mut boards = rest.to_vec();
    let mut leftover = Vec::new();
    for panel in order(last.panels(), sort) {
        if !best_fit_into(&mut boards, &panel) {
            leftover.push(panel);
        }
    }
    debug!(
        extracted = last.panels().len(),
        leftover = leftover.len(),
        utilization = last.utilization(),
        "redistributed underfilled board"
    );

    let mut unplaced = run.unplaced.clone();
    for panel in &leftover {
        if !first_fit_into(&mut boards, panel, stock) {
            unplaced.push(*panel);
        }
    }

    let candidate = Run { boards, unplaced };
    if candidate.is_better_than(&run) {
        candidate
    } else {
        run
    }
}

fn lookahead(ordered: &[Panel], stock: Stock) -> Run {
    let Some(first) = ordered.first() else {
        return Run::default();
    };
    if !first.rotatable || first.rect().is_square() {
        return first_fit(ordered, stock);
    }

    let with_first_locked = |rotated: bool| {
        let mut panels = ordered.to_vec();
        panels[0] = panels[0].locked(rotated);
        first_fit(&panels, stock)
    };
    let normal = with_first_locked(false);
    let rotated = with_first_locked(true);
    debug!(
        normal = normal.boards.len(),
        rotated = rotated.boards.len(),
        "lookahead on leading panel"
    );

    if rotated.is_better_than(&normal) {
        rotated
    } else {
        normal
    }
}

/// Entry point for a whole job: demands in, [`Solution`] out.
#[derive(Debug, Clone)]
pub struct Solver {
    spec: BoardSpec,
    demands: Vec<Demand>,
    variant: Variant,
    sort: SortStrategy,
    score: ScoreStrategy,
}

impl Solver {
    pub fn new(spec: BoardSpec, demands: Vec<Demand>) -> Self {
        Self {
            spec,
            demands,
            variant: Variant::default(),
            sort: SortStrategy::default(),
            score: ScoreStrategy::default(),
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_sort(mut self, sort: SortStrategy) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_score(mut self, score: ScoreStrategy) -> Self {
        self.score = score;
        self
    }

    fn panels(&self) -> Result<Vec<Panel>> {
        let panels = expand_demands(&self.demands);
        validate(&panels, &self.spec)?;
        Ok(panels)
    }

    fn run(&self, panels: &[Panel], variant: Variant, sort: SortStrategy) -> Run {
        let ordered = order(panels, sort);
        variant.run(&ordered, Stock::new(self.spec, self.score), sort)
    }

    /// Runs the configured variant and sort.
    pub fn solve(&self) -> Result<Solution> {
        let panels = self.panels()?;
        let run = self.run(&panels, self.variant, self.sort);
        Ok(self.to_solution(run, self.variant, self.sort))
    }

    /// Tries every variant with every sort and keeps the best result.
    pub fn solve_best(&self) -> Result<Solution> {
        let panels = self.panels()?;

        let mut best: Option<(Run, Variant, SortStrategy)> = None;
        for variant in Variant::ALL {
            for sort in SortStrategy::ALL {
                let run = self.run(&panels, variant, sort);
                if best.as_ref().is_none_or(|(b, _, _)| run.is_better_than(b)) {
                    best = Some((run, variant, sort));
                }
            }
        }

        let (run, variant, sort) = best.unwrap_or_default();
        info!(
            %variant,
            %sort,
            boards = run.boards.len(),
            "selected best strategy"
        );
        Ok(self.to_solution(run, variant, sort))
    }

    fn to_solution(&self, run: Run, variant: Variant, sort: SortStrategy) -> Solution {
        Solution {
            boards: run.boards.into_iter().map(Board::into_layout).collect(),
            spec: self.spec,
            variant,
            sort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Grain, Placement, Rect};

    /// Validates a complete solution:
    /// 1. Every placement fits within the board
    /// 2. No two placements on the same board overlap
    /// 3. The total number of placed panels matches expectations
    fn assert_solution_valid(sol: &Solution, expected_panels: usize) {
        let spec = sol.spec;
        assert_eq!(
            sol.panel_count(),
            expected_panels,
            "expected {} panels placed, got {}",
            expected_panels,
            sol.panel_count()
        );

        for (bi, board) in sol.boards.iter().enumerate() {
            for (pi, p) in board.placements.iter().enumerate() {
                assert!(
                    p.x + p.rect.w <= spec.width && p.y + p.rect.h <= spec.height,
                    "board {bi}, panel {pi} ({} @ ({},{})) exceeds board {}x{}",
                    p.rect,
                    p.x,
                    p.y,
                    spec.width,
                    spec.height
                );
            }
            assert_no_overlaps(bi, &board.placements);
        }
    }

    fn assert_no_overlaps(board_idx: usize, placements: &[Placement]) {
        for (i, a) in placements.iter().enumerate() {
            for (j, b) in placements.iter().enumerate().skip(i + 1) {
                assert!(
                    !a.overlaps(b),
                    "board {board_idx}: panel {i} ({} @ ({},{})) overlaps panel {j} ({} @ ({},{}))",
                    a.rect,
                    a.x,
                    a.y,
                    b.rect,
                    b.x,
                    b.y
                );
            }
        }
    }

    fn demand(w: u32, h: u32, qty: u32, rotatable: bool) -> Demand {
        let grain = if rotatable { Grain::None } else { Grain::Length };
        Demand::new(Rect::new(w, h), qty, grain)
    }

    fn stock(w: u32, h: u32, kerf: u32) -> Stock {
        Stock::new(BoardSpec::new(w, h, kerf), ScoreStrategy::default())
    }

    #[test]
    fn test_single_panel() {
        let solver = Solver::new(BoardSpec::new(100, 100, 0), vec![demand(50, 50, 1, true)]);
        for variant in Variant::ALL {
            let sol = solver.clone().with_variant(variant).solve().unwrap();
            assert_solution_valid(&sol, 1);
            assert_eq!(sol.board_count(), 1);
        }
    }

    #[test]
    fn test_exact_fit_four_panels() {
        let solver = Solver::new(BoardSpec::new(100, 100, 0), vec![demand(50, 50, 4, false)]);
        let sol = solver.solve().unwrap();
        assert_solution_valid(&sol, 4);
        assert_eq!(sol.board_count(), 1);
    }

    #[test]
    fn test_one_per_board() {
        // 60x60 leaves 40x100 and 60x40, no room for another 60x60
        let solver = Solver::new(BoardSpec::new(100, 100, 0), vec![demand(60, 60, 4, false)]);
        for variant in Variant::ALL {
            let sol = solver.clone().with_variant(variant).solve().unwrap();
            assert_solution_valid(&sol, 4);
            assert_eq!(sol.board_count(), 4, "{variant}");
        }
    }

    #[test]
    fn test_rotation_helps() {
        let solver = Solver::new(BoardSpec::new(100, 50, 0), vec![demand(50, 100, 1, true)]);
        let sol = solver.solve().unwrap();
        assert_solution_valid(&sol, 1);
        assert!(sol.boards[0].placements[0].rotated);
        assert_eq!(sol.boards[0].placements[0].rect, Rect::new(100, 50));
    }

    #[test]
    fn test_no_demands() {
        let solver = Solver::new(BoardSpec::new(100, 100, 0), vec![]);
        let sol = solver.solve().unwrap();
        assert_eq!(sol.board_count(), 0);
        assert_eq!(sol.total_waste_percent(), 0.0);
        assert_eq!(solver.solve_best().unwrap().board_count(), 0);
    }

    #[test]
    fn test_kerf_reduces_capacity() {
        let sol = Solver::new(BoardSpec::new(100, 100, 0), vec![demand(50, 100, 2, false)])
            .solve()
            .unwrap();
        assert_eq!(sol.board_count(), 1);

        // 50 + 5 + 50 = 105 > 100
        let sol = Solver::new(BoardSpec::new(100, 100, 5), vec![demand(50, 100, 2, false)])
            .solve()
            .unwrap();
        assert_solution_valid(&sol, 2);
        assert_eq!(sol.board_count(), 2);
    }

    #[test]
    fn test_waste_percent() {
        let sol = Solver::new(BoardSpec::new(100, 100, 0), vec![demand(100, 100, 1, false)])
            .solve()
            .unwrap();
        assert!(sol.total_waste_percent().abs() < 0.01);
        assert!((sol.utilization() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_panel_reported_before_packing() {
        let solver = Solver::new(
            BoardSpec::new(500, 500, 0),
            vec![demand(100, 100, 2, true), demand(600, 400, 1, true)],
        );
        assert_eq!(
            solver.solve().unwrap_err(),
            OptimizeError::InvalidPanel {
                index: 2,
                width: 600,
                height: 400,
                board_width: 500,
                board_height: 500,
            }
        );
        assert!(solver.solve_best().is_err());
    }

    #[test]
    fn test_non_rotatable_panel_that_only_fits_rotated_is_invalid() {
        let panels = [Panel::new(600, 400, false)];
        let err = pack_first_fit(&panels, BoardSpec::new(500, 700, 0), SortStrategy::Area);
        assert!(matches!(err, Err(OptimizeError::InvalidPanel { index: 0, .. })));

        let panels = [Panel::new(600, 400, true)];
        let boards = pack_first_fit(&panels, BoardSpec::new(500, 700, 0), SortStrategy::Area).unwrap();
        assert_eq!(boards.len(), 1);
    }

    #[test]
    fn test_invalid_board() {
        let panels = [Panel::new(10, 10, true)];
        for spec in [
            BoardSpec::new(0, 100, 0),
            BoardSpec::new(100, 0, 0),
            BoardSpec::new(100, 100, 100),
        ] {
            for variant in Variant::ALL {
                assert!(matches!(
                    variant.pack(&panels, spec, SortStrategy::Area),
                    Err(OptimizeError::InvalidBoard { .. })
                ));
            }
        }
    }

    #[test]
    fn test_best_fit_prefers_fuller_board() {
        let mut boards = vec![
            Board::new(BoardSpec::new(100, 100, 0)),
            Board::new(BoardSpec::new(100, 100, 0)),
        ];
        assert!(boards[1].insert(&Panel::new(100, 70, false)));
        assert!(best_fit_into(&mut boards, &Panel::new(30, 30, false)));
        assert!(boards[0].is_empty());
        assert_eq!(boards[1].placements().len(), 2);
    }

    #[test]
    fn test_redistribute_absorbs_underfilled_board() {
        let stock = stock(100, 100, 0);
        let mut first = stock.board();
        assert!(first.insert(&Panel::new(60, 60, false)));
        let mut last = stock.board();
        assert!(last.insert(&Panel::new(30, 20, true).with_id(9)));
        let run = Run {
            boards: vec![first, last],
            unplaced: vec![],
        };

        let result = redistribute_last(run, stock, SortStrategy::Area);
        assert_eq!(result.boards.len(), 1);
        assert_eq!(result.boards[0].placements().len(), 2);
        assert!(result.boards[0].placements().iter().any(|p| p.id == 9));
    }

    #[test]
    fn test_redistribute_keeps_run_when_nothing_moves() {
        let stock = stock(100, 100, 0);
        let mut first = stock.board();
        assert!(first.insert(&Panel::new(60, 60, false)));
        let mut last = stock.board();
        assert!(last.insert(&Panel::new(45, 45, false)));
        let run = Run {
            boards: vec![first, last],
            unplaced: vec![],
        };

        let result = redistribute_last(run, stock, SortStrategy::Area);
        assert_eq!(result.boards.len(), 2);
        assert_eq!(result.boards[1].placements()[0].rect, Rect::new(45, 45));
    }

    #[test]
    fn test_redistribute_skips_well_filled_board() {
        let stock = stock(100, 100, 0);
        let mut first = stock.board();
        assert!(first.insert(&Panel::new(10, 10, false)));
        let mut last = stock.board();
        assert!(last.insert(&Panel::new(80, 80, false)));
        let run = Run {
            boards: vec![first, last],
            unplaced: vec![],
        };

        let result = redistribute_last(run, stock, SortStrategy::Area);
        assert_eq!(result.boards.len(), 2);
        assert_eq!(result.boards[1].placements()[0].rect, Rect::new(80, 80));
    }

    #[test]
    fn test_lookahead_picks_orientation_that_fits() {
        // Only the rotated orientation of the leading panel fits the board
        let ordered = vec![Panel::new(600, 400, true), Panel::new(100, 100, true)];
        let run = lookahead(&ordered, stock(500, 700, 0));
        assert!(run.is_complete());
        assert_eq!(run.boards.len(), 1);
        assert!(run.boards[0].placements()[0].rotated);
        assert_eq!(run.boards[0].placements()[0].rect, Rect::new(400, 600));
    }

    #[test]
    fn test_lookahead_prefers_fewer_boards() {
        // Lying flat, only two 60x30s fit under the 70x40.
        // Standing up, it leaves a 60x100 column that takes all three.
        let ordered = vec![
            Panel::new(70, 40, true),
            Panel::new(60, 30, false),
            Panel::new(60, 30, false),
            Panel::new(60, 30, false),
        ];
        let stock = stock(100, 100, 0);
        let normal = {
            let mut panels = ordered.clone();
            panels[0] = panels[0].locked(false);
            first_fit(&panels, stock)
        };
        let chosen = lookahead(&ordered, stock);
        assert!(chosen.boards.len() <= normal.boards.len());
        assert_eq!(chosen.boards.len(), 1);
    }

    #[test]
    fn test_lookahead_without_rotation_matches_first_fit() {
        let ordered = vec![Panel::new(70, 40, false), Panel::new(60, 30, true)];
        let stock = stock(100, 100, 2);
        let a = lookahead(&ordered, stock);
        let b = first_fit(&ordered, stock);
        assert_eq!(a.boards.len(), b.boards.len());
        assert_eq!(
            a.boards[0].placements()[0].rect,
            b.boards[0].placements()[0].rect
        );
    }

    #[test]
    fn test_lookahead_full_tie_keeps_normal_orientation() {
        // Both orientations pack onto one board with the same waste
        let ordered = vec![Panel::new(50, 40, true), Panel::new(10, 10, false)];
        let run = lookahead(&ordered, stock(100, 100, 0));
        assert!(run.is_complete());
        assert_eq!(run.boards.len(), 1);
        assert!(!run.boards[0].placements()[0].rotated);
        assert_eq!(run.boards[0].placements()[0].rect, Rect::new(50, 40));
    }

    #[test]
    fn test_run_comparison_order() {
        let stock = stock(100, 100, 0);
        let run_with = |panels: &[Panel]| first_fit(panels, stock);

        let fuller = run_with(&[Panel::new(60, 60, false), Panel::new(30, 30, false)]);
        let emptier = run_with(&[Panel::new(60, 60, false)]);
        assert_eq!(fuller.boards.len(), emptier.boards.len());
        assert!(fuller.is_better_than(&emptier));
        assert!(!emptier.is_better_than(&fuller));
        assert!(!fuller.is_better_than(&fuller.clone()));

        let two_boards = run_with(&[Panel::new(60, 60, false), Panel::new(60, 60, false)]);
        assert!(emptier.is_better_than(&two_boards));

        let incomplete = run_with(&[Panel::new(60, 60, false), Panel::new(200, 10, false)]);
        assert!(!incomplete.is_complete());
        assert!(two_boards.is_better_than(&incomplete));
        assert!(!incomplete.is_better_than(&two_boards));
    }

    #[test]
    fn test_redistribute_partial_absorption_is_discarded() {
        let stock = stock(100, 100, 0);
        let mut first = stock.board();
        assert!(first.insert(&Panel::new(60, 60, false)));
        let mut last = stock.board();
        assert!(last.insert(&Panel::new(45, 45, false)));
        assert!(last.insert(&Panel::new(20, 20, false)));
        assert!(last.utilization() < UNDERFILL_THRESHOLD);
        let run = Run {
            boards: vec![first, last],
            unplaced: vec![],
        };

        // The 20x20 would move onto the first board, the 45x45 still needs
        // a board of its own, so nothing is gained
        let result = redistribute_last(run, stock, SortStrategy::Area);
        assert!(result.is_complete());
        assert_eq!(result.boards.len(), 2);
        assert_eq!(result.boards[0].placements().len(), 1);
        assert_eq!(result.boards[1].placements().len(), 2);
    }

    #[test]
    fn test_solve_best_never_worse_than_single_variant() {
        let demands = vec![
            demand(800, 600, 5, true),
            demand(400, 300, 8, true),
            demand(1200, 600, 3, true),
            demand(500, 500, 4, false),
        ];
        let solver = Solver::new(BoardSpec::new(2440, 1220, 3), demands);
        let best = solver.solve_best().unwrap();
        assert_solution_valid(&best, 20);
        for variant in Variant::ALL {
            let sol = solver.clone().with_variant(variant).solve().unwrap();
            assert!(best.board_count() <= sol.board_count());
        }
    }

    /// 30 panels, 6 different sizes, standard plywood sheet 2440x1220, no kerf.
    #[test]
    fn test_complex_mixed_sizes_no_kerf() {
        let spec = BoardSpec::new(2440, 1220, 0);
        let demands = vec![
            demand(800, 600, 5, true),
            demand(400, 300, 8, true),
            demand(600, 400, 4, true),
            demand(1200, 600, 3, true),
            demand(300, 200, 6, true),
            demand(500, 500, 4, false),
        ];

        for variant in Variant::ALL {
            let sol = Solver::new(spec, demands.clone())
                .with_variant(variant)
                .solve()
                .unwrap();
            assert_solution_valid(&sol, 30);

            let total_area: u64 = sol
                .boards
                .iter()
                .flat_map(|b| &b.placements)
                .map(|p| p.rect.area())
                .sum();
            let min_boards = total_area.div_ceil(spec.area()) as usize;
            assert!(sol.board_count() >= min_boards);
        }
    }

    /// 50 panels, 10 different sizes, kerf=4, mix of rotation allowed/disallowed.
    #[test]
    fn test_complex_large_batch_mixed_rotation() {
        let demands = vec![
            demand(900, 600, 5, true),
            demand(500, 400, 6, false),
            demand(700, 350, 4, true),
            demand(1200, 500, 3, true),
            demand(300, 300, 8, false),
            demand(450, 200, 6, true),
            demand(600, 450, 5, false),
            demand(800, 300, 4, true),
            demand(350, 250, 5, true),
            demand(1000, 700, 4, false),
        ];
        for score in [
            ScoreStrategy::BestAreaFit,
            ScoreStrategy::BestShortSideFit,
            ScoreStrategy::BestLongSideFit,
        ] {
            let sol = Solver::new(BoardSpec::new(3000, 1500, 4), demands.clone())
                .with_score(score)
                .solve()
                .unwrap();
            assert_solution_valid(&sol, 50);
            assert!(sol.total_waste_percent() < 100.0);
            assert!(sol.total_waste_percent() >= 0.0);
        }
    }

    #[test]
    fn test_variant_tokens() {
        for variant in Variant::ALL {
            assert_eq!(variant.to_string().parse::<Variant>(), Ok(variant));
        }
        assert!("random".parse::<Variant>().is_err());
    }
}
