//! Guillotine cutting-stock optimizer for rectangular panels.
//!
//! Given a flat list of [`Panel`]s and a [`BoardSpec`], the packers in
//! [`solver`] decide how many boards are needed and where each panel is cut.
//! Every cut runs edge to edge across the remaining piece and consumes the
//! blade kerf.
//!
//! ```
//! use panel_optimizer::{BoardSpec, Panel, SortStrategy, pack_best_fit};
//!
//! let panels = vec![Panel::new(1000, 600, false); 5];
//! let boards = pack_best_fit(&panels, BoardSpec::new(2800, 2070, 3), SortStrategy::Area).unwrap();
//! assert_eq!(boards.len(), 1);
//! ```

pub mod error;
pub mod guillotine;
pub mod solver;
pub mod sort;
pub mod types;

pub use error::{OptimizeError, Result};
pub use guillotine::{Board, FreeRect, ScoreStrategy};
pub use solver::{
    Solver, UNDERFILL_THRESHOLD, Variant, pack_best_fit, pack_first_fit, pack_lookahead,
    pack_two_phase, validate,
};
pub use sort::{SortStrategy, order};
pub use types::{BoardLayout, BoardSpec, Demand, Grain, Panel, Placement, Rect, Solution, expand_demands};
