//! Exhaustive enumeration and scoring of final placements.
//!
//! For one piece kind and one board snapshot the search tries every
//! column × rotation pair: the landing anchor follows from the column's
//! surface row and the shape's derived vertical offset, legality is checked
//! before anything is written to the board, and each legal candidate is
//! scored by speculatively filling its cells, evaluating the board, and
//! reverting. At most `size × 4` candidates per call.

use arrayvec::ArrayVec;
use tetrobot_engine::{
    Board, CELLS_PER_PIECE, Cell, CommandSequence, FallingPiece, PieceKind, Point, Rotation,
};
use tetrobot_evaluator::ScoreWeights;

use crate::{NoPlacementError, Placement, to_commands};

/// Chooses the best final placement for the falling piece.
///
/// Carries the evaluator weights explicitly; construct once and reuse across
/// turns. Holds no other state: every call is a pure function of the board
/// snapshot and the falling piece.
#[derive(Debug, Clone, Default)]
pub struct PlacementSearch {
    weights: ScoreWeights,
}

impl PlacementSearch {
    #[must_use]
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Picks the highest-scoring legal resting pose for the falling piece.
    ///
    /// Clears the falling piece's cells first; whatever the outcome, the
    /// board is handed back in exactly that cleared state. Ties go to the
    /// first candidate in scan order: columns left to right, rotations in
    /// cyclic order.
    pub fn best_move(&self, board: &mut Board) -> Result<Placement, NoPlacementError> {
        let falling = board.falling_piece();
        clear_falling_piece(board, falling);

        let mut best: Option<(f64, Placement)> = None;
        for x in 0..board.size() {
            let surface = board.surface_row(x);
            // Depth bonus: deeper landings are worth more, all else equal.
            // Measured at the landing surface so that rotations producing the
            // same cells tie and scan order decides.
            let depth_bonus = f64::from(board.size() - surface);
            for rotation in Rotation::ALL {
                let anchor = Point::new(x, surface + falling.kind.landing_offset(rotation));
                let cells = falling.kind.predict_cells(rotation, anchor);
                if !is_legal(board, &cells) {
                    continue;
                }
                let score = self.score_candidate(board, falling.kind, &cells) + depth_bonus;
                if best.is_none_or(|(best_score, _)| score > best_score) {
                    best = Some((score, Placement { rotation, anchor }));
                }
            }
        }

        best.map(|(_, placement)| placement)
            .ok_or(NoPlacementError { kind: falling.kind })
    }

    /// Runs the full turn: search, then translate the winner into commands
    /// relative to the falling piece's reported pose (spawn rotation).
    pub fn make_move(&self, board: &mut Board) -> Result<CommandSequence, NoPlacementError> {
        let falling = board.falling_piece();
        let placement = self.best_move(board)?;
        Ok(to_commands(Rotation::R0, falling.anchor.x, &placement))
    }

    /// Evaluates one legal candidate: fill its cells, evaluate, revert. The
    /// fill and the revert are unconditional; candidates are rejected before
    /// any cell is written.
    fn score_candidate(
        &self,
        board: &mut Board,
        kind: PieceKind,
        cells: &[Point; CELLS_PER_PIECE],
    ) -> f64 {
        for p in cells {
            board.set(p.x, p.y, Cell::Piece(kind));
        }
        let score = self.weights.evaluate(board);
        for p in cells {
            board.set(p.x, p.y, Cell::Empty);
        }
        score
    }
}

/// Locks a chosen placement onto the board, the way the game will after the
/// command sequence runs.
pub fn commit_placement(board: &mut Board, kind: PieceKind, placement: &Placement) {
    for p in kind.predict_cells(placement.rotation, placement.anchor) {
        board.set(p.x, p.y, Cell::Piece(kind));
    }
}

/// Removes the falling piece's cells, producing the settled board all
/// candidates are tested against. Spawn offsets near the glass edge may
/// point outside; those writes are no-ops.
fn clear_falling_piece(board: &mut Board, falling: FallingPiece) {
    for (dx, dy) in falling.kind.spawn_cells() {
        board.set(
            falling.anchor.x + i32::from(dx),
            falling.anchor.y + i32::from(dy),
            Cell::Empty,
        );
    }
}

/// A candidate may rest here only if every cell is inside the glass, every
/// cell is empty, and the piece can fall straight down onto them.
fn is_legal(board: &Board, cells: &[Point; CELLS_PER_PIECE]) -> bool {
    cells.iter().all(|p| !board.is_out_of_field(p.x, p.y))
        && cells.iter().all(|p| board.is_free(p.x, p.y))
        && fall_path_is_clear(board, cells)
}

/// Gravity check: in every column the piece occupies, each row strictly
/// above the piece's topmost cell in that column must be free up to the
/// board top.
fn fall_path_is_clear(board: &Board, cells: &[Point; CELLS_PER_PIECE]) -> bool {
    let mut column_tops: ArrayVec<Point, CELLS_PER_PIECE> = ArrayVec::new();
    for p in cells {
        match column_tops.iter_mut().find(|top| top.x == p.x) {
            Some(top) => top.y = top.y.max(p.y),
            None => column_tops.push(*p),
        }
    }
    column_tops
        .iter()
        .all(|top| (top.y + 1..board.size()).all(|y| board.is_free(top.x, y)))
}
