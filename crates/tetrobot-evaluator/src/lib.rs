//! Board evaluation for the tetrobot solver.
//!
//! A placement is judged by the board it leaves behind. The evaluator reduces
//! a hypothetical fully-settled board to four classic features
//! ([`BoardFeatures`]) and combines them through a fixed linear weighting
//! ([`ScoreWeights`]):
//!
//! ```text
//! score = a·aggregate_height + b·complete_lines + c·holes + d·bumpiness
//! ```
//!
//! Taller stacks, buried holes, and an uneven surface are penalized; complete
//! rows are rewarded. The weights are constants of the system, not
//! configuration: changing them changes playing style, never the formula.
//!
//! The depth bonus rewarding lower resting rows is a property of the
//! placement search, not of board quality in isolation, and lives in
//! `tetrobot-solver`.

pub use self::board_features::BoardFeatures;

pub mod board_features;

use serde::Serialize;
use tetrobot_engine::Board;

/// Fixed weights of the linear board score.
///
/// `Serialize` is derived for diagnostic dumps only; the bot always plays
/// with [`ScoreWeights::CLASSIC`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreWeights {
    pub aggregate_height: f64,
    pub complete_lines: f64,
    pub holes: f64,
    pub bumpiness: f64,
}

impl ScoreWeights {
    /// The hand-tuned weight set the bot plays with.
    pub const CLASSIC: Self = Self {
        aggregate_height: -0.510_066,
        complete_lines: 0.760_666,
        holes: -0.356_63,
        bumpiness: -0.184_48,
    };

    /// Weighted sum of the four features.
    #[must_use]
    pub fn score(&self, features: &BoardFeatures) -> f64 {
        self.aggregate_height * f64::from(features.aggregate_height)
            + self.complete_lines * f64::from(features.complete_lines)
            + self.holes * f64::from(features.holes)
            + self.bumpiness * f64::from(features.bumpiness)
    }

    /// Extracts features from `board` and scores them.
    #[must_use]
    pub fn evaluate(&self, board: &Board) -> f64 {
        self.score(&BoardFeatures::from_board(board))
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::CLASSIC
    }
}

#[cfg(test)]
mod tests {
    use tetrobot_engine::{Cell, FallingPiece, PieceKind, Point};

    use super::*;

    fn empty_board(size: i32) -> Board {
        Board::new(
            size,
            FallingPiece {
                kind: PieceKind::T,
                anchor: Point::new(size / 2, size - 1),
            },
        )
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let board = empty_board(4);
        assert_eq!(ScoreWeights::CLASSIC.evaluate(&board), 0.0);
    }

    #[test]
    fn test_score_is_linear_in_features() {
        let features = BoardFeatures {
            aggregate_height: 3,
            complete_lines: 1,
            holes: 2,
            bumpiness: 4,
        };
        let weights = ScoreWeights::CLASSIC;
        let expected = weights.aggregate_height * 3.0
            + weights.complete_lines
            + weights.holes * 2.0
            + weights.bumpiness * 4.0;
        assert!((weights.score(&features) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_classic_weights_penalize_holes() {
        // Two boards, same silhouette: one hides a hole under its stack.
        let mut clean = empty_board(3);
        clean.set(0, 0, Cell::Piece(PieceKind::L));
        clean.set(0, 1, Cell::Piece(PieceKind::L));

        let mut holed = empty_board(3);
        holed.set(0, 1, Cell::Piece(PieceKind::L));

        let weights = ScoreWeights::CLASSIC;
        assert!(weights.evaluate(&clean) < 0.0);
        assert!(weights.evaluate(&holed) < weights.evaluate(&clean));
    }
}
