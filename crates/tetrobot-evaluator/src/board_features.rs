//! Feature extraction: the four classic measurements of a settled board.

use serde::Serialize;
use tetrobot_engine::Board;

/// The four features of a settled board.
///
/// Computed over the full grid as-is; the solver evaluates boards with the
/// falling piece cleared and a candidate's cells speculatively filled in.
/// The features are independent: a board with simultaneous holes and
/// complete rows scores both, with no special-casing of their interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardFeatures {
    /// Sum of column heights; an empty column contributes 0.
    pub aggregate_height: i32,
    /// Rows with every cell occupied.
    pub complete_lines: i32,
    /// Empty cells with an occupied cell immediately above them in the same
    /// column.
    pub holes: i32,
    /// Sum of absolute height differences between adjacent columns.
    pub bumpiness: i32,
}

impl BoardFeatures {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        let heights = column_heights(board);
        Self {
            aggregate_height: heights.iter().sum(),
            complete_lines: complete_lines(board),
            holes: holes(board),
            bumpiness: heights.windows(2).map(|w| (w[0] - w[1]).abs()).sum(),
        }
    }
}

/// Height of each column: one above its topmost occupied row, which is
/// exactly the column's surface row.
fn column_heights(board: &Board) -> Vec<i32> {
    (0..board.size()).map(|x| board.surface_row(x)).collect()
}

fn complete_lines(board: &Board) -> i32 {
    let mut complete = 0;
    for y in 0..board.size() {
        if (0..board.size()).all(|x| !board.is_free(x, y)) {
            complete += 1;
        }
    }
    complete
}

fn holes(board: &Board) -> i32 {
    let mut holes = 0;
    for x in 0..board.size() {
        for y in 0..board.size() - 1 {
            if board.is_free(x, y) && !board.is_free(x, y + 1) {
                holes += 1;
            }
        }
    }
    holes
}

#[cfg(test)]
mod tests {
    use tetrobot_engine::{Cell, FallingPiece, PieceKind, Point};

    use super::*;

    /// Builds a board from rows listed top to bottom, `.` for empty.
    fn board_from_rows(rows: &[&str]) -> Board {
        let size = i32::try_from(rows.len()).unwrap();
        let mut board = Board::new(
            size,
            FallingPiece {
                kind: PieceKind::T,
                anchor: Point::new(0, size - 1),
            },
        );
        for (i, row) in rows.iter().enumerate() {
            let y = size - 1 - i32::try_from(i).unwrap();
            for (j, c) in row.chars().enumerate() {
                board.set(i32::try_from(j).unwrap(), y, Cell::from_char(c).unwrap());
            }
        }
        board
    }

    #[test]
    fn test_empty_board_has_all_zero_features() {
        let board = board_from_rows(&["....", "....", "....", "...."]);
        let features = BoardFeatures::from_board(&board);
        assert_eq!(
            features,
            BoardFeatures {
                aggregate_height: 0,
                complete_lines: 0,
                holes: 0,
                bumpiness: 0,
            }
        );
    }

    #[test]
    fn test_single_complete_row() {
        let board = board_from_rows(&["....", "....", "....", "IIII"]);
        let features = BoardFeatures::from_board(&board);
        assert_eq!(features.complete_lines, 1);
        assert_eq!(features.aggregate_height, 4);
        assert_eq!(features.holes, 0);
        assert_eq!(features.bumpiness, 0);
    }

    #[test]
    fn test_covered_empty_cell_is_a_hole() {
        // Column 0: filled at the bottom, one empty cell, one filled on top.
        let board = board_from_rows(&["....", "L...", "....", "L..."]);
        let features = BoardFeatures::from_board(&board);
        assert_eq!(features.holes, 1);
        assert_eq!(features.aggregate_height, 3);
    }

    #[test]
    fn test_only_the_cell_directly_below_a_cover_counts() {
        // A floating cell covers one hole, however deep the gap below it.
        let board = board_from_rows(&["L...", "....", "....", "...."]);
        let features = BoardFeatures::from_board(&board);
        assert_eq!(features.holes, 1);
        assert_eq!(features.aggregate_height, 4);
    }

    #[test]
    fn test_bumpiness_sums_adjacent_height_differences() {
        // Heights 2, 0, 1, 0 -> |2-0| + |0-1| + |1-0| = 4.
        let board = board_from_rows(&["....", "....", "S...", "S.Z."]);
        let features = BoardFeatures::from_board(&board);
        assert_eq!(features.bumpiness, 4);
        assert_eq!(features.aggregate_height, 3);
    }

    #[test]
    fn test_holes_and_complete_lines_score_independently() {
        let board = board_from_rows(&["....", "J...", "....", "IIII"]);
        let features = BoardFeatures::from_board(&board);
        assert_eq!(features.complete_lines, 1);
        assert_eq!(features.holes, 1);
    }
}
