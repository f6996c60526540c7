use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::PieceKind;

/// A single cell of the glass.
///
/// Either empty or tagged with the kind of the piece that filled it. There is
/// no locked-versus-falling distinction: the falling piece's cells are
/// ordinary occupied cells until the solver clears them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Empty cell (no piece).
    #[default]
    Empty,
    /// Cell filled by a piece of a specific type.
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Single-character form used by the snapshot format: `.` for empty,
    /// the piece letter otherwise.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Piece(kind) => kind.as_char(),
        }
    }

    /// Parses a cell from its snapshot character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Cell::Empty);
        }
        match PieceKind::from_char(c) {
            Some(kind) => Some(Cell::Piece(kind)),
            None => None,
        }
    }
}

/// A board coordinate: `x` is the column, `y` the row.
///
/// Row 0 is the bottom of the glass; rows grow upward. Points are not
/// clamped to the board — piece geometry may produce coordinates outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The piece currently in play, as reported by the game: its kind and the
/// anchor cell all shape offsets are relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallingPiece {
    pub kind: PieceKind,
    pub anchor: Point,
}

/// Square glass of side `size`, plus the falling piece the game reported.
///
/// Owned by the harness; the solver reads it and temporarily mutates it while
/// testing candidate placements.
///
/// # Snapshot format
///
/// Serializes as `{ "size": S, "rows": [...], "piece": "T", "anchor":
/// { "x": .., "y": .. } }` where `rows` lists the glass top to bottom, one
/// character per cell (see [`Cell::as_char`]). Deserialization rejects
/// malformed snapshots with a specific [`SnapshotError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard", into = "RawBoard")]
pub struct Board {
    size: i32,
    cells: Vec<Cell>,
    falling: FallingPiece,
}

impl Board {
    /// Creates an empty `size`×`size` glass with the given falling piece.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not positive.
    #[must_use]
    pub fn new(size: i32, falling: FallingPiece) -> Self {
        assert!(size > 0, "board size must be positive, got {size}");
        let cells = vec![Cell::Empty; usize::try_from(size * size).unwrap()];
        Self {
            size,
            cells,
            falling,
        }
    }

    #[must_use]
    pub fn size(&self) -> i32 {
        self.size
    }

    #[must_use]
    pub fn falling_piece(&self) -> FallingPiece {
        self.falling
    }

    pub fn set_falling_piece(&mut self, falling: FallingPiece) {
        self.falling = falling;
    }

    /// Whether `(x, y)` lies outside the glass.
    #[must_use]
    pub fn is_out_of_field(&self, x: i32, y: i32) -> bool {
        x < 0 || y < 0 || x >= self.size || y >= self.size
    }

    /// Whether `(x, y)` is an empty in-field cell. Out-of-field coordinates
    /// are never free.
    #[must_use]
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        !self.is_out_of_field(x, y) && self.cells[self.index(x, y)].is_empty()
    }

    /// The cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of field.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        assert!(
            !self.is_out_of_field(x, y),
            "cell ({x}, {y}) is out of field"
        );
        self.cells[self.index(x, y)]
    }

    /// Writes `cell` at `(x, y)`. Out-of-field writes are ignored: shape
    /// offsets applied near the glass edge may point outside.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if self.is_out_of_field(x, y) {
            return;
        }
        let index = self.index(x, y);
        self.cells[index] = cell;
    }

    /// The row just above the topmost occupied cell of column `x`, or 0 when
    /// the column is empty. A piece dropped down column `x` rests here.
    #[must_use]
    pub fn surface_row(&self, x: i32) -> i32 {
        for y in (0..self.size).rev() {
            if !self.is_free(x, y) {
                return y + 1;
            }
        }
        0
    }

    /// Removes every complete row, shifting the rows above down. Returns the
    /// number of rows removed.
    pub fn clear_complete_rows(&mut self) -> usize {
        let mut kept = 0;
        for y in 0..self.size {
            let complete = (0..self.size).all(|x| !self.cells[self.index(x, y)].is_empty());
            if complete {
                continue;
            }
            if kept != y {
                for x in 0..self.size {
                    let from = self.index(x, y);
                    let to = self.index(x, kept);
                    self.cells[to] = self.cells[from];
                }
            }
            kept += 1;
        }
        let cleared = self.size - kept;
        for y in kept..self.size {
            for x in 0..self.size {
                let index = self.index(x, y);
                self.cells[index] = Cell::Empty;
            }
        }
        usize::try_from(cleared).unwrap()
    }

    #[expect(clippy::cast_sign_loss)]
    fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(!self.is_out_of_field(x, y));
        (y * self.size + x) as usize
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.size).rev() {
            for x in 0..self.size {
                write!(f, "{}", self.cell(x, y).as_char())?;
            }
            if y > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Errors raised while decoding a board snapshot.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SnapshotError {
    #[display("board size must be positive, got {size}")]
    Size { size: i32 },
    #[display("expected {expected} rows, got {found}")]
    RowCount { expected: i32, found: usize },
    #[display("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: i32,
        found: usize,
    },
    #[display("unknown cell '{cell}' at row {row}, column {column}")]
    UnknownCell {
        cell: char,
        row: usize,
        column: usize,
    },
}

/// Wire form of a board snapshot; see [`Board`] for the layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBoard {
    size: i32,
    rows: Vec<String>,
    piece: PieceKind,
    anchor: Point,
}

impl TryFrom<RawBoard> for Board {
    type Error = SnapshotError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let size = raw.size;
        if size <= 0 {
            return Err(SnapshotError::Size { size });
        }
        let width = usize::try_from(size).unwrap();
        if raw.rows.len() != width {
            return Err(SnapshotError::RowCount {
                expected: size,
                found: raw.rows.len(),
            });
        }

        let falling = FallingPiece {
            kind: raw.piece,
            anchor: raw.anchor,
        };
        let mut board = Board::new(size, falling);
        for (i, row) in raw.rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(SnapshotError::RowWidth {
                    row: i,
                    expected: size,
                    found: row.chars().count(),
                });
            }
            let y = size - 1 - i32::try_from(i).unwrap();
            for (j, c) in row.chars().enumerate() {
                let cell = Cell::from_char(c).ok_or(SnapshotError::UnknownCell {
                    cell: c,
                    row: i,
                    column: j,
                })?;
                board.set(i32::try_from(j).unwrap(), y, cell);
            }
        }
        Ok(board)
    }
}

impl From<Board> for RawBoard {
    fn from(board: Board) -> Self {
        let rows = (0..board.size)
            .rev()
            .map(|y| (0..board.size).map(|x| board.cell(x, y).as_char()).collect())
            .collect();
        Self {
            size: board.size,
            rows,
            piece: board.falling.kind,
            anchor: board.falling.anchor,
        }
    }
}
