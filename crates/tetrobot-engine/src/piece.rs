use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use crate::board::Point;

/// Rotation state of a piece.
///
/// One of four discrete states, cyclic:
///
/// - [`R0`](Rotation::R0): 0° (spawn orientation)
/// - [`R90`](Rotation::R90): 90° clockwise
/// - [`R180`](Rotation::R180): 180°
/// - [`R270`](Rotation::R270): 270° clockwise
///
/// Composition is modular addition of quarter turns.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rotation {
    #[default]
    R0 = 0,
    R90 = 1,
    R180 = 2,
    R270 = 3,
}

impl Rotation {
    /// Number of rotation states (4).
    pub const LEN: usize = 4;

    /// All rotation states in the fixed cyclic order.
    pub const ALL: [Self; Self::LEN] = [Self::R0, Self::R90, Self::R180, Self::R270];

    /// One 90° clockwise step.
    #[must_use]
    pub const fn rotated_cw(self) -> Self {
        Self::from_quarter_turns(self as u8 + 1)
    }

    /// Modular composition: `self` followed by `other`.
    #[must_use]
    pub const fn then(self, other: Self) -> Self {
        Self::from_quarter_turns(self as u8 + other as u8)
    }

    /// The clockwise rotation taking `from` to `self`.
    #[must_use]
    pub const fn delta_from(self, from: Self) -> Self {
        Self::from_quarter_turns(4 + self as u8 - from as u8)
    }

    const fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Self::R0,
            1 => Self::R90,
            2 => Self::R180,
            _ => Self::R270,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::I,
            1 => PieceKind::O,
            2 => PieceKind::S,
            3 => PieceKind::Z,
            4 => PieceKind::J,
            5 => PieceKind::L,
            _ => PieceKind::T,
        }
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// The cells the piece occupies in the given rotation, relative to its
    /// anchor.
    #[must_use]
    pub fn cells(self, rotation: Rotation) -> [CellOffset; CELLS_PER_PIECE] {
        PIECE_SHAPES[self as usize][rotation.index()]
    }

    /// The piece's cells in spawn orientation; the falling piece is reported
    /// by the game in this pose.
    #[must_use]
    pub fn spawn_cells(self) -> [CellOffset; CELLS_PER_PIECE] {
        self.cells(Rotation::R0)
    }

    /// Rows between a column's surface and the anchor row that puts the
    /// shape's lowest cell on that surface. Derived from the shape table.
    #[must_use]
    pub fn landing_offset(self, rotation: Rotation) -> i32 {
        i32::from(LANDING_OFFSETS[self as usize][rotation.index()])
    }

    /// Absolute cells the piece would occupy at `anchor` in `rotation`.
    ///
    /// Pure and total: the returned points may lie outside the board, and
    /// callers are responsible for bounds checking.
    #[must_use]
    pub fn predict_cells(self, rotation: Rotation, anchor: Point) -> [Point; CELLS_PER_PIECE] {
        self.cells(rotation)
            .map(|(dx, dy)| Point::new(anchor.x + i32::from(dx), anchor.y + i32::from(dy)))
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrobot_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrobot_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

/// Cell position relative to a piece's anchor, `(columns, rows)`; rows grow
/// upward.
pub type CellOffset = (i8, i8);

/// Every tetromino occupies exactly this many cells.
pub const CELLS_PER_PIECE: usize = 4;

/// A piece's cell set for one rotation state.
type PieceShape = [CellOffset; CELLS_PER_PIECE];

/// Generates all 4 rotation states of a shape by rotating 90° clockwise.
///
/// With rows growing upward, one clockwise quarter turn about the anchor maps
/// `(dx, dy)` to `(dy, -dx)`.
const fn shape_rotations(spawn: PieceShape) -> [PieceShape; Rotation::LEN] {
    let mut rotations = [spawn; Rotation::LEN];
    let mut i = 1;
    while i < Rotation::LEN {
        let mut cells = rotations[i - 1];
        let mut c = 0;
        while c < CELLS_PER_PIECE {
            let (dx, dy) = cells[c];
            cells[c] = (dy, -dx);
            c += 1;
        }
        rotations[i] = cells;
        i += 1;
    }
    rotations
}

/// The single source of truth for piece geometry: everything else (landing
/// offsets, clear masks, predicted cells) is derived from this table.
const PIECE_SHAPES: [[PieceShape; Rotation::LEN]; PieceKind::LEN] = [
    // I-piece
    shape_rotations([(0, 1), (0, 0), (0, -1), (0, -2)]),
    // O-piece
    shape_rotations([(0, 0), (1, 0), (0, -1), (1, -1)]),
    // S-piece
    shape_rotations([(0, 1), (1, 1), (-1, 0), (0, 0)]),
    // Z-piece
    shape_rotations([(-1, 1), (0, 1), (0, 0), (1, 0)]),
    // J-piece
    shape_rotations([(0, 1), (0, 0), (-1, -1), (0, -1)]),
    // L-piece
    shape_rotations([(0, 1), (0, 0), (0, -1), (1, -1)]),
    // T-piece
    shape_rotations([(0, 1), (-1, 0), (0, 0), (1, 0)]),
];

const fn shape_landing_offsets(shapes: &[PieceShape; Rotation::LEN]) -> [i8; Rotation::LEN] {
    let mut offsets = [0; Rotation::LEN];
    let mut r = 0;
    while r < Rotation::LEN {
        let mut lowest = 0_i8;
        let mut c = 0;
        while c < CELLS_PER_PIECE {
            if shapes[r][c].1 < lowest {
                lowest = shapes[r][c].1;
            }
            c += 1;
        }
        offsets[r] = -lowest;
        r += 1;
    }
    offsets
}

const LANDING_OFFSETS: [[i8; Rotation::LEN]; PieceKind::LEN] = {
    let mut offsets = [[0; Rotation::LEN]; PieceKind::LEN];
    let mut k = 0;
    while k < PieceKind::LEN {
        offsets[k] = shape_landing_offsets(&PIECE_SHAPES[k]);
        k += 1;
    }
    offsets
};

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [PieceKind; PieceKind::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    #[test]
    fn test_every_shape_has_four_distinct_cells() {
        for kind in ALL_KINDS {
            for rotation in Rotation::ALL {
                let cells = kind.cells(rotation);
                assert_eq!(cells.len(), CELLS_PER_PIECE);
                for (i, a) in cells.iter().enumerate() {
                    for b in &cells[i + 1..] {
                        assert_ne!(a, b, "{kind:?} {rotation:?} has duplicate cell {a:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_landing_offsets_put_lowest_cell_on_the_surface() {
        for kind in ALL_KINDS {
            for rotation in Rotation::ALL {
                let lowest = kind.cells(rotation).iter().map(|c| c.1).min().unwrap();
                assert_eq!(
                    kind.landing_offset(rotation),
                    i32::from(-lowest),
                    "{kind:?} {rotation:?}"
                );
            }
        }
    }

    #[test]
    fn test_landing_offset_table() {
        let expected: [(PieceKind, [i32; 4]); PieceKind::LEN] = [
            (PieceKind::I, [2, 0, 1, 0]),
            (PieceKind::O, [1, 1, 0, 0]),
            (PieceKind::S, [0, 1, 1, 1]),
            (PieceKind::Z, [0, 1, 1, 1]),
            (PieceKind::J, [1, 0, 1, 1]),
            (PieceKind::L, [1, 1, 1, 0]),
            (PieceKind::T, [0, 1, 1, 1]),
        ];
        for (kind, offsets) in expected {
            for (rotation, expected_offset) in Rotation::ALL.into_iter().zip(offsets) {
                assert_eq!(
                    kind.landing_offset(rotation),
                    expected_offset,
                    "{kind:?} {rotation:?}"
                );
            }
        }
    }

    #[test]
    fn test_rotation_composition_is_modular() {
        assert_eq!(Rotation::R90.then(Rotation::R180), Rotation::R270);
        assert_eq!(Rotation::R270.then(Rotation::R90), Rotation::R0);
        assert_eq!(Rotation::R180.then(Rotation::R180), Rotation::R0);
        assert_eq!(Rotation::R0.rotated_cw(), Rotation::R90);
        assert_eq!(Rotation::R270.rotated_cw(), Rotation::R0);
    }

    #[test]
    fn test_rotation_delta() {
        assert_eq!(Rotation::R270.delta_from(Rotation::R90), Rotation::R180);
        assert_eq!(Rotation::R0.delta_from(Rotation::R270), Rotation::R90);
        assert_eq!(Rotation::R90.delta_from(Rotation::R90), Rotation::R0);
    }

    #[test]
    fn test_full_turn_restores_the_spawn_shape() {
        for kind in ALL_KINDS {
            let mut cells = kind.spawn_cells();
            for _ in 0..4 {
                for cell in &mut cells {
                    *cell = (cell.1, -cell.0);
                }
            }
            assert_eq!(cells, kind.spawn_cells(), "{kind:?}");
        }
    }

    #[test]
    fn test_predict_cells_offsets_from_anchor() {
        let cells = PieceKind::T.predict_cells(Rotation::R0, Point::new(3, 2));
        assert_eq!(
            cells,
            [
                Point::new(3, 3),
                Point::new(2, 2),
                Point::new(3, 2),
                Point::new(4, 2),
            ]
        );
    }

    #[test]
    fn test_predict_cells_may_leave_the_board() {
        let cells = PieceKind::I.predict_cells(Rotation::R0, Point::new(0, 0));
        assert!(cells.contains(&Point::new(0, -2)));
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in ALL_KINDS {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('X'), None);
        assert_eq!(PieceKind::from_char('i'), None);
    }
}
