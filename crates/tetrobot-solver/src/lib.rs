//! The decision core of tetrobot.
//!
//! One call per turn: given the board snapshot the game sent,
//! [`PlacementSearch::make_move`] picks the best reachable resting position
//! for the falling piece and translates it into the command sequence the
//! game executes.
//!
//! ```text
//! board snapshot → placement search → best placement → translator → commands
//! ```
//!
//! The search ([`PlacementSearch::best_move`]) clears the falling piece,
//! tries every column × rotation candidate against the settled stack, and
//! scores the legal ones with the fixed-weight evaluator plus a depth bonus
//! for lower resting rows. The translator ([`to_commands`]) turns the winner
//! into rotation, shift, and drop commands relative to the piece's current
//! pose.
//!
//! The whole pipeline is synchronous and deterministic. The board is handed
//! back exactly as received, minus the falling piece's cells; every
//! speculative mutation is paired with an immediate revert.

pub use self::{
    search::{PlacementSearch, commit_placement},
    translator::to_commands,
};

pub mod search;
pub mod translator;

use tetrobot_engine::{PieceKind, Point, Rotation};

/// A final resting pose chosen by the search: the rotation to reach and the
/// anchor cell to land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub rotation: Rotation,
    pub anchor: Point,
}

/// The falling piece fits nowhere: every column × rotation candidate is
/// illegal. The glass is topped out; the caller decides how the session ends.
#[derive(Debug, Clone, Copy, derive_more::Display, derive_more::Error)]
#[display("no legal placement for the {kind:?} piece: the glass is topped out")]
pub struct NoPlacementError {
    pub kind: PieceKind,
}
