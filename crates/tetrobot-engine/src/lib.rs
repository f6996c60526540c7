//! Value types for the tetrobot decision engine: the glass (board) the remote
//! game reports, the seven piece kinds and their rotation geometry, and the
//! command language the game executes.
//!
//! Everything here is a thin data carrier. The decision logic lives in
//! `tetrobot-solver`; the scoring heuristic in `tetrobot-evaluator`.

pub use self::{board::*, command::*, piece::*};

pub mod board;
pub mod command;
pub mod piece;
