//! Turns a chosen placement into the commands that reach it.

use tetrobot_engine::{Command, CommandSequence, Rotation};

use crate::Placement;

/// Builds the command sequence realizing `placement` from the piece's
/// current pose: one rotate command for the rotation delta (none when it is
/// zero), one shift per column of horizontal distance, then the terminal
/// drop. Shifts are never batched; the game consumes them one cell at a time.
#[must_use]
pub fn to_commands(
    current_rotation: Rotation,
    current_x: i32,
    placement: &Placement,
) -> CommandSequence {
    let mut commands = CommandSequence::new();
    if let Some(rotate) = Command::rotate(placement.rotation.delta_from(current_rotation)) {
        commands.push(rotate);
    }

    let mut x = current_x;
    while x != placement.anchor.x {
        if x > placement.anchor.x {
            commands.push(Command::Left);
            x -= 1;
        } else {
            commands.push(Command::Right);
            x += 1;
        }
    }

    commands.then(Command::Drop)
}
