use std::fmt;

use crate::piece::Rotation;

/// One atomic instruction for the remote game. `Display` renders the wire
/// name the game protocol expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Command {
    #[display("ROTATE_CLOCKWISE_90")]
    RotateCw90,
    #[display("ROTATE_CLOCKWISE_180")]
    RotateCw180,
    #[display("ROTATE_CLOCKWISE_270")]
    RotateCw270,
    #[display("LEFT")]
    Left,
    #[display("RIGHT")]
    Right,
    #[display("DOWN")]
    Drop,
}

impl Command {
    /// The single rotate command realizing a clockwise rotation delta, or
    /// `None` for the null rotation. 270° is one command, not three 90° steps.
    #[must_use]
    pub const fn rotate(delta: Rotation) -> Option<Self> {
        match delta {
            Rotation::R0 => None,
            Rotation::R90 => Some(Command::RotateCw90),
            Rotation::R180 => Some(Command::RotateCw180),
            Rotation::R270 => Some(Command::RotateCw270),
        }
    }
}

/// An ordered sequence of commands, executed front to back by the game.
///
/// Built by chaining ([`then`](CommandSequence::then)); chaining is plain
/// concatenation, so it preserves order and is associative. `Display` joins
/// the wire names with `,`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSequence(Vec<Command>);

impl CommandSequence {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends `command`, returning the extended sequence.
    #[must_use]
    pub fn then(mut self, command: Command) -> Self {
        self.0.push(command);
        self
    }

    pub fn push(&mut self, command: Command) {
        self.0.push(command);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Command] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Command> + '_ {
        self.0.iter().copied()
    }
}

impl IntoIterator for CommandSequence {
    type Item = Command;
    type IntoIter = std::vec::IntoIter<Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CommandSequence {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for CommandSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{command}")?;
        }
        Ok(())
    }
}
