use glam::Vec2;

use crate::api::types::BodyId;

/// Commands the input layer sends to the simulation.
/// They are applied between frames, never inside a substep.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start lining up a shot on a ball.
    Aim { body: BodyId },
    /// Fire the aimed ball along `drag` (ball toward pointer) and let go.
    Shoot { drag: Vec2 },
    /// Pick a ball up to move it by hand.
    Grab { body: BodyId },
    /// Move the grabbed ball.
    DragTo { position: Vec2 },
    /// Let go of whatever is held without shooting.
    Release,
    /// Put every ball back in its starting spot.
    Reset,
    /// Put every ball at the given positions, one per body.
    ResetLayout(Vec<Vec2>),
    /// Overwrite the velocities of the listed balls.
    Launch(Vec<(BodyId, Vec2)>),
    /// Shift every ball on the table by `offset`.
    Scatter { offset: Vec2 },
}

/// A queue of pending commands.
/// The host pushes commands as input arrives; the simulation drains them
/// once per frame.
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Drain all pending commands. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Iterate over pending commands without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
