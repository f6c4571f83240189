//! Paddle input published from other threads
//!
//! The engine owns all round state on the simulation thread. Hosts that read
//! input elsewhere hand out [`PaddleSender`]s; the engine drains the queue at
//! the start of each tick.

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};

/// Pending commands kept before new input is dropped
const QUEUE_CAPACITY: usize = 256;

/// A paddle update from the input side
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaddleCommand {
    /// Absolute left-edge position
    SetPosition(f32),
    /// Relative shift
    Nudge(f32),
}

/// Cloneable handle for publishing paddle commands
#[derive(Debug, Clone)]
pub struct PaddleSender {
    sender: Sender<PaddleCommand>,
}

impl PaddleSender {
    /// Queue a command. Returns false if the queue is full or the engine is gone.
    pub fn send(&self, command: PaddleCommand) -> bool {
        match self.sender.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                log::warn!("Paddle input queue full, dropping {:?}", command);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    pub fn set_position(&self, x: f32) -> bool {
        self.send(PaddleCommand::SetPosition(x))
    }

    pub fn nudge(&self, dx: f32) -> bool {
        self.send(PaddleCommand::Nudge(dx))
    }
}

/// Engine side of the paddle queue
#[derive(Debug)]
pub struct InputQueue {
    sender: Sender<PaddleCommand>,
    receiver: Receiver<PaddleCommand>,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    pub fn new() -> Self {
        let (sender, receiver) = bounded(QUEUE_CAPACITY);
        Self { sender, receiver }
    }

    /// A new handle for an input thread
    pub fn sender(&self) -> PaddleSender {
        PaddleSender {
            sender: self.sender.clone(),
        }
    }

    /// Take every queued command, oldest first
    pub fn drain(&self) -> impl Iterator<Item = PaddleCommand> + '_ {
        self.receiver.try_iter()
    }
}
