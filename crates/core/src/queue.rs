//! Action queue - FIFO of pending player intents
//!
//! Actions can arrive two ways:
//! - [`ActionQueue::push`] from the same thread that runs the tick loop;
//! - an [`ActionSender`] handed to an input thread (single producer).
//!
//! Both feed one ordered queue. The consumer side (`pop`, `clear`) is only
//! used from inside the tick. Senders never validate game state; that happens
//! when the action is dequeued.

use std::collections::VecDeque;
use std::sync::mpsc;

use crate::types::GameAction;

/// Cloneable, thread-safe handle for appending actions.
#[derive(Debug, Clone)]
pub struct ActionSender {
    tx: mpsc::Sender<GameAction>,
}

impl ActionSender {
    /// Append an action. Returns false if the game has been dropped.
    pub fn send(&self, action: GameAction) -> bool {
        self.tx.send(action).is_ok()
    }
}

#[derive(Debug)]
pub struct ActionQueue {
    pending: VecDeque<GameAction>,
    inbox: mpsc::Receiver<GameAction>,
    tx: mpsc::Sender<GameAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        let (tx, inbox) = mpsc::channel();
        Self {
            pending: VecDeque::new(),
            inbox,
            tx,
        }
    }

    pub fn sender(&self) -> ActionSender {
        ActionSender {
            tx: self.tx.clone(),
        }
    }

    pub fn push(&mut self, action: GameAction) {
        self.collect_inbox();
        self.pending.push_back(action);
    }

    /// Take the oldest pending action.
    pub fn pop(&mut self) -> Option<GameAction> {
        self.collect_inbox();
        self.pending.pop_front()
    }

    /// Discard everything pending, including actions sent but not yet collected.
    pub fn clear(&mut self) {
        self.collect_inbox();
        self.pending.clear();
    }

    pub fn len(&mut self) -> usize {
        self.collect_inbox();
        self.pending.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    // Channel order is send order, and everything in the channel was sent after
    // what is already pending, so appending keeps the queue FIFO.
    fn collect_inbox(&mut self) {
        while let Ok(action) = self.inbox.try_recv() {
            self.pending.push_back(action);
        }
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
