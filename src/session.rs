//! One running game as seen by the host: key presses, lifecycle commands,
//! frame ticks, and the event log they feed.

use std::fs::File;
use std::io::{self, Write};

use crate::core::GameState;
use crate::event_log::{EventLog, LogRecord};
use crate::input::HostCommand;
use crate::types::GameAction;

pub struct Session<W: Write = File> {
    game: GameState,
    log: EventLog<W>,
}

impl<W: Write> Session<W> {
    pub fn start(seed: u32, mut log: EventLog<W>) -> io::Result<Self> {
        log.record(&LogRecord::Start { seed })?;
        Ok(Self {
            game: GameState::new(seed),
            log,
        })
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    /// Queue a key press. Presses reach the engine in the order they arrive,
    /// however many land in one frame.
    pub fn press(&mut self, action: GameAction) {
        self.game.enqueue(action);
    }

    /// Handle a lifecycle key. Returns false when the host should exit.
    pub fn command(&mut self, command: HostCommand) -> io::Result<bool> {
        match command {
            HostCommand::Quit => return Ok(false),
            HostCommand::Forfeit => {
                self.game.forfeit();
                self.drain_events()?;
            }
            HostCommand::Reset => {
                self.drain_events()?;
                self.log.record(&LogRecord::Reset {
                    score: self.game.score(),
                    rows: self.game.rows(),
                })?;
                self.game.reset();
            }
        }
        Ok(true)
    }

    /// Advance the game by one frame of `delta_ms`.
    pub fn advance(&mut self, delta_ms: u32) -> io::Result<()> {
        self.game.tick(delta_ms, None);
        self.drain_events()
    }

    fn drain_events(&mut self) -> io::Result<()> {
        if let Some(ev) = self.game.take_last_event() {
            self.log.record(&LogRecord::from(&ev))?;
        }
        if self.game.take_just_lost() {
            self.log.record(&LogRecord::GameOver {
                score: self.game.score(),
                rows: self.game.rows(),
            })?;
        }
        Ok(())
    }

    pub fn into_log(self) -> EventLog<W> {
        self.log
    }
}
