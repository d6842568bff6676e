//! Terminal runner (default binary).
//!
//! Polls crossterm for keys until the next frame is due, queues every game key
//! in arrival order, then advances the engine one frame and renders the
//! snapshot through the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use pocket_tetris::config::HostConfig;
use pocket_tetris::core::GameSnapshot;
use pocket_tetris::event_log::EventLog;
use pocket_tetris::input::{handle_key_event, host_command};
use pocket_tetris::session::Session;
use pocket_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = HostConfig::from_env()?;
    let log = EventLog::open(config.log_path.as_deref())
        .with_context(|| format!("opening event log {:?}", config.log_path))?;
    let session = Session::start(config.seed, log)?;

    let view = GameView::default();
    let mut term = TerminalRenderer::for_view(&view);
    term.enter()?;

    let result = run(&mut term, &view, &config, session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(
    term: &mut TerminalRenderer,
    view: &GameView,
    config: &HostConfig,
    mut session: Session,
) -> Result<()> {
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let frame = Duration::from_millis(u64::from(config.tick_ms));
    let mut last_tick = Instant::now();

    loop {
        session.game().snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(command) = host_command(key) {
                        if !session.command(command)? {
                            return Ok(());
                        }
                    } else if let Some(action) = handle_key_event(key) {
                        session.press(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            let delta = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            session.advance(delta)?;
        }
    }
}
