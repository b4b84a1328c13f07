//! The display controller.
//!
//! A session has two tasks. The input-polling task owns the [`Screen`] and
//! blocks on the [`EventSource`]; every resize triggers a complete re-layout
//! from the [`Sections`], with no state carried over from the previous frame.
//! The main task waits on a one-shot cancellation signal, fired when the user
//! presses `q` or `Q`, then takes the screen back and releases it.
//!
//! ```text
//!   acquire ──> Running ──(q / Q / end of events)──> Draining ──> release
//!                 │  ▲
//!                 └──┘ resize: resync, clear, draw
//!                      Ctrl-L: resync, present
//! ```

use tokio::sync::oneshot;

use super::*;
use crate::{layout::Layout, render::draw_screen};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
  /// Reacting to events and redrawing
  Running,
  /// Quit was requested; the screen is about to be released
  Draining,
}

/// Owns the screen and the sections for one session.
#[derive(Debug)]
pub struct Display<S> {
  /// Where frames are drawn
  screen:   S,
  /// Content to lay out, in label order
  sections: Sections,
  /// Spacing between panels and edges
  margin:   u16,
  /// Lifecycle state
  state:    DisplayState,
}

impl<S: Screen> Display<S> {
  /// Creates a running display. Nothing is drawn until [`Display::layout`].
  pub fn new(screen: S, sections: Sections, margin: u16) -> Self {
    Self { screen, sections, margin, state: DisplayState::Running }
  }

  /// Current lifecycle state.
  pub fn state(&self) -> DisplayState { self.state }

  /// The screen being drawn on.
  pub fn screen(&self) -> &S { &self.screen }

  /// Gives back the screen.
  pub fn into_screen(self) -> S { self.screen }

  /// Runs a full layout pass: clear, draw every panel that fits, present.
  pub fn layout(&mut self) -> Result<Layout> {
    self.screen.clear();
    let layout = draw_screen(&mut self.screen, &self.sections, self.margin);
    self.screen.present()?;
    Ok(layout)
  }

  /// Applies one event and returns the resulting state.
  pub fn handle_event(&mut self, event: SurfaceEvent) -> Result<DisplayState> {
    match event {
      SurfaceEvent::Resize(viewport) => {
        info!("Resized to {}x{}", viewport.width, viewport.height);
        self.screen.resize(viewport)?;
        self.screen.resync()?;
        self.layout()?;
      },
      SurfaceEvent::Redraw => {
        debug!("Redraw requested");
        self.screen.resync()?;
        self.screen.present()?;
      },
      SurfaceEvent::Key('q' | 'Q') => {
        info!("Quit requested");
        self.state = DisplayState::Draining;
      },
      SurfaceEvent::Key(_) | SurfaceEvent::Other => {},
    }
    Ok(self.state)
  }

  /// Reacts to `events` until quit is requested or the events run out.
  ///
  /// `quit` is fired on the way out, also when polling stops with an error.
  pub fn poll_events(&mut self, events: &mut impl EventSource, quit: oneshot::Sender<()>) -> Result<()> {
    let polled = self.poll_until_quit(events);
    self.state = DisplayState::Draining;
    // The receiver is gone only if the main task stopped waiting.
    let _ = quit.send(());
    polled
  }

  /// Event loop body of [`Display::poll_events`].
  fn poll_until_quit(&mut self, events: &mut impl EventSource) -> Result<()> {
    while self.state == DisplayState::Running {
      match events.next_event()? {
        Some(event) => {
          trace!("Event: {event:?}");
          self.handle_event(event)?;
        },
        None => {
          debug!("Event source closed");
          break;
        },
      }
    }
    Ok(())
  }
}

/// Runs a complete session and releases `screen` when it ends.
///
/// The initial layout is drawn on the calling task. Event polling then moves
/// to a blocking task while this task waits for the cancellation signal. The
/// screen is released even when polling failed; the polling error is
/// returned afterwards. If the polling task panics the screen is dropped
/// during unwinding instead and [`PanelError::Task`] is returned, so screens
/// must restore the display in `Drop` too.
pub async fn run<S, E>(screen: S, mut events: E, sections: Sections, margin: u16) -> Result<()>
where
  S: Screen + Send + 'static,
  E: EventSource + Send + 'static, {
  let mut display = Display::new(screen, sections, margin);
  if let Err(e) = display.layout() {
    display.into_screen().release()?;
    return Err(e);
  }

  let (quit_tx, quit_rx) = oneshot::channel();
  let input = tokio::task::spawn_blocking(move || {
    let polled = display.poll_events(&mut events, quit_tx);
    (display, polled)
  });

  if quit_rx.await.is_err() {
    warn!("Input task ended without signalling quit");
  }
  debug!("Draining display");

  let (display, polled) = input.await?;
  display.into_screen().release()?;
  polled
}
