//! Keyboard and resize events for the race session.

use crate::error::SessionError;
use crate::session::SessionEvent;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Maps a terminal event to what the session should do with it.
///
/// ESC, `q` and Ctrl+C quit; resizes redraw; everything else is ignored.
pub fn session_event(event: &Event) -> Option<SessionEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(SessionEvent::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(SessionEvent::Quit)
            }
            _ => None,
        },
        Event::Resize(_, _) => Some(SessionEvent::Resize),
        _ => None,
    }
}

/// Reads terminal events on a background thread until dropped.
#[derive(Debug)]
pub struct InputListener {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputListener {
    /// Starts forwarding [`SessionEvent`]s to `events`.
    pub fn spawn(events: mpsc::UnboundedSender<SessionEvent>) -> Result<Self, SessionError> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("tui-input".to_string())
            .spawn(move || listen(&flag, &events))?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }
}

fn listen(stop: &AtomicBool, events: &mpsc::UnboundedSender<SessionEvent>) {
    while !stop.load(Ordering::Relaxed) {
        match event::poll(POLL_INTERVAL) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                warn!(error = %e, "Failed to poll terminal events");
                return;
            }
        }

        let event = match event::read() {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "Failed to read terminal event");
                return;
            }
        };

        if let Some(session_event) = session_event(&event) {
            debug!(?session_event, "Input event");
            if events.send(session_event).is_err() {
                return;
            }
        }
    }
}

impl Drop for InputListener {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
