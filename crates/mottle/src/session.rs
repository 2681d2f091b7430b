#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! [`TerminalSession`] puts the terminal in raw mode on the alternate screen
//! with the cursor hidden, and restores all of it when dropped. Cleanup also
//! runs from a panic hook and, on Unix, from a SIGINT/SIGTERM watcher
//! thread, so the shell is never left in raw mode.
//!
//! # Cleanup Order
//!
//! 1. Reset colours
//! 2. Show cursor
//! 3. Leave alternate screen (if entered)
//! 4. Exit raw mode
//! 5. Flush stdout

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use crossterm::event::Event;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Raw-mode, alternate-screen terminal owned for the lifetime of the viewer.
///
/// Only one session should exist at a time.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen_enabled: bool,
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl TerminalSession {
    /// Enter raw mode, switch to the alternate screen and hide the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be enabled.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        // Registered before raw mode so a failure here leaves nothing to undo.
        #[cfg(unix)]
        let signal_guard = SignalGuard::new()?;

        crossterm::terminal::enable_raw_mode()?;
        tracing::info!("terminal raw mode enabled");

        // From here on, `Drop` restores the terminal on every error path.
        let mut session = Self {
            alternate_screen_enabled: false,
            #[cfg(unix)]
            signal_guard: Some(signal_guard),
        };

        let mut stdout = io::stdout();
        crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
        session.alternate_screen_enabled = true;
        crossterm::execute!(
            stdout,
            crossterm::cursor::Hide,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
        )?;
        tracing::info!("alternate screen enabled");

        Ok(session)
    }

    /// Current terminal size (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Wait up to `timeout` for input. `Ok(false)` on timeout.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    /// Read the next event, blocking until one arrives.
    pub fn read_event(&self) -> io::Result<Event> {
        crossterm::event::read()
    }

    /// Clear the whole screen (after a resize).
    pub fn clear(&self) -> io::Result<()> {
        crossterm::execute!(
            io::stdout(),
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
        )
    }

    fn cleanup(&mut self) {
        #[cfg(unix)]
        let _ = self.signal_guard.take();

        let mut stdout = io::stdout();
        let _ = crossterm::execute!(stdout, crossterm::style::ResetColor);
        let _ = crossterm::execute!(stdout, crossterm::cursor::Show);

        if self.alternate_screen_enabled {
            let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
            tracing::info!("alternate screen disabled");
        }

        let _ = crossterm::terminal::disable_raw_mode();
        tracing::info!("terminal raw mode disabled");

        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(stdout, crossterm::style::ResetColor);
    let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
    let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}

/// Restores the terminal and exits when SIGINT or SIGTERM arrives while the
/// session is live.
#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                tracing::warn!(signal, "termination signal received, cleaning up");
                best_effort_cleanup();
                std::process::exit(128 + signal);
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Runs without a terminal: the guard only touches signal state, which is
    // why it can be set up before raw mode.
    #[cfg(unix)]
    #[test]
    fn signal_guard_starts_and_stops_without_a_terminal() {
        let guard = SignalGuard::new().unwrap();
        assert!(guard.thread.is_some());
        drop(guard);
        // A second guard can be registered once the first is gone.
        drop(SignalGuard::new().unwrap());
    }
}
