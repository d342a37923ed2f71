//! Stop sources for the scan loop: Unix signals and the stdin quit key.
//!
//! Both only flip the ladder's stop flag through a [`StopHandle`]; neither
//! touches the ladder itself.

use ladder_runtime::StopHandle;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Signals that stop the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// SIGTERM - Graceful termination request.
    Terminate,
    /// SIGINT - Interrupt (Ctrl+C).
    Interrupt,
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalKind::Terminate => write!(f, "SIGTERM"),
            SignalKind::Interrupt => write!(f, "SIGINT"),
        }
    }
}

// Written from the signal handlers; only atomics are async-signal-safe.
static SIGTERM_FLAG: AtomicBool = AtomicBool::new(false);
static SIGINT_FLAG: AtomicBool = AtomicBool::new(false);

/// Forwards SIGINT/SIGTERM to a ladder's stop flag.
///
/// A background thread polls the flags set by the raw handlers and calls
/// [`StopHandle::stop`]. Dropping the handler ends the thread.
#[derive(Debug)]
pub struct SignalHandler {
    finished: Arc<AtomicBool>,
    signal_count: Arc<AtomicU32>,
}

impl SignalHandler {
    /// Register the handlers and start forwarding to `stop`.
    ///
    /// On non-Unix platforms no handlers are registered.
    pub fn install(stop: StopHandle) -> std::io::Result<Self> {
        let handler = Self {
            finished: Arc::new(AtomicBool::new(false)),
            signal_count: Arc::new(AtomicU32::new(0)),
        };

        #[cfg(unix)]
        register_unix_handlers();

        let finished = Arc::clone(&handler.finished);
        let signal_count = Arc::clone(&handler.signal_count);
        thread::Builder::new()
            .name("signal-forwarder".into())
            .spawn(move || {
                while !finished.load(Ordering::Relaxed) {
                    if let Some(kind) = take_signal() {
                        info!(signal = %kind, "Signal received, stopping ladder");
                        signal_count.fetch_add(1, Ordering::Relaxed);
                        stop.stop();
                    }
                    thread::sleep(Duration::from_millis(10));
                }
            })?;

        Ok(handler)
    }

    /// Number of stop signals received so far.
    pub fn signal_count(&self) -> u32 {
        self.signal_count.load(Ordering::Relaxed)
    }
}

impl Drop for SignalHandler {
    fn drop(&mut self) {
        self.finished.store(true, Ordering::Relaxed);
    }
}

fn take_signal() -> Option<SignalKind> {
    if SIGINT_FLAG.swap(false, Ordering::Relaxed) {
        Some(SignalKind::Interrupt)
    } else if SIGTERM_FLAG.swap(false, Ordering::Relaxed) {
        Some(SignalKind::Terminate)
    } else {
        None
    }
}

#[cfg(unix)]
fn register_unix_handlers() {
    use std::os::raw::c_int;

    extern "C" fn sigterm_handler(_: c_int) {
        SIGTERM_FLAG.store(true, Ordering::Relaxed);
    }

    extern "C" fn sigint_handler(_: c_int) {
        SIGINT_FLAG.store(true, Ordering::Relaxed);
    }

    // SAFETY: the handlers only store to static atomics.
    unsafe {
        libc::signal(libc::SIGTERM, sigterm_handler as libc::sighandler_t);
        libc::signal(libc::SIGINT, sigint_handler as libc::sighandler_t);
    }

    debug!("Unix signal handlers registered");
}

/// Returns true if `line` is a quit command (`q` or `Q`).
pub fn is_quit_command(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("q")
}

/// Spawn a thread that stops the ladder when `q` is entered on stdin.
///
/// The thread ends on a quit command or end of input.
pub fn spawn_quit_listener(stop: StopHandle) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("quit-listener".into())
        .spawn(move || listen_for_quit(std::io::stdin().lock(), &stop))
}

fn listen_for_quit(input: impl BufRead, stop: &StopHandle) {
    for line in input.lines() {
        match line {
            Ok(line) if is_quit_command(&line) => {
                info!("Quit requested from console");
                stop.stop();
                return;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Console read failed, quit listener exiting");
                return;
            }
        }
    }
    debug!("Console closed, quit listener exiting");
}
