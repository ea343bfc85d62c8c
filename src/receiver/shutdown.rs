//! Stop signal for the receiver: a single keypress on the terminal, or Ctrl-C.

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::tty::IsTty;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A blocking source of keypresses.
///
/// `wait_for_key` runs on its own OS thread. It returns `Ok(true)` once a key
/// is pressed and `Ok(false)` if no key can arrive or `stop` was set.
pub trait KeySource: Send + 'static {
    fn wait_for_key(&mut self, stop: &AtomicBool) -> io::Result<bool>;

    /// Puts the input device back into its normal state. Called when the
    /// waiting future is dropped, possibly while `wait_for_key` still runs.
    fn restore() {}
}

/// Reads key events from the controlling terminal in raw mode, so any single
/// key counts without waiting for Enter.
#[derive(Debug, Default)]
pub struct TerminalKeys;

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

impl KeySource for TerminalKeys {
    fn wait_for_key(&mut self, stop: &AtomicBool) -> io::Result<bool> {
        if !io::stdin().is_tty() {
            return Ok(false);
        }

        enable_raw_mode()?;
        let _raw = RawModeGuard;

        while !stop.load(Ordering::SeqCst) {
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            // Raw mode swallows SIGINT, so Ctrl-C shows up here as a key too.
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn restore() {
        let _ = disable_raw_mode();
    }
}

/// Sets the stop flag and restores the input device when the waiting future
/// goes away, whichever way it finishes.
struct StopOnDrop {
    stop: Arc<AtomicBool>,
    restore: fn(),
}

impl Drop for StopOnDrop {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        (self.restore)();
    }
}

/// Resolves once a key is pressed on the terminal or Ctrl-C is received.
pub async fn wait_for_keypress() {
    wait_for_key_from(TerminalKeys).await
}

/// Resolves once `keys` reports a keypress or Ctrl-C is received.
///
/// The key source is read on a dedicated thread rather than the blocking
/// pool, so runtime shutdown never waits on it. If the source can never
/// produce a key (stdin is not a terminal), only Ctrl-C resolves this.
pub async fn wait_for_key_from<K: KeySource>(keys: K) {
    let stop = Arc::new(AtomicBool::new(false));
    let _guard = StopOnDrop {
        stop: stop.clone(),
        restore: K::restore,
    };
    let (tx, rx) = oneshot::channel::<()>();

    let spawned = std::thread::Builder::new()
        .name("keypress".into())
        .spawn(move || {
            let mut keys = keys;
            match keys.wait_for_key(&stop) {
                Ok(true) => {
                    let _ = tx.send(());
                }
                Ok(false) => {}
                Err(e) => warn!("Stopped watching for a keypress: {e}"),
            }
        });
    if let Err(e) = spawned {
        warn!("Could not watch for a keypress: {e}");
    }

    let key = async {
        // A dropped sender means no key will ever come: keep waiting for Ctrl-C.
        if rx.await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = key => info!("Key pressed, stopping receiver"),
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => info!("Interrupt received, stopping receiver"),
            Err(e) => warn!("Failed to listen for Ctrl-C: {e}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{KeySource, wait_for_key_from};
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::mpsc;
    use std::time::Duration;
    use tokio::time::timeout;

    /// Reports a keypress straight away.
    struct PressedKey;

    impl KeySource for PressedKey {
        fn wait_for_key(&mut self, _stop: &AtomicBool) -> io::Result<bool> {
            Ok(true)
        }
    }

    /// Behaves like stdin that is not a terminal.
    struct NoTerminal;

    impl KeySource for NoTerminal {
        fn wait_for_key(&mut self, _stop: &AtomicBool) -> io::Result<bool> {
            Ok(false)
        }
    }

    /// Never sees a key; reports on `released` once told to stop.
    struct IdleKeys {
        released: mpsc::Sender<()>,
    }

    impl KeySource for IdleKeys {
        fn wait_for_key(&mut self, stop: &AtomicBool) -> io::Result<bool> {
            while !stop.load(Ordering::SeqCst) {
                std::thread::sleep(Duration::from_millis(5));
            }
            let _ = self.released.send(());
            Ok(false)
        }
    }

    /// Fails the way a broken terminal would.
    struct BrokenTerminal;

    impl KeySource for BrokenTerminal {
        fn wait_for_key(&mut self, _stop: &AtomicBool) -> io::Result<bool> {
            Err(io::Error::other("terminal gone"))
        }
    }

    #[tokio::test]
    async fn test_single_keypress_resolves() {
        let waited = timeout(Duration::from_secs(2), wait_for_key_from(PressedKey)).await;
        assert!(waited.is_ok());
    }

    #[tokio::test]
    async fn test_without_terminal_only_ctrl_c_resolves() {
        let waited = timeout(Duration::from_millis(200), wait_for_key_from(NoTerminal)).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_key_source_error_does_not_resolve() {
        let waited = timeout(Duration::from_millis(200), wait_for_key_from(BrokenTerminal)).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_dropping_wait_releases_key_reader() {
        let (released, rx) = mpsc::channel();

        let waited = timeout(
            Duration::from_millis(50),
            wait_for_key_from(IdleKeys { released }),
        )
        .await;
        assert!(waited.is_err());

        // the timed-out future was dropped, which must stop the reader thread
        assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());
    }
}
