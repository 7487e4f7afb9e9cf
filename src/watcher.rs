//! Polling file watcher with cooperative stop.
//!
//! Re-stats a fixed set of files on a configurable interval and reports
//! mtime changes through events and a callback. Intended to run on its own
//! thread; the only state shared across threads is the stop flag behind
//! [`WatchHandle`]. Cancellation is checked once per poll tick, so a
//! long-running callback delays the next stop check.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime};

use crate::error::{BundlerError, Result};
use crate::events::{names, Dispatcher};

/// Returned by the change callback to keep or stop the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchControl {
    Continue,
    Stop,
}

/// Why the watch loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The change callback asked to stop.
    Callback,
    /// A [`WatchHandle::stop`] call was observed.
    Stop,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Callback => "callback",
            Self::Stop => "stop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Running,
    Stopped,
}

/// Cross-thread stop signal for a running watcher.
#[derive(Debug, Clone)]
pub struct WatchHandle {
    stop: Arc<AtomicBool>,
}

impl WatchHandle {
    /// Request a cooperative stop; observed on the next poll tick.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

struct WatchedFile {
    path: PathBuf,
    mtime: SystemTime,
}

/// Mtime-polling watcher over a fixed file set.
///
/// Lifecycle is Idle → Running → Stopped; files can only be registered
/// while Idle and a watcher cannot be restarted.
pub struct Watcher {
    files: Vec<WatchedFile>,
    interval: Duration,
    stop: Arc<AtomicBool>,
    state: State,
}

impl Watcher {
    pub fn new(interval: Duration) -> Self {
        Self {
            files: Vec::new(),
            interval,
            stop: Arc::new(AtomicBool::new(false)),
            state: State::Idle,
        }
    }

    /// Register a file to watch. Only valid before `start`; the file must
    /// be stat-able at registration time.
    pub fn add_file(&mut self, path: &Path) -> Result<()> {
        if self.state != State::Idle {
            return Err(BundlerError::input(
                "files can only be added before the watcher starts",
            ));
        }
        let mtime = mtime_of(path).ok_or_else(|| BundlerError::InvalidInput {
            message: format!("Cannot watch unreadable file {}", path.display()),
            help: None,
        })?;
        self.files.push(WatchedFile {
            path: path.to_path_buf(),
            mtime,
        });
        Ok(())
    }

    /// Handle for stopping the loop from another thread.
    pub fn handle(&self) -> WatchHandle {
        WatchHandle {
            stop: Arc::clone(&self.stop),
        }
    }

    /// Run the poll loop until the callback or a [`WatchHandle`] stops it.
    ///
    /// Per detected change the recorded mtime is updated before the change
    /// is reported, so one modification is reported exactly once even when
    /// the callback is slower than the poll interval. A file that vanishes
    /// counts as changed, with a synthesized current-time mtime.
    pub fn start<F>(&mut self, events: &mut Dispatcher, mut on_change: F) -> Result<StopReason>
    where
        F: FnMut(&Path, SystemTime, SystemTime) -> WatchControl,
    {
        if self.state != State::Idle {
            return Err(BundlerError::input("watcher has already been started"));
        }
        self.state = State::Running;
        events.emit(
            names::WATCHER_START,
            &[("files", &self.files.len().to_string())],
        );

        let reason = 'poll: loop {
            if self.stop.load(Ordering::SeqCst) {
                break StopReason::Stop;
            }
            thread::sleep(self.interval);
            for file in &mut self.files {
                let current = mtime_of(&file.path).unwrap_or_else(SystemTime::now);
                if current == file.mtime {
                    continue;
                }
                let previous = file.mtime;
                file.mtime = current;
                events.emit(
                    names::WATCHER_FILE_MODIFIED,
                    &[("path", &file.path.display().to_string())],
                );
                if on_change(&file.path, previous, current) == WatchControl::Stop {
                    break 'poll StopReason::Callback;
                }
            }
        };

        self.state = State::Stopped;
        events.emit(names::WATCHER_STOP, &[("reason", reason.as_str())]);
        Ok(reason)
    }
}

fn mtime_of(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::tempdir;

    fn quick_watcher() -> Watcher {
        Watcher::new(Duration::from_millis(5))
    }

    #[test]
    fn test_add_file_requires_readable_file() {
        let dir = tempdir().unwrap();
        let mut watcher = quick_watcher();
        assert!(matches!(
            watcher.add_file(&dir.path().join("ghost.css")),
            Err(BundlerError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_callback_stop_ends_loop_with_callback_reason() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("app.css");
        fs::write(&file, "body {}").unwrap();

        let mut watcher = quick_watcher();
        watcher.add_file(&file).unwrap();
        // removal counts as a change on the next poll
        fs::remove_file(&file).unwrap();

        let mut events = Dispatcher::new();
        let reason = watcher
            .start(&mut events, |_, _, _| WatchControl::Stop)
            .unwrap();
        assert_eq!(reason, StopReason::Callback);
    }

    #[test]
    fn test_handle_stop_ends_loop_with_stop_reason() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("app.css");
        fs::write(&file, "body {}").unwrap();

        let mut watcher = quick_watcher();
        watcher.add_file(&file).unwrap();
        let handle = watcher.handle();
        let stopper = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(25));
            handle.stop();
        });

        let mut events = Dispatcher::new();
        let reason = watcher
            .start(&mut events, |_, _, _| WatchControl::Continue)
            .unwrap();
        stopper.join().unwrap();
        assert_eq!(reason, StopReason::Stop);
    }

    #[test]
    fn test_modification_reported_exactly_once() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("app.css");
        fs::write(&file, "body {}").unwrap();

        let mut watcher = Watcher::new(Duration::from_millis(5));
        watcher.add_file(&file).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        fs::write(&file, "body { margin: 0 }").unwrap();

        let count = Rc::new(RefCell::new(0u32));
        let handle = watcher.handle();
        let stopper = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(80));
            handle.stop();
        });
        let mut events = Dispatcher::new();
        {
            let count = Rc::clone(&count);
            watcher
                .start(&mut events, move |_, prev, curr| {
                    assert_ne!(prev, curr);
                    *count.borrow_mut() += 1;
                    WatchControl::Continue
                })
                .unwrap();
        }
        stopper.join().unwrap();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_lifecycle_events_and_stop_reason_payload() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("app.css");
        fs::write(&file, "body {}").unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut events = Dispatcher::new();
        for name in [
            names::WATCHER_START,
            names::WATCHER_FILE_MODIFIED,
            names::WATCHER_STOP,
        ] {
            let seen = Rc::clone(&seen);
            events.on(name, move |event| {
                let detail = event
                    .get("reason")
                    .or_else(|| event.get("path"))
                    .unwrap_or_default()
                    .to_string();
                seen.borrow_mut().push((event.name().to_string(), detail));
            });
        }

        let mut watcher = quick_watcher();
        watcher.add_file(&file).unwrap();
        fs::remove_file(&file).unwrap();
        watcher
            .start(&mut events, |_, _, _| WatchControl::Stop)
            .unwrap();

        let seen = seen.borrow();
        assert_eq!(seen[0].0, "watcher.start");
        assert_eq!(seen[1].0, "watcher.file.modified");
        assert!(seen[1].1.ends_with("app.css"));
        assert_eq!(seen[2], ("watcher.stop".to_string(), "callback".to_string()));
    }

    #[test]
    fn test_watcher_cannot_be_restarted() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("app.css");
        fs::write(&file, "body {}").unwrap();

        let mut watcher = quick_watcher();
        watcher.add_file(&file).unwrap();
        watcher.handle().stop();
        let mut events = Dispatcher::new();
        watcher
            .start(&mut events, |_, _, _| WatchControl::Continue)
            .unwrap();

        assert!(matches!(
            watcher.start(&mut events, |_, _, _| WatchControl::Continue),
            Err(BundlerError::InvalidInput { .. })
        ));
        assert!(matches!(
            watcher.add_file(&file),
            Err(BundlerError::InvalidInput { .. })
        ));
    }
}
