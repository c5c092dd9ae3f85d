//! A file-backed observable value with a serialized background writer.
//!
//! [`Store`] is the shared machinery behind [`NoteStore`](crate::NoteStore)
//! and [`SettingsStore`](crate::SettingsStore). It holds the current value in
//! a [`tokio::sync::watch`] channel and owns a single writer task that
//! processes commands strictly in order:
//!
//! - a *mutation* applies a transform to the latest persisted value, writes the
//!   whole document to disk and only then publishes it;
//! - a *reload* re-reads the file (after an external change) and publishes the
//!   result when it differs from what observers already hold;
//! - a *flush* completes once everything queued before it has been handled.
//!
//! Because every transform sees the result of the one before it, rapid
//! successive edits compose instead of overwriting each other. Callers never
//! wait for disk I/O unless they call [`Store::flush`].
//!
//! Write failures leave the published value untouched. They are logged,
//! broadcast to [`Store::failures`] subscribers and reported by the next
//! [`Store::flush`]. A transform that panics is treated the same way: the
//! value is left as it was and the writer keeps running.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::{debug, error};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task;

use crate::core::storage::{Document, FileStorage};
use crate::core::watcher::FileWatcher;
use crate::{JotpadError, Result};

const FAILURE_CHANNEL_CAPACITY: usize = 16;

type Transform<T> = Box<dyn FnOnce(&mut T) + Send>;

enum Command<T> {
    Mutate(Transform<T>),
    Reload,
    Flush(oneshot::Sender<Option<StoreFailure>>),
}

/// A write that could not be persisted.
#[derive(Debug, Clone)]
pub struct StoreFailure {
    pub path: PathBuf,
    pub error: Arc<JotpadError>,
}

impl fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}

impl From<StoreFailure> for JotpadError {
    fn from(failure: StoreFailure) -> Self {
        JotpadError::WriteFailed {
            path: failure.path,
            message: failure.error.to_string(),
        }
    }
}

/// Handle to one persisted document. Cloning yields another handle to the
/// same value and writer.
pub struct Store<T: Document> {
    name: &'static str,
    path: PathBuf,
    commands: mpsc::UnboundedSender<Command<T>>,
    state: Arc<watch::Sender<T>>,
    failures: broadcast::Sender<StoreFailure>,
    _watcher: Option<Arc<Mutex<FileWatcher>>>,
}

impl<T: Document> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            path: self.path.clone(),
            commands: self.commands.clone(),
            state: Arc::clone(&self.state),
            failures: self.failures.clone(),
            _watcher: self._watcher.clone(),
        }
    }
}

impl<T: Document> Store<T> {
    /// Loads the document at `storage` (failing closed to the default) and
    /// starts the writer task on the current tokio runtime.
    ///
    /// With `watch_external_changes`, rewrites of the file by other processes
    /// are picked up and republished.
    ///
    /// # Errors
    ///
    /// Returns [`JotpadError::Watch`] or [`JotpadError::Io`] if the external
    /// change watch cannot be installed.
    pub async fn open(
        name: &'static str,
        storage: FileStorage,
        watch_external_changes: bool,
    ) -> Result<Self> {
        let path = storage.path().to_path_buf();
        let loader = storage.clone();
        let initial: T = task::spawn_blocking(move || loader.load::<T>())
            .await
            .map_err(|e| JotpadError::Io(std::io::Error::other(e)))?;

        let (commands, receiver) = mpsc::unbounded_channel();
        let state = Arc::new(watch::Sender::new(initial));
        let (failures, _) = broadcast::channel(FAILURE_CHANNEL_CAPACITY);

        let watcher = if watch_external_changes {
            let reloads = commands.clone();
            let watcher = FileWatcher::watch(&path, move || {
                // The writer is gone once every handle has been dropped.
                let _ = reloads.send(Command::Reload);
            })?;
            Some(Arc::new(Mutex::new(watcher)))
        } else {
            None
        };

        tokio::spawn(run_writer(
            name,
            storage,
            receiver,
            Arc::clone(&state),
            failures.clone(),
        ));
        debug!("{name} store opened at {}", path.display());

        Ok(Self {
            name,
            path,
            commands,
            state,
            failures,
            _watcher: watcher,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the latest successfully persisted value.
    pub fn get(&self) -> T {
        self.state.borrow().clone()
    }

    /// Runs `f` against the current value without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.borrow())
    }

    /// A receiver that starts at the current value and is notified of every
    /// later change, whether from this process or from an external rewrite.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.state.subscribe()
    }

    /// A receiver of write failures occurring after this call.
    pub fn failures(&self) -> broadcast::Receiver<StoreFailure> {
        self.failures.subscribe()
    }

    /// Queues `transform` to run against the latest persisted value. The
    /// result is written in full and then published.
    ///
    /// # Errors
    ///
    /// Returns [`JotpadError::StoreClosed`] if the writer task has stopped.
    pub fn mutate<F>(&self, transform: F) -> Result<()>
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        self.send(Command::Mutate(Box::new(transform)))
    }

    /// Queues a re-read of the backing file.
    pub fn reload(&self) -> Result<()> {
        self.send(Command::Reload)
    }

    /// Waits until every command queued before this call has been processed.
    ///
    /// # Errors
    ///
    /// Returns [`JotpadError::WriteFailed`] describing the most recent failed
    /// write since the previous flush, or [`JotpadError::StoreClosed`] if the
    /// writer task has stopped.
    pub async fn flush(&self) -> Result<()> {
        let (done, wait) = oneshot::channel();
        self.send(Command::Flush(done))?;
        match wait.await {
            Ok(None) => Ok(()),
            Ok(Some(failure)) => Err(failure.into()),
            Err(_) => Err(self.closed()),
        }
    }

    fn send(&self, command: Command<T>) -> Result<()> {
        self.commands.send(command).map_err(|_| self.closed())
    }

    fn closed(&self) -> JotpadError {
        JotpadError::StoreClosed(format!("{} writer has stopped", self.name))
    }
}

async fn run_writer<T: Document>(
    name: &'static str,
    storage: FileStorage,
    mut commands: mpsc::UnboundedReceiver<Command<T>>,
    state: Arc<watch::Sender<T>>,
    failures: broadcast::Sender<StoreFailure>,
) {
    let mut unreported: Option<StoreFailure> = None;

    while let Some(command) = commands.recv().await {
        match command {
            Command::Mutate(transform) => {
                let mut next = state.borrow().clone();
                let applied = panic::catch_unwind(AssertUnwindSafe(|| transform(&mut next)));
                if let Err(payload) = applied {
                    let e = JotpadError::UpdateAborted(panic_message(payload.as_ref()));
                    unreported = Some(report(name, &storage, &failures, e));
                    continue;
                }

                let writer = storage.clone();
                let value = next.clone();
                let written = task::spawn_blocking(move || writer.save(&value))
                    .await
                    .map_err(|e| JotpadError::Io(std::io::Error::other(e)))
                    .and_then(|r| r);

                match written {
                    Ok(()) => {
                        publish(&state, next);
                    }
                    Err(e) => unreported = Some(report(name, &storage, &failures, e)),
                }
            }
            Command::Reload => {
                let reader = storage.clone();
                match task::spawn_blocking(move || reader.load::<T>()).await {
                    Ok(value) => {
                        if publish(&state, value) {
                            debug!("{name}: picked up external change");
                        }
                    }
                    Err(e) => error!("{name}: reload task failed: {e}"),
                }
            }
            Command::Flush(done) => {
                let _ = done.send(unreported.take());
            }
        }
    }
    debug!("{name} writer stopped");
}

/// Logs and broadcasts a failed mutation and hands it back for the next flush.
fn report(
    name: &str,
    storage: &FileStorage,
    failures: &broadcast::Sender<StoreFailure>,
    error: JotpadError,
) -> StoreFailure {
    error!("{name}: could not save {}: {error}", storage.path().display());
    let failure = StoreFailure {
        path: storage.path().to_path_buf(),
        error: Arc::new(error),
    };
    // No subscribers is fine; flush still reports it.
    let _ = failures.send(failure.clone());
    failure
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "update panicked".to_string())
}

/// Publishes `value` if it differs from the current one. Returns whether
/// observers were notified.
fn publish<T: Document>(state: &watch::Sender<T>, value: T) -> bool {
    state.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    })
}
