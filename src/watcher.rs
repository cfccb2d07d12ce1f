//! Single-directory change watching.
//!
//! A [`DirectoryWatcher`] owns at most one live subscription and one worker
//! thread. The worker blocks until the subscription reports a batch of
//! changes, invokes the caller's callback once for the batch, then goes back
//! to waiting on the same subscription.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TryRecvError, select};
use notify::{Config, Event, EventKind, PollWatcher, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, trace, warn};

use crate::error::WatchError;
use crate::types::{ChangeKind, ChangeNotice};

/// Something that can register interest in a directory's immediate children.
///
/// Dropping the returned subscription must release the registration.
pub trait EventSource {
    type Subscription: Send + 'static;

    fn subscribe(&self, dir: &Path, sink: Sender<ChangeNotice>) -> Result<Self::Subscription, WatchError>;
}

/// Which `notify` backend to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// inotify / FSEvents / ReadDirectoryChangesW.
    Native,
    /// Periodic rescans, for filesystems without native notifications.
    Poll(Duration),
}

/// [`EventSource`] backed by the `notify` crate.
#[derive(Clone, Copy, Debug)]
pub struct NotifySource {
    backend: Backend,
}

impl NotifySource {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }
}

impl Default for NotifySource {
    fn default() -> Self {
        Self::new(Backend::Native)
    }
}

impl EventSource for NotifySource {
    type Subscription = Box<dyn Watcher + Send>;

    fn subscribe(&self, dir: &Path, sink: Sender<ChangeNotice>) -> Result<Self::Subscription, WatchError> {
        let subscribe_err = |source| WatchError::Subscribe {
            path: dir.to_path_buf(),
            source,
        };

        let handler = move |res: notify::Result<Event>| {
            if let Some(notice) = to_notice(res) {
                // The receiver is gone once the watch is released.
                let _ = sink.send(notice);
            }
        };

        let mut watcher: Box<dyn Watcher + Send> = match self.backend {
            Backend::Native => Box::new(RecommendedWatcher::new(handler, Config::default()).map_err(subscribe_err)?),
            Backend::Poll(interval) => Box::new(
                PollWatcher::new(handler, Config::default().with_poll_interval(interval)).map_err(subscribe_err)?,
            ),
        };

        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(subscribe_err)?;

        debug!("Subscribed to {} ({:?})", dir.display(), self.backend);
        Ok(watcher)
    }
}

fn to_notice(res: notify::Result<Event>) -> Option<ChangeNotice> {
    let event = match res {
        Ok(event) => event,
        Err(e) => {
            warn!("Watch backend error, forcing rescan: {}", e);
            return Some(ChangeNotice::rescan());
        }
    };

    if event.need_rescan() {
        return Some(ChangeNotice::rescan());
    }

    let kind = match event.kind {
        EventKind::Create(_) => ChangeKind::Create,
        EventKind::Remove(_) => ChangeKind::Remove,
        EventKind::Modify(_) | EventKind::Any | EventKind::Other => ChangeKind::Modify,
        // Opens and reads never change a listing.
        EventKind::Access(_) => return None,
    };

    Some(ChangeNotice {
        kind,
        paths: event.paths,
    })
}

struct ActiveWatch<T> {
    path: PathBuf,
    subscription: T,
    cancel: Sender<()>,
    worker: JoinHandle<()>,
}

/// Watches exactly one directory at a time.
pub struct DirectoryWatcher<S: EventSource = NotifySource> {
    source: S,
    active: Option<ActiveWatch<S::Subscription>>,
}

impl<S: EventSource> DirectoryWatcher<S> {
    pub fn new(source: S) -> Self {
        Self { source, active: None }
    }

    /// Point the watcher at `path`.
    ///
    /// Any previous subscription is fully released (its worker joined) before
    /// the new one is opened. `on_change` runs on the watch thread, once per
    /// batch of changes, so it should only hand work off to another thread.
    ///
    /// On error nothing is armed and the watcher can be armed again later.
    pub fn arm<F>(&mut self, path: &Path, on_change: F) -> Result<(), WatchError>
    where
        F: FnMut() + Send + 'static,
    {
        self.release();

        let metadata = fs::metadata(path).map_err(|source| WatchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(WatchError::NotADirectory(path.to_path_buf()));
        }

        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        let subscription = self.source.subscribe(path, event_tx)?;

        let (cancel_tx, cancel_rx) = crossbeam_channel::bounded(1);
        let worker = thread::Builder::new()
            .name("dir-watch".to_string())
            .spawn(move || watch_loop(event_rx, cancel_rx, on_change))
            .map_err(WatchError::Spawn)?;

        debug!("Armed watch on {}", path.display());
        self.active = Some(ActiveWatch {
            path: path.to_path_buf(),
            subscription,
            cancel: cancel_tx,
            worker,
        });
        Ok(())
    }

    /// Tear down the current subscription and stop its worker. Idempotent.
    pub fn release(&mut self) {
        let Some(ActiveWatch {
            path,
            subscription,
            cancel,
            worker,
        }) = self.active.take()
        else {
            return;
        };

        drop(subscription);
        let _ = cancel.send(());

        if worker.thread().id() == thread::current().id() {
            // Released from inside the callback; the loop sees the cancel on its next turn.
            debug!("Detached watch loop for {}", path.display());
            return;
        }

        if worker.join().is_err() {
            warn!("Watch loop for {} panicked", path.display());
        }
        debug!("Released watch on {}", path.display());
    }

    pub fn is_armed(&self) -> bool {
        self.active.is_some()
    }

    pub fn watched_path(&self) -> Option<&Path> {
        self.active.as_ref().map(|a| a.path.as_path())
    }
}

impl<S: EventSource> Drop for DirectoryWatcher<S> {
    fn drop(&mut self) {
        self.release();
    }
}

fn watch_loop<F: FnMut()>(events: Receiver<ChangeNotice>, cancel: Receiver<()>, mut on_change: F) {
    'wait: loop {
        let first = select! {
            recv(cancel) -> _ => break 'wait,
            recv(events) -> notice => match notice {
                Ok(notice) => notice,
                Err(_) => break 'wait,
            },
        };

        // One callback per wake: fold in everything already queued.
        let mut batch = 1usize;
        let mut rescan = first.kind == ChangeKind::Rescan;
        while let Ok(notice) = events.try_recv() {
            batch += 1;
            rescan |= notice.kind == ChangeKind::Rescan;
        }

        // A wake racing with release must not call back.
        if !matches!(cancel.try_recv(), Err(TryRecvError::Empty)) {
            break 'wait;
        }

        trace!("Watch wake: {} notices starting with {:?} {:?} (rescan: {})", batch, first.kind, first.paths, rescan);
        on_change();
    }
    trace!("Watch loop exited");
}
