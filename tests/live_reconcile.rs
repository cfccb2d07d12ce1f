//! Watch-driven reconciliation against the real notify backends

mod common;

use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use common::{RecordingSink, WAKE_LATENCY, names, set, wait_for_listing};
use dirwatch::{Backend, DirectorySnapshotService, DirectoryWatcher, NotifySource, ServiceState, SnapshotError};
use tempfile::TempDir;

fn service(backend: Backend) -> DirectorySnapshotService<RecordingSink> {
    DirectorySnapshotService::new(RecordingSink::default(), NotifySource::new(backend))
}

#[test]
fn test_listing_converges_after_create_and_delete() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a"), b"a").unwrap();
    fs::write(root.join("b"), b"b").unwrap();
    let mut service = service(Backend::Native);

    service.set_active_directory(root).unwrap();
    assert_eq!(names(service.listing()), set(&["a", "b"]));

    fs::write(root.join("c"), b"c").unwrap();
    assert!(wait_for_listing(&mut service, &set(&["a", "b", "c"])));

    fs::remove_file(root.join("a")).unwrap();
    assert!(wait_for_listing(&mut service, &set(&["b", "c"])));

    assert!(service.sink().errors.is_empty());
    service.shutdown();
}

#[test]
fn test_nested_changes_are_not_watched_but_new_dirs_are_listed() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let mut service = service(Backend::Native);
    service.set_active_directory(root).unwrap();

    fs::create_dir(root.join("sub")).unwrap();
    assert!(wait_for_listing(&mut service, &set(&["sub"])));
    let entry = &service.listing()[0];
    assert!(entry.is_dir());

    fs::write(root.join("sub").join("deep.txt"), b"").unwrap();
    thread::sleep(Duration::from_millis(300));
    service.process_pending();
    assert_eq!(names(service.listing()), set(&["sub"]));
}

#[test]
fn test_switching_directories_stops_old_events() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let mut service = service(Backend::Native);

    service.set_active_directory(first.path()).unwrap();
    service.set_active_directory(second.path()).unwrap();
    let published = service.sink().listings.len();

    fs::write(first.path().join("ignored"), b"").unwrap();
    thread::sleep(Duration::from_millis(500));

    assert_eq!(service.process_pending(), 0);
    assert_eq!(service.sink().listings.len(), published);
    assert!(service.listing().is_empty());

    fs::write(second.path().join("seen"), b"").unwrap();
    assert!(wait_for_listing(&mut service, &set(&["seen"])));
}

#[test]
fn test_unreadable_directory_reports_once() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("kept"), b"").unwrap();
    let mut service = service(Backend::Native);
    service.set_active_directory(temp_dir.path()).unwrap();

    let err = service
        .set_active_directory(temp_dir.path().join("missing"))
        .unwrap_err();

    assert!(matches!(err, SnapshotError::DirectoryUnreadable { .. }));
    assert_eq!(service.sink().errors.len(), 1);
    assert_eq!(names(service.listing()), set(&["kept"]));
    assert!(service.is_watching());
}

#[test]
fn test_deleted_directory_drops_watch_until_refresh() {
    let parent = TempDir::new().unwrap();
    let dir = parent.path().join("watched");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("x"), b"").unwrap();
    let mut service = service(Backend::Native);
    service.set_active_directory(&dir).unwrap();

    fs::remove_dir_all(&dir).unwrap();
    let deadline = Instant::now() + WAKE_LATENCY;
    while service.is_watching() && Instant::now() < deadline {
        if let Ok(request) = service.reload_requests().recv_timeout(Duration::from_millis(100)) {
            service.process(request);
        }
    }
    assert!(!service.is_watching());

    // Late events for the dead watch must not raise more dialogs.
    thread::sleep(Duration::from_millis(300));
    service.process_pending();
    assert_eq!(service.sink().errors.len(), 1);
    assert_eq!(names(service.listing()), set(&["x"]));

    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("new"), b"").unwrap();
    assert!(service.refresh());
    assert!(service.is_watching());
    assert_eq!(names(service.listing()), set(&["new"]));

    fs::write(dir.join("newer"), b"").unwrap();
    assert!(wait_for_listing(&mut service, &set(&["new", "newer"])));
}

#[test]
fn test_shutdown_without_activation() {
    let mut service = service(Backend::Native);
    service.shutdown();
    assert_eq!(service.state(), &ServiceState::Stopped);
    assert!(!service.is_watching());
}

#[test]
fn test_poll_backend_reconciles() {
    let temp_dir = TempDir::new().unwrap();
    let mut service = service(Backend::Poll(Duration::from_millis(100)));
    service.set_active_directory(temp_dir.path()).unwrap();

    fs::write(temp_dir.path().join("polled"), b"").unwrap();
    assert!(wait_for_listing(&mut service, &set(&["polled"])));
}

#[test]
fn test_watch_keeps_firing_after_each_event() {
    let temp_dir = TempDir::new().unwrap();
    let count = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = DirectoryWatcher::new(NotifySource::default());

    let counter = count.clone();
    watcher
        .arm(temp_dir.path(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            let _ = tx.send(());
        })
        .unwrap();

    for i in 0..5 {
        fs::write(temp_dir.path().join(format!("file-{i}")), b"").unwrap();
        rx.recv_timeout(WAKE_LATENCY)
            .unwrap_or_else(|_| panic!("no callback for event {i}"));
        // Let the rest of this write's events land before the next one.
        thread::sleep(Duration::from_millis(50));
        while rx.try_recv().is_ok() {}
    }

    assert!(count.load(Ordering::SeqCst) >= 5);

    watcher.release();
    watcher.release();
    let after_release = count.load(Ordering::SeqCst);
    fs::write(temp_dir.path().join("late"), b"").unwrap();
    thread::sleep(Duration::from_millis(300));
    assert_eq!(count.load(Ordering::SeqCst), after_release);
}

#[test]
fn test_release_from_inside_callback() {
    let temp_dir = TempDir::new().unwrap();
    let (tx, rx) = crossbeam_channel::unbounded();
    let watcher = Arc::new(std::sync::Mutex::new(DirectoryWatcher::new(NotifySource::default())));

    let inner = watcher.clone();
    watcher
        .lock()
        .unwrap()
        .arm(temp_dir.path(), move || {
            // try_lock: the test thread may be holding it; only release when we can.
            if let Ok(mut w) = inner.try_lock() {
                w.release();
            }
            let _ = tx.send(());
        })
        .unwrap();

    fs::write(temp_dir.path().join("trigger"), b"").unwrap();
    rx.recv_timeout(WAKE_LATENCY).unwrap();
    thread::sleep(Duration::from_millis(100));

    assert!(!watcher.lock().unwrap().is_armed());
}
