use super::*;
use crate::kernel::services::ports::{RemoteError, RemoteResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::tempdir;

const WAIT: Duration = Duration::from_secs(5);
const QUIET: Duration = Duration::from_millis(400);

#[derive(Default)]
struct FakeRemote {
    delay: Duration,
    fail: bool,
    fetches: AtomicUsize,
    saved: Mutex<Vec<(String, String)>>,
    uploaded: Mutex<Vec<(String, usize)>>,
}

impl FakeRemote {
    fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn outcome(&self) -> RemoteResult<()> {
        if self.fail {
            Err(RemoteError::Status {
                code: 500,
                url: "http://fake".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl DocumentRemote for FakeRemote {
    fn fetch(&self, name: &str) -> RemoteResult<String> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        std::thread::sleep(self.delay);
        self.outcome()?;
        Ok(format!("{name}#{n}"))
    }

    fn save(&self, name: &str, content: &str) -> RemoteResult<()> {
        std::thread::sleep(self.delay);
        self.outcome()?;
        self.saved
            .lock()
            .unwrap()
            .push((name.to_string(), content.to_string()));
        Ok(())
    }

    fn upload(&self, file_name: &str, bytes: &[u8]) -> RemoteResult<()> {
        std::thread::sleep(self.delay);
        self.outcome()?;
        self.uploaded
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes.len()));
        Ok(())
    }

    fn list_uploads(&self) -> RemoteResult<Vec<String>> {
        self.outcome()?;
        Ok(vec!["a.pdf".to_string(), "b.pdf".to_string()])
    }
}

fn runtime_with(remote: Arc<FakeRemote>) -> (AsyncRuntime, Receiver<AppMessage>) {
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx, remote).unwrap();
    (runtime, rx)
}

#[test]
fn fetch_reports_content() {
    let remote = Arc::new(FakeRemote::default());
    let (mut runtime, rx) = runtime_with(remote);

    runtime.run_effect(Effect::FetchDocument {
        name: "outline.txt".to_string(),
    });

    assert_eq!(
        rx.recv_timeout(WAIT).unwrap(),
        AppMessage::DocumentFetched {
            name: "outline.txt".to_string(),
            content: "outline.txt#1".to_string(),
        }
    );
}

#[test]
fn fetch_failure_reports_error() {
    let remote = Arc::new(FakeRemote::failing());
    let (mut runtime, rx) = runtime_with(remote);

    runtime.fetch_document("bubble-map.json".to_string());

    match rx.recv_timeout(WAIT).unwrap() {
        AppMessage::DocumentFetchFailed { name, error } => {
            assert_eq!(name, "bubble-map.json");
            assert!(error.contains("500"), "unexpected error: {error}");
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn newer_fetch_supersedes_in_flight_one() {
    let remote = Arc::new(FakeRemote::slow(Duration::from_millis(200)));
    let (mut runtime, rx) = runtime_with(remote.clone());

    runtime.fetch_document("outline.txt".to_string());
    std::thread::sleep(Duration::from_millis(20));
    runtime.fetch_document("outline.txt".to_string());

    let first = rx.recv_timeout(WAIT).unwrap();
    assert!(matches!(first, AppMessage::DocumentFetched { .. }));
    assert!(
        rx.recv_timeout(QUIET).is_err(),
        "superseded fetch must not report"
    );
}

fn saved_contents(remote: &FakeRemote) -> Vec<String> {
    remote
        .saved
        .lock()
        .unwrap()
        .iter()
        .map(|(_, content)| content.clone())
        .collect()
}

#[test]
fn newest_save_reaches_remote_last() {
    let remote = Arc::new(FakeRemote::slow(Duration::from_millis(200)));
    let (mut runtime, rx) = runtime_with(remote.clone());

    runtime.save_document("outline.txt".to_string(), "a".to_string());
    std::thread::sleep(Duration::from_millis(20));
    runtime.save_document("outline.txt".to_string(), "ab".to_string());
    runtime.save_document("outline.txt".to_string(), "abc".to_string());

    let deadline = std::time::Instant::now() + WAIT;
    while saved_contents(&remote).last().map(String::as_str) != Some("abc") {
        assert!(std::time::Instant::now() < deadline, "newest save never arrived");
        std::thread::sleep(Duration::from_millis(10));
    }
    std::thread::sleep(QUIET);

    let saved = saved_contents(&remote);
    assert_eq!(saved.last().map(String::as_str), Some("abc"));
    assert!(!saved.contains(&"ab".to_string()), "overtaken save was sent: {saved:?}");
    while let Ok(msg) = rx.try_recv() {
        assert!(matches!(msg, AppMessage::DocumentSaved { success: true, .. }));
    }
}

#[test]
fn fetches_of_different_names_both_report() {
    let remote = Arc::new(FakeRemote::slow(Duration::from_millis(50)));
    let (mut runtime, rx) = runtime_with(remote);

    runtime.fetch_document("outline.txt".to_string());
    runtime.fetch_document("bubble-map.json".to_string());

    let mut names: Vec<String> = (0..2)
        .map(|_| match rx.recv_timeout(WAIT).unwrap() {
            AppMessage::DocumentFetched { name, .. } => name,
            other => panic!("unexpected message: {other:?}"),
        })
        .collect();
    names.sort();
    assert_eq!(names, ["bubble-map.json", "outline.txt"]);
}

#[test]
fn cancel_drops_result() {
    let remote = Arc::new(FakeRemote::slow(Duration::from_millis(200)));
    let (mut runtime, rx) = runtime_with(remote);

    runtime.fetch_document("outline.txt".to_string());
    let key = RequestKey::fetch("outline.txt");
    assert!(runtime.is_in_flight(&key));
    assert!(runtime.cancel(&key));
    assert!(!runtime.is_in_flight(&key));
    assert!(!runtime.cancel(&key));

    assert!(rx.recv_timeout(QUIET).is_err());
}

#[test]
fn cancel_all_drops_every_result() {
    let remote = Arc::new(FakeRemote::slow(Duration::from_millis(200)));
    let (mut runtime, rx) = runtime_with(remote);

    runtime.fetch_document("outline.txt".to_string());
    runtime.fetch_document("bubble-map.json".to_string());
    runtime.cancel_all();

    assert!(rx.recv_timeout(QUIET).is_err());
}

#[test]
fn save_reports_success_and_sends_content() {
    let remote = Arc::new(FakeRemote::default());
    let (mut runtime, rx) = runtime_with(remote.clone());

    runtime.run_effect(Effect::SaveDocument {
        name: "outline.txt".to_string(),
        content: "new".to_string(),
    });

    assert_eq!(
        rx.recv_timeout(WAIT).unwrap(),
        AppMessage::DocumentSaved {
            name: "outline.txt".to_string(),
            success: true,
        }
    );
    assert_eq!(
        remote.saved.lock().unwrap().as_slice(),
        [("outline.txt".to_string(), "new".to_string())]
    );
}

#[test]
fn save_failure_reports_unsuccessful() {
    let remote = Arc::new(FakeRemote::failing());
    let (mut runtime, rx) = runtime_with(remote);

    runtime.save_document("outline.txt".to_string(), "x".to_string());

    assert_eq!(
        rx.recv_timeout(WAIT).unwrap(),
        AppMessage::DocumentSaved {
            name: "outline.txt".to_string(),
            success: false,
        }
    );
}

#[test]
fn upload_reads_file_and_reports() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paper.pdf");
    std::fs::write(&path, b"%PDF-1.4 test").unwrap();

    let remote = Arc::new(FakeRemote::default());
    let (mut runtime, rx) = runtime_with(remote.clone());
    runtime.run_effect(Effect::UploadFile { path });

    assert_eq!(
        rx.recv_timeout(WAIT).unwrap(),
        AppMessage::UploadFinished {
            file_name: "paper.pdf".to_string(),
            success: true,
        }
    );
    assert_eq!(
        remote.uploaded.lock().unwrap().as_slice(),
        [("paper.pdf".to_string(), 13)]
    );
}

#[test]
fn uploads_sharing_a_file_name_each_report() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    let first_path = first.path().join("paper.pdf");
    let second_path = second.path().join("paper.pdf");
    std::fs::write(&first_path, b"one").unwrap();
    std::fs::write(&second_path, b"second").unwrap();

    let remote = Arc::new(FakeRemote::slow(Duration::from_millis(100)));
    let (mut runtime, rx) = runtime_with(remote.clone());
    runtime.upload_file(first_path);
    runtime.upload_file(second_path);

    for _ in 0..2 {
        assert_eq!(
            rx.recv_timeout(WAIT).unwrap(),
            AppMessage::UploadFinished {
                file_name: "paper.pdf".to_string(),
                success: true,
            }
        );
    }
    let mut sizes: Vec<usize> = remote
        .uploaded
        .lock()
        .unwrap()
        .iter()
        .map(|(_, len)| *len)
        .collect();
    sizes.sort();
    assert_eq!(sizes, [3, 6]);
}

#[test]
fn upload_of_missing_file_fails_without_calling_remote() {
    let dir = tempdir().unwrap();
    let remote = Arc::new(FakeRemote::default());
    let (mut runtime, rx) = runtime_with(remote.clone());

    runtime.upload_file(dir.path().join("missing.pdf"));

    assert_eq!(
        rx.recv_timeout(WAIT).unwrap(),
        AppMessage::UploadFinished {
            file_name: "missing.pdf".to_string(),
            success: false,
        }
    );
    assert!(remote.uploaded.lock().unwrap().is_empty());
}

#[test]
fn list_uploads_reports_files() {
    let remote = Arc::new(FakeRemote::default());
    let (mut runtime, rx) = runtime_with(remote);

    runtime.run_effect(Effect::ListUploads);

    assert_eq!(
        rx.recv_timeout(WAIT).unwrap(),
        AppMessage::UploadsListed {
            files: vec!["a.pdf".to_string(), "b.pdf".to_string()],
        }
    );
}
