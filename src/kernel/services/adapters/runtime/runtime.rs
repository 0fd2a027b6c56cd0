use super::message::AppMessage;
use crate::kernel::services::ports::{DocumentRemote, RequestKey, RequestOp};
use crate::kernel::Effect;
use rustc_hash::FxHashMap;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Runs remote calls on a tokio runtime, one live task per [`RequestKey`].
///
/// Spawning a fetch or listing under a key whose previous task is still running aborts that task
/// first, so a superseded request never reports back. Saves are chained instead: at most one
/// POST per name is in flight, and queued saves that a newer one overtook are skipped, so the
/// newest content is always the last to reach the service. Every upload gets its own key.
pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
    remote: Arc<dyn DocumentRemote>,
    tasks: FxHashMap<RequestKey, JoinHandle<()>>,
    save_generations: FxHashMap<String, Arc<AtomicU64>>,
    upload_seq: u64,
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>, remote: Arc<dyn DocumentRemote>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self {
            runtime,
            tx,
            remote,
            tasks: FxHashMap::default(),
            save_generations: FxHashMap::default(),
            upload_seq: 0,
        })
    }

    pub fn tokio_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    pub fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchDocument { name } => self.fetch_document(name),
            Effect::SaveDocument { name, content } => self.save_document(name, content),
            Effect::UploadFile { path } => self.upload_file(path),
            Effect::ListUploads => self.list_uploads(),
        }
    }

    pub fn fetch_document(&mut self, name: String) {
        let tx = self.tx.clone();
        let remote = Arc::clone(&self.remote);
        let key = RequestKey::fetch(name.clone());
        self.spawn_keyed(key, async move {
            let remote_name = name.clone();
            let result =
                tokio::task::spawn_blocking(move || remote.fetch(&remote_name)).await;
            let msg = match result {
                Ok(Ok(content)) => AppMessage::DocumentFetched { name, content },
                Ok(Err(e)) => AppMessage::DocumentFetchFailed {
                    name,
                    error: e.to_string(),
                },
                Err(e) => AppMessage::DocumentFetchFailed {
                    name,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(msg);
        });
    }

    pub fn save_document(&mut self, name: String, content: String) {
        let tx = self.tx.clone();
        let remote = Arc::clone(&self.remote);
        let key = RequestKey::save(name.clone());
        let generation = Arc::clone(self.save_generations.entry(name.clone()).or_default());
        let ticket = generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.tasks.retain(|_, handle| !handle.is_finished());
        let prev = self.tasks.remove(&key);
        let handle = self.runtime.spawn(async move {
            // The blocking POST of an earlier save cannot be aborted; wait it out.
            if let Some(prev) = prev {
                let _ = prev.await;
            }
            if generation.load(Ordering::SeqCst) != ticket {
                tracing::debug!(name = %name, ticket, "skipping superseded save");
                return;
            }
            let remote_name = name.clone();
            let result =
                tokio::task::spawn_blocking(move || remote.save(&remote_name, &content)).await;
            let success = match result {
                Ok(Ok(())) => true,
                Ok(Err(e)) => {
                    tracing::warn!(name = %name, error = %e, "save failed");
                    false
                }
                Err(e) => {
                    tracing::warn!(name = %name, error = %e, "save task failed");
                    false
                }
            };
            let _ = tx.send(AppMessage::DocumentSaved { name, success });
        });
        self.tasks.insert(key, handle);
    }

    pub fn upload_file(&mut self, path: PathBuf) {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let tx = self.tx.clone();
        let remote = Arc::clone(&self.remote);
        self.upload_seq += 1;
        let key = RequestKey::new(
            format!("{}#{}", path.display(), self.upload_seq),
            RequestOp::Upload,
        );
        self.spawn_keyed(key, async move {
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "upload read failed");
                    let _ = tx.send(AppMessage::UploadFinished {
                        file_name,
                        success: false,
                    });
                    return;
                }
            };
            let remote_name = file_name.clone();
            let result =
                tokio::task::spawn_blocking(move || remote.upload(&remote_name, &bytes)).await;
            let success = match result {
                Ok(Ok(())) => true,
                Ok(Err(e)) => {
                    tracing::warn!(file = %file_name, error = %e, "upload failed");
                    false
                }
                Err(e) => {
                    tracing::warn!(file = %file_name, error = %e, "upload task failed");
                    false
                }
            };
            let _ = tx.send(AppMessage::UploadFinished { file_name, success });
        });
    }

    pub fn list_uploads(&mut self) {
        let tx = self.tx.clone();
        let remote = Arc::clone(&self.remote);
        self.spawn_keyed(RequestKey::list(), async move {
            let result = tokio::task::spawn_blocking(move || remote.list_uploads()).await;
            let msg = match result {
                Ok(Ok(files)) => AppMessage::UploadsListed { files },
                Ok(Err(e)) => AppMessage::UploadsListFailed {
                    error: e.to_string(),
                },
                Err(e) => AppMessage::UploadsListFailed {
                    error: e.to_string(),
                },
            };
            let _ = tx.send(msg);
        });
    }

    fn spawn_keyed<F>(&mut self, key: RequestKey, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.retain(|_, handle| !handle.is_finished());
        if let Some(prev) = self.tasks.remove(&key) {
            tracing::debug!(name = %key.name, op = ?key.op, "superseding in-flight request");
            prev.abort();
        }
        let handle = self.runtime.spawn(task);
        self.tasks.insert(key, handle);
    }

    pub fn is_in_flight(&self, key: &RequestKey) -> bool {
        self.tasks.get(key).is_some_and(|h| !h.is_finished())
    }

    pub fn cancel(&mut self, key: &RequestKey) -> bool {
        match self.tasks.remove(key) {
            Some(handle) => {
                let live = !handle.is_finished();
                handle.abort();
                live
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/async_runtime.rs"]
mod tests;
