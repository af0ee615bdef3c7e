//! Scanner collaborators
//!
//! A scanner lists a directory and answers through a reply callback. The
//! callback may run on another thread; consumers forward it into their own
//! channel and apply it on the owning thread.

use crate::{list_directory, FileEntry, FsError, Result, ScanOptions};
use crossbeam_channel::{unbounded, Sender};
use std::thread::{self, JoinHandle};

/// Reply callback for a single scan
pub type ScanReply = Box<dyn FnOnce(Result<Vec<FileEntry>>) + Send>;

/// Directory listing service
pub trait Scanner: Send + Sync {
    /// Start a scan of `path`; `reply` is called exactly once
    fn scan(&self, path: &str, options: &ScanOptions, reply: ScanReply);
}

/// Scans on the calling thread before returning
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineScanner;

impl Scanner for InlineScanner {
    fn scan(&self, path: &str, options: &ScanOptions, reply: ScanReply) {
        reply(list_directory(path, options));
    }
}

struct ScanJob {
    path: String,
    options: ScanOptions,
    reply: ScanReply,
}

/// Scans the local disk on a background worker thread
pub struct LocalScanner {
    job_tx: Option<Sender<ScanJob>>,
    worker: Option<JoinHandle<()>>,
}

impl LocalScanner {
    pub fn new() -> Self {
        let (job_tx, job_rx) = unbounded::<ScanJob>();

        let worker = thread::Builder::new()
            .name("dataview-scanner".to_string())
            .spawn(move || {
                while let Ok(job) = job_rx.recv() {
                    let result = list_directory(&job.path, &job.options);
                    if let Err(e) = &result {
                        tracing::warn!("Scan of {} failed: {}", job.path, e);
                    }
                    (job.reply)(result);
                }
                tracing::debug!("Scanner worker stopped");
            });

        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::error!("Failed to spawn scanner worker: {}", e);
                None
            }
        };

        Self {
            job_tx: worker.as_ref().map(|_| job_tx),
            worker,
        }
    }
}

impl Default for LocalScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner for LocalScanner {
    fn scan(&self, path: &str, options: &ScanOptions, reply: ScanReply) {
        let job = ScanJob {
            path: path.to_string(),
            options: options.clone(),
            reply,
        };

        let Some(job_tx) = &self.job_tx else {
            (job.reply)(Err(FsError::Unavailable("no worker thread".to_string())));
            return;
        };

        if let Err(err) = job_tx.send(job) {
            let job = err.into_inner();
            (job.reply)(Err(FsError::Unavailable("worker stopped".to_string())));
        }
    }
}

impl Drop for LocalScanner {
    fn drop(&mut self) {
        // Closing the queue ends the worker loop
        self.job_tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
