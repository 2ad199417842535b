//! Fixed pool of knowledge-base retrieval workers.
//!
//! Lookups are queued on a bounded crossbeam channel and served by a fixed
//! set of long-lived threads. Each job carries its own one-shot reply
//! channel; the caller waits on it with `recv_timeout`. A stalled knowledge
//! base therefore ties up at most `workers` threads, and once the queue is
//! full further lookups fall back immediately instead of waiting.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use tracing::{debug, warn};

use heval_core::errors::HevalErrorCode;
use heval_core::models::ScoredExemplar;
use heval_core::traits::{Cancellable, CancellationToken, IEmbeddingProvider, IKnowledgeIndex};

use crate::augmenter::FallbackReason;

pub(crate) type LookupResult = Result<Vec<ScoredExemplar>, FallbackReason>;

/// One embed + retrieve request.
pub(crate) struct Lookup {
    pub query: String,
    pub heuristic_id: String,
    pub criterion_id: String,
    pub k: usize,
}

struct RetrievalJob {
    lookup: Lookup,
    deadline: Instant,
    cancel: CancellationToken,
    reply: Sender<LookupResult>,
}

pub(crate) struct RetrievalPool {
    jobs: Sender<RetrievalJob>,
    workers: usize,
    timeout: Duration,
}

impl RetrievalPool {
    pub(crate) fn new(
        index: Arc<dyn IKnowledgeIndex>,
        embedder: Arc<dyn IEmbeddingProvider>,
        workers: usize,
        queue_capacity: usize,
        timeout: Duration,
    ) -> Self {
        let (jobs, queue) = crossbeam_channel::bounded::<RetrievalJob>(queue_capacity.max(1));

        let mut spawned = 0;
        for n in 0..workers.max(1) {
            let queue = queue.clone();
            let index = Arc::clone(&index);
            let embedder = Arc::clone(&embedder);
            match thread::Builder::new()
                .name(format!("heval-retrieval-{n}"))
                .spawn(move || worker_loop(queue, index, embedder))
            {
                Ok(_) => spawned += 1,
                Err(e) => warn!(worker = n, error = %e, "failed to spawn retrieval worker"),
            }
        }
        debug!(workers = spawned, queue_capacity, "retrieval pool started");

        Self {
            jobs,
            workers: spawned,
            timeout,
        }
    }

    pub(crate) fn workers(&self) -> usize {
        self.workers
    }

    /// Queue `lookup` and wait up to the configured timeout for its answer.
    pub(crate) fn lookup(&self, lookup: Lookup, cancel: &CancellationToken) -> LookupResult {
        if self.workers == 0 {
            return Err(FallbackReason::RetrievalFailed);
        }

        let (reply, answer) = crossbeam_channel::bounded(1);
        let job = RetrievalJob {
            lookup,
            deadline: Instant::now() + self.timeout,
            cancel: cancel.clone(),
            reply,
        };
        let criterion_id = job.lookup.criterion_id.clone();
        match self.jobs.try_send(job) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(
                    criterion_id = %criterion_id,
                    queued = self.jobs.len(),
                    "retrieval queue full, skipping knowledge base"
                );
                return Err(FallbackReason::Timeout);
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(criterion_id = %criterion_id, "retrieval workers are gone");
                return Err(FallbackReason::RetrievalFailed);
            }
        }

        match answer.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    criterion_id = %criterion_id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "knowledge base retrieval timed out"
                );
                Err(FallbackReason::Timeout)
            }
            Err(RecvTimeoutError::Disconnected) => {
                warn!(criterion_id = %criterion_id, "retrieval worker dropped the request");
                Err(FallbackReason::RetrievalFailed)
            }
        }
    }
}

/// Serve jobs until every sender is dropped. Expired and cancelled jobs are
/// skipped without touching the embedder or the index.
fn worker_loop(
    queue: Receiver<RetrievalJob>,
    index: Arc<dyn IKnowledgeIndex>,
    embedder: Arc<dyn IEmbeddingProvider>,
) {
    for job in queue {
        if job.cancel.is_cancelled() {
            let _ = job.reply.send(Err(FallbackReason::Cancelled));
            continue;
        }
        if Instant::now() >= job.deadline {
            debug!(criterion_id = %job.lookup.criterion_id, "retrieval expired in queue");
            continue;
        }

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            retrieve(index.as_ref(), embedder.as_ref(), &job.lookup)
        }))
        .unwrap_or_else(|_| {
            warn!(criterion_id = %job.lookup.criterion_id, "knowledge base retrieval panicked");
            Err(FallbackReason::RetrievalFailed)
        });
        // The caller is gone when it already timed out.
        let _ = job.reply.send(result);
    }
}

fn retrieve(
    index: &dyn IKnowledgeIndex,
    embedder: &dyn IEmbeddingProvider,
    lookup: &Lookup,
) -> LookupResult {
    let embedding = embedder.embed(&lookup.query).map_err(|e| {
        warn!(error = %e.formatted(), "query embedding failed");
        FallbackReason::EmbeddingFailed
    })?;
    index
        .retrieve(&embedding, &lookup.heuristic_id, &lookup.criterion_id, lookup.k)
        .map_err(|e| {
            warn!(error = %e.formatted(), "knowledge base retrieval failed");
            FallbackReason::RetrievalFailed
        })
}
