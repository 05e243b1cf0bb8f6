//! Background worker that performs REST calls without blocking the UI.
//!
//! Requests are processed one at a time in arrival order, so a screen's
//! create followed by its refetch can never be reordered. A bulk delete fans
//! out to one thread per id inside that single request.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};

use aquadesk_core::ResourceKind;

use crate::api::{ApiCall, ApiError, ApiOutcome, ApiRequest, ApiResponse, Backend, DeleteReport};

#[derive(Debug)]
pub enum WorkerRequest {
    Call(ApiRequest),
    /// Graceful shutdown
    Shutdown,
}

pub struct ApiWorker {
    request_tx: Sender<WorkerRequest>,
    response_rx: Receiver<ApiResponse>,
    /// Calls sent but not yet answered
    in_flight: Arc<AtomicUsize>,
    thread: Option<JoinHandle<()>>,
}

impl ApiWorker {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (request_tx, request_rx) = channel();
        let (response_tx, response_rx) = channel();
        let in_flight = Arc::new(AtomicUsize::new(0));

        let ctx = WorkerContext {
            backend,
            response_tx,
            in_flight: Arc::clone(&in_flight),
        };
        let thread = thread::Builder::new()
            .name("aquadesk-api".to_string())
            .spawn(move || ctx.run(request_rx))
            .ok();
        if thread.is_none() {
            tracing::error!("Failed to spawn API worker thread");
        }

        Self {
            request_tx,
            response_rx,
            in_flight,
            thread,
        }
    }

    /// Queue a call. Returns false when the worker is gone.
    pub fn send(&self, request: ApiRequest) -> bool {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let sent = self.request_tx.send(WorkerRequest::Call(request)).is_ok();
        if !sent {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
        sent
    }

    /// Non-blocking poll for the next finished call
    pub fn try_recv(&self) -> Option<ApiResponse> {
        self.response_rx.try_recv().ok()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn shutdown(&self) {
        let _ = self.request_tx.send(WorkerRequest::Shutdown);
    }
}

impl Drop for ApiWorker {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

struct WorkerContext {
    backend: Arc<dyn Backend>,
    response_tx: Sender<ApiResponse>,
    in_flight: Arc<AtomicUsize>,
}

impl WorkerContext {
    fn run(&self, request_rx: Receiver<WorkerRequest>) {
        while let Ok(request) = request_rx.recv() {
            let ApiRequest { token, kind, call } = match request {
                WorkerRequest::Shutdown => break,
                WorkerRequest::Call(request) => request,
            };

            tracing::debug!(resource = %kind, call = call.name(), ?token, "Executing API call");
            let outcome = execute(self.backend.as_ref(), kind, call);
            log_outcome(kind, &outcome);

            // Count down only once the response is queued, so a zero count
            // means every answer is already waiting in the channel
            let sent = self
                .response_tx
                .send(ApiResponse {
                    token,
                    kind,
                    outcome,
                })
                .is_ok();
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            if !sent {
                // UI side hung up
                break;
            }
        }
        tracing::info!("API worker stopped");
    }
}

/// Perform one call against `backend`
pub fn execute(backend: &dyn Backend, kind: ResourceKind, call: ApiCall) -> ApiOutcome {
    match call {
        ApiCall::List => ApiOutcome::Listed(backend.list(kind)),
        ApiCall::Create(body) => ApiOutcome::Created(backend.create(kind, &body)),
        ApiCall::Update { id, body } => {
            let result = backend.update(kind, &id, &body);
            ApiOutcome::Updated { id, result }
        }
        ApiCall::Delete { id } => {
            let result = backend.delete(kind, &id);
            ApiOutcome::Deleted { id, result }
        }
        ApiCall::BulkDelete { ids } => ApiOutcome::BulkDeleted(bulk_delete(backend, kind, ids)),
    }
}

/// Issue every DELETE concurrently and wait for all of them
fn bulk_delete(backend: &dyn Backend, kind: ResourceKind, ids: Vec<String>) -> Vec<DeleteReport> {
    thread::scope(|scope| {
        let handles: Vec<_> = ids
            .iter()
            .map(|id| scope.spawn(move || backend.delete(kind, id)))
            .collect();

        ids.iter()
            .zip(handles)
            .map(|(id, handle)| DeleteReport {
                id: id.clone(),
                result: handle.join().unwrap_or_else(|_| {
                    Err(ApiError::Transport("delete task panicked".to_string()))
                }),
            })
            .collect()
    })
}

fn log_outcome(kind: ResourceKind, outcome: &ApiOutcome) {
    match outcome {
        ApiOutcome::Listed(Ok(items)) => {
            tracing::info!(resource = %kind, count = items.len(), "Collection loaded");
        }
        ApiOutcome::Listed(Err(e)) | ApiOutcome::Created(Err(e)) => {
            tracing::warn!(resource = %kind, status = ?e.status(), error = %e, "API call failed");
        }
        ApiOutcome::Created(Ok(_)) => tracing::info!(resource = %kind, "Record created"),
        ApiOutcome::Updated { id, result } => match result {
            Ok(_) => tracing::info!(resource = %kind, id = %id, "Record updated"),
            Err(e) => tracing::warn!(resource = %kind, id = %id, error = %e, "Update failed"),
        },
        ApiOutcome::Deleted { id, result } => match result {
            Ok(()) => tracing::info!(resource = %kind, id = %id, "Record deleted"),
            Err(e) => tracing::warn!(resource = %kind, id = %id, error = %e, "Delete failed"),
        },
        ApiOutcome::BulkDeleted(reports) => {
            let failed = reports.iter().filter(|r| r.result.is_err()).count();
            tracing::info!(
                resource = %kind,
                requested = reports.len(),
                failed,
                "Bulk delete finished"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use serde_json::json;

    use super::*;
    use crate::api::fake::FakeBackend;
    use crate::state::{ScreenId, ScreenToken};

    fn bills(ids: &[i64]) -> Vec<serde_json::Value> {
        ids.iter()
            .map(|id| json!({"BillID": id, "Amount": 10.0}))
            .collect()
    }

    fn token() -> ScreenToken {
        ScreenToken {
            screen: ScreenId::Resource(ResourceKind::Bills),
            generation: 1,
        }
    }

    fn wait_for(worker: &ApiWorker) -> ApiResponse {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(response) = worker.try_recv() {
                return response;
            }
            assert!(Instant::now() < deadline, "worker did not answer");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_bulk_delete_reports_each_id_in_order() {
        let backend = FakeBackend::new().with(ResourceKind::Bills, bills(&[1, 2, 3, 4, 5]));
        backend.fail_delete("4");

        let outcome = execute(
            &backend,
            ResourceKind::Bills,
            ApiCall::BulkDelete {
                ids: vec!["2".to_string(), "4".to_string(), "9".to_string()],
            },
        );
        let ApiOutcome::BulkDeleted(reports) = outcome else {
            panic!("expected a bulk delete report");
        };
        let summary: Vec<_> = reports
            .iter()
            .map(|r| (r.id.as_str(), r.result.as_ref().err().and_then(ApiError::status)))
            .collect();
        assert_eq!(summary, vec![("2", None), ("4", Some(500)), ("9", Some(404))]);
        assert_eq!(backend.ids(ResourceKind::Bills), vec!["1", "3", "4", "5"]);
    }

    #[test]
    fn test_worker_answers_with_request_token() {
        let backend = Arc::new(FakeBackend::new().with(ResourceKind::Bills, bills(&[1, 2])));
        let worker = ApiWorker::new(backend);

        assert!(worker.send(ApiRequest {
            token: token(),
            kind: ResourceKind::Bills,
            call: ApiCall::List,
        }));
        let response = wait_for(&worker);
        assert_eq!(response.token, token());
        assert_eq!(response.kind, ResourceKind::Bills);
        assert!(matches!(response.outcome, ApiOutcome::Listed(Ok(ref items)) if items.len() == 2));
        let deadline = Instant::now() + Duration::from_secs(5);
        while worker.in_flight() > 0 {
            assert!(Instant::now() < deadline, "in-flight count never dropped");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_calls_are_answered_in_order() {
        let backend = Arc::new(FakeBackend::new());
        let worker = ApiWorker::new(backend);

        worker.send(ApiRequest {
            token: token(),
            kind: ResourceKind::Bills,
            call: ApiCall::Create(json!({"Amount": 12.5})),
        });
        worker.send(ApiRequest {
            token: token(),
            kind: ResourceKind::Bills,
            call: ApiCall::List,
        });

        assert!(matches!(wait_for(&worker).outcome, ApiOutcome::Created(Ok(_))));
        assert!(matches!(
            wait_for(&worker).outcome,
            ApiOutcome::Listed(Ok(ref items)) if items.len() == 1
        ));
    }

    #[test]
    fn test_list_failure_carries_status() {
        let backend = FakeBackend::new();
        backend.fail_lists(Some(503));
        let outcome = execute(&backend, ResourceKind::Alerts, ApiCall::List);
        assert_eq!(
            outcome,
            ApiOutcome::Listed(Err(ApiError::from_status(503, "")))
        );
    }
}
