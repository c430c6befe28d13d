//! The worker thread.

use std::thread::{self, JoinHandle};

use tokio::sync::mpsc;
use vibelut_core::{estimate_balance, render};

use crate::messages::{WorkerRequest, WorkerResponse};

pub(crate) const WORKER_THREAD_NAME: &str = "vibelut-worker";

/// Spawn the worker on a dedicated OS thread.
///
/// Each request runs to completion before the next is read. The thread
/// exits when the request channel closes or the response receiver is
/// dropped.
pub(crate) fn spawn_worker(
    mut requests: mpsc::UnboundedReceiver<WorkerRequest>,
    responses: mpsc::UnboundedSender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || {
            tracing::info!("grading worker started");
            while let Some(request) = requests.blocking_recv() {
                let response = handle(request);
                if responses.send(response).is_err() {
                    break;
                }
            }
            tracing::info!("grading worker stopped");
        })
}

fn handle(request: WorkerRequest) -> WorkerResponse {
    match request {
        WorkerRequest::Process {
            id,
            source,
            params,
            config,
        } => {
            tracing::debug!("processing {id}");
            WorkerResponse::Processed {
                id,
                output: render(&source, &params, &config),
            }
        }
        WorkerRequest::Analyze { id, source, config } => {
            tracing::debug!("analyzing {id}");
            WorkerResponse::Analyzed {
                id,
                balance: estimate_balance(&source, &config),
            }
        }
    }
}
