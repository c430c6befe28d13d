//! Image processing coordinator.
//!
//! Owns the loaded source buffer and the worker handle. A new `process`
//! request is expected on every parameter change, and replies may arrive
//! after a newer request was issued. The coordinator remembers the latest
//! request id of each kind and drops every reply that doesn't match it.

use std::sync::Arc;
use std::thread::JoinHandle;

use tokio::sync::mpsc;
use vibelut_core::{ColorParams, PipelineConfig, PixelBuffer, RenderOutput, Rgb};

use crate::error::{EngineError, EngineResult};
use crate::messages::{RequestId, WorkerRequest, WorkerResponse};
use crate::worker::spawn_worker;

/// A current (non-superseded) reply from the worker.
#[derive(Debug)]
pub enum CoordinatorEvent {
    Processed { id: RequestId, output: RenderOutput },
    Analyzed { id: RequestId, balance: Rgb },
}

impl CoordinatorEvent {
    pub fn id(&self) -> RequestId {
        match self {
            Self::Processed { id, .. } | Self::Analyzed { id, .. } => *id,
        }
    }
}

pub struct Coordinator {
    request_tx: Option<mpsc::UnboundedSender<WorkerRequest>>,
    response_rx: mpsc::UnboundedReceiver<WorkerResponse>,
    worker: Option<JoinHandle<()>>,
    source: Option<Arc<PixelBuffer>>,
    next_id: u64,
    latest_process: Option<RequestId>,
    latest_analyze: Option<RequestId>,
}

impl Coordinator {
    /// Start the worker thread.
    pub fn spawn() -> EngineResult<Self> {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        let worker = spawn_worker(request_rx, response_tx).map_err(EngineError::Spawn)?;

        Ok(Self {
            request_tx: Some(request_tx),
            response_rx,
            worker: Some(worker),
            source: None,
            next_id: 0,
            latest_process: None,
            latest_analyze: None,
        })
    }

    /// Replace the source buffer. Replies to requests issued against the
    /// previous source are dropped.
    pub fn load_source(&mut self, source: PixelBuffer) {
        tracing::info!("source loaded: {}x{}", source.width(), source.height());
        self.source = Some(Arc::new(source));
        self.latest_process = None;
        self.latest_analyze = None;
    }

    /// Wrap raw RGBA bytes and load them as the source.
    pub fn load_source_rgba(&mut self, width: u32, height: u32, data: Vec<u8>) -> EngineResult<()> {
        self.load_source(PixelBuffer::new(width, height, data)?);
        Ok(())
    }

    pub fn source(&self) -> Option<&PixelBuffer> {
        self.source.as_deref()
    }

    /// Queue a full-buffer grading pass. Never blocks.
    pub fn request_process(
        &mut self,
        params: &ColorParams,
        config: &PipelineConfig,
    ) -> EngineResult<RequestId> {
        let source = self.current_source()?;
        let id = self.allocate_id();
        self.send(WorkerRequest::Process {
            id,
            source,
            params: params.clone(),
            config: *config,
        })?;
        self.latest_process = Some(id);
        Ok(id)
    }

    /// Queue a grey-world balance estimate. Never blocks.
    pub fn request_analyze(&mut self, config: &PipelineConfig) -> EngineResult<RequestId> {
        let source = self.current_source()?;
        let id = self.allocate_id();
        self.send(WorkerRequest::Analyze {
            id,
            source,
            config: *config,
        })?;
        self.latest_analyze = Some(id);
        Ok(id)
    }

    /// Wait for the next current reply. Returns `None` once the worker has
    /// exited and every queued reply has been drained.
    pub async fn next_event(&mut self) -> Option<CoordinatorEvent> {
        while let Some(response) = self.response_rx.recv().await {
            if let Some(event) = self.accept(response) {
                return Some(event);
            }
        }
        None
    }

    /// Poll for a current reply without waiting.
    pub fn try_next_event(&mut self) -> Option<CoordinatorEvent> {
        while let Ok(response) = self.response_rx.try_recv() {
            if let Some(event) = self.accept(response) {
                return Some(event);
            }
        }
        None
    }

    /// Close the request channel and join the worker. Requests already
    /// queued are still processed first.
    pub fn shutdown(&mut self) {
        self.request_tx.take();
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            tracing::warn!("grading worker panicked");
        }
    }

    fn current_source(&self) -> EngineResult<Arc<PixelBuffer>> {
        self.source.clone().ok_or(EngineError::NoSource)
    }

    fn allocate_id(&mut self) -> RequestId {
        self.next_id += 1;
        RequestId(self.next_id)
    }

    fn send(&self, request: WorkerRequest) -> EngineResult<()> {
        let tx = self.request_tx.as_ref().ok_or(EngineError::WorkerGone)?;
        tx.send(request).map_err(|_| EngineError::WorkerGone)
    }

    fn accept(&self, response: WorkerResponse) -> Option<CoordinatorEvent> {
        match response {
            WorkerResponse::Processed { id, output } => {
                if self.latest_process == Some(id) {
                    Some(CoordinatorEvent::Processed { id, output })
                } else {
                    tracing::debug!("dropping stale process reply {id}");
                    None
                }
            }
            WorkerResponse::Analyzed { id, balance } => {
                if self.latest_analyze == Some(id) {
                    Some(CoordinatorEvent::Analyzed { id, balance })
                } else {
                    tracing::debug!("dropping stale analyze reply {id}");
                    None
                }
            }
        }
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.shutdown();
    }
}
