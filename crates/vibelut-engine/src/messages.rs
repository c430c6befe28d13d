//! Messages exchanged with the worker thread.
//!
//! Every request carries everything the worker needs: the source buffer,
//! the full parameter record and the config. The worker keeps no state
//! between requests.

use std::fmt;
use std::sync::Arc;

use vibelut_core::{ColorParams, PipelineConfig, PixelBuffer, RenderOutput, Rgb};

/// Identity of one request, increasing in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Controller → worker.
#[derive(Debug)]
pub(crate) enum WorkerRequest {
    /// Grade the whole buffer and accumulate scopes.
    Process {
        id: RequestId,
        source: Arc<PixelBuffer>,
        params: ColorParams,
        config: PipelineConfig,
    },
    /// Estimate grey-world balance.
    Analyze {
        id: RequestId,
        source: Arc<PixelBuffer>,
        config: PipelineConfig,
    },
}

/// Worker → controller.
#[derive(Debug)]
pub(crate) enum WorkerResponse {
    Processed { id: RequestId, output: RenderOutput },
    Analyzed { id: RequestId, balance: Rgb },
}
