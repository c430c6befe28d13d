//! VibeLUT Engine — the image processing coordinator.
//!
//! Full-buffer grading and balance analysis run on one dedicated worker
//! thread. The controlling side dispatches self-contained requests over a
//! channel and receives replies asynchronously, dropping any reply that a
//! newer request has superseded.

pub mod coordinator;
pub mod error;
pub mod messages;
mod worker;

pub use coordinator::{Coordinator, CoordinatorEvent};
pub use error::{EngineError, EngineResult};
pub use messages::RequestId;
