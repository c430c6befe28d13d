use thiserror::Error;
use vibelut_core::CoreError;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no source image loaded")]
    NoSource,

    #[error("worker thread has exited")]
    WorkerGone,

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}
