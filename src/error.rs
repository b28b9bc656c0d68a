use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("the system contains no ions")]
    EmptySystem,

    #[error("at least one worker is required")]
    NoWorkers,

    #[error("rank {rank} is out of range for {size} workers")]
    InvalidRank { rank: usize, size: usize },

    #[error("could not place {species} ion {index} without overlap")]
    Placement { species: String, index: usize },

    #[error("worker channels disconnected")]
    Disconnected,

    #[error("collective operations desynchronized: {0}")]
    Desynchronized(String),

    #[error("worker {0} panicked")]
    WorkerPanicked(usize),

    #[error("worker {0} failed")]
    WorkerFailed(usize),

    #[error("non-finite energy at step {step}")]
    NumericalInstability { step: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_rank() {
        let err = Error::InvalidRank { rank: 4, size: 2 };
        assert_eq!(err.to_string(), "rank 4 is out of range for 2 workers");
    }

    #[test]
    fn io_errors_convert() {
        fn open() -> Result<std::fs::File> {
            Ok(std::fs::File::open("/definitely/not/here")?)
        }
        assert!(matches!(open(), Err(Error::Io(_))));
    }
}
