use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Wrong # of Arguments\nExpected # floors, time interval for calls, total time for simulation(seconds)\nExample: ./elevator-sim 8 5 180")]
    Usage,
    #[error("invalid settings file: {0}")]
    Config(#[from] serde_json::Error),
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("thread {0} panicked")]
    ThreadPanicked(String),
}
