use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid loop count: {0}, it must be > 0")]
    InvalidLoopCount(i64),

    #[error("Invalid speed: {value}, it must be between {min} and {max}")]
    InvalidSpeed { value: u32, min: u32, max: u32 },

    #[error("Invalid duration: scroll duration must be longer than zero")]
    InvalidDuration,

    #[error("Invalid tick interval: {0}ms")]
    InvalidTickInterval(u64),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("No async runtime available: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, Error>;
