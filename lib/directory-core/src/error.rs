use thiserror::Error;

pub type Result<T> = std::result::Result<T, DirectoryError>;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to get directory, result: {result}, message: {message}")]
    Protocol { result: u32, message: String },

    #[error("Directory returned zero servers")]
    EmptyResult,

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Directory is not initialized")]
    NotReady,
}
