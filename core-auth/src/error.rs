use bridge_traits::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Bridge operation failed: {0}")]
    Bridge(#[from] BridgeError),

    #[error("Stored session is malformed: {0}")]
    MalformedSession(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;
