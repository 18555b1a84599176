pub mod clipboard;
pub mod mac;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MacClipError {
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error(transparent)]
    InvalidMac(#[from] mac::MacError),

    #[error("No MAC address has been detected yet")]
    NoEntry,

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MacClipError>;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const EVENT_CHANNEL_CAPACITY: usize = 100;
pub const MAC_HEX_DIGITS: usize = 12;

#[cfg(test)]
mod main_test;
