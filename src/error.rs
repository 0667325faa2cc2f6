use thiserror::Error;

use crate::clipboard::ClipboardError;
use crate::config::ConfigError;
use crate::state::PersistenceError;

/// Any error surfaced by the I/O-facing parts of the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
