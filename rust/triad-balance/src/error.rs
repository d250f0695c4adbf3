//! Errors raised by the dataset, sanity and single-N drivers.

use triad_core::TriadError;

#[derive(Debug, thiserror::Error)]
pub enum BalanceError {
    #[error(transparent)]
    Triad(#[from] TriadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
