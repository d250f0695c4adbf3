//! Collaborators around the triad core: CSV dataset export, the
//! sanity/certification report, and single-N evaluation against the
//! literature constants.

pub mod error;
pub mod export;
pub mod progress;
pub mod reference;
pub mod report;
pub mod single;

pub use error::BalanceError;
