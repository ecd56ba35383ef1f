//! Error types for listing storage, moderation and queries.

use std::io;

use thiserror::Error;

use crate::models::ListingStatus;

#[derive(Error, Debug)]
pub enum MalnadError {
    /// A caller broke an input contract (page size of zero, a listing
    /// without coordinates while filtering by distance, blank form fields)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Listing not found: {0}")]
    NotFound(String),

    #[error("Listing already exists: {0}")]
    DuplicateListing(String),

    #[error("Listing {id} is {from}, cannot move to {to}")]
    InvalidTransition {
        id: String,
        from: ListingStatus,
        to: ListingStatus,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MalnadError {
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        MalnadError::InvalidArgument(msg.into())
    }

    pub fn not_found<S: Into<String>>(id: S) -> Self {
        MalnadError::NotFound(id.into())
    }
}

pub type Result<T> = std::result::Result<T, MalnadError>;
