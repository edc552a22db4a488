use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SuperpagesError {
    #[error("Invalid page: {0}")]
    Validation(String),

    #[error("Path already in use: {0}")]
    DuplicatePath(String),

    #[error("Parent page not found: {0}")]
    ParentNotFound(Uuid),

    #[error("Parent page not found at path: {0}")]
    ParentPathNotFound(String),

    #[error("Page not found at path: {0}")]
    PathNotFound(String),

    #[error("Page not found: {0}")]
    PageNotFound(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    /// The page row was written but the matching snapshot was not.
    /// `rolled_back` tells whether the page row was restored afterwards.
    #[error("Snapshot write failed for page {page} (page write rolled back: {rolled_back}): {reason}")]
    SnapshotWrite {
        page: Uuid,
        rolled_back: bool,
        reason: String,
    },

    #[error("Config error: {0}")]
    Config(String),
}

impl SuperpagesError {
    /// True for failures of the underlying storage rather than of the input.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Serialization(_) | Self::Store(_) | Self::SnapshotWrite { .. }
        )
    }

    /// True for lookups that found nothing (missing path or id).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound(_) | Self::PageNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, SuperpagesError>;
