use std::path::PathBuf;

use thiserror::Error;

/// Reasons a voxdata file is refused. The mapping is always released before
/// one of these is returned.
#[derive(Debug, Error)]
pub enum VoxDataError {
    /// Bad magic, short header, or a region running past the end of the file.
    #[error("format: {0}")]
    Format(String),

    /// The file belongs to another voice.
    #[error("voice mismatch: expected {expected:?}, file is for {found:?}")]
    VoiceMismatch { expected: String, found: String },

    /// Opening or mapping the file failed.
    #[error("io: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type VoxDataResult<T> = Result<T, VoxDataError>;
