use std::path::PathBuf;
use thiserror::Error;

/// The main error type for inselect operations.
#[derive(Debug, Error)]
pub enum InselectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Scanned image for {path} not found (looked for {candidates})")]
    MissingScannedImage { path: PathBuf, candidates: String },

    #[error("Failed to parse metadata from {path}: {source}")]
    MetadataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write metadata to {path}: {source}")]
    MetadataWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Rect {index} is not normalised: {rect} ({reason})")]
    NotNormalised {
        index: usize,
        rect: String,
        reason: &'static str,
    },

    #[error("Failed to load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Rect {index} {rect} lies outside the {width}x{height} image")]
    OutOfBounds {
        index: usize,
        rect: String,
        width: u32,
        height: u32,
    },

    #[error("Got {rects} rect(s) but {paths} output path(s)")]
    LengthMismatch { rects: usize, paths: usize },

    #[error("Failed to write crop {path}: {source}")]
    CropWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to parse template {path}: {source}")]
    TemplateParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
