//! Fatal error conditions for decode and encode operations.
//!
//! Warnings never travel through this type; they are recorded in the
//! [`Diagnostics`](crate::diag::Diagnostics) collector and the operation
//! continues. An `Err` here abandons the current conversion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abandon a decode or encode operation.
#[derive(Debug, Error)]
pub enum CodeplugError {
    /// A required vendor export file is not present in the input directory.
    #[error("{} does not exist. Please export the codeplug from the CPS and try again.", .path.display())]
    MissingExportFile { path: PathBuf },

    /// The encode target directory already exists. Adapters never overwrite
    /// an existing vendor CSV set.
    #[error("output directory {} already exists, refusing to overwrite", .path.display())]
    OutputExists { path: PathBuf },

    /// The channel export parsed cleanly but contained zero channels.
    #[error("no channels found in the CSV export")]
    NoChannels,

    /// A row is missing a required column or holds a value that cannot be
    /// interpreted at all (as opposed to an unknown label, which is a warning).
    #[error("{file}: row {row}: {message}")]
    MalformedRow {
        file: String,
        row: usize,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse codeplug JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CodeplugError>;
