use thiserror::Error;

// ---------------------------------------------------------------------------
// Structural and configuration errors
// ---------------------------------------------------------------------------

/// Errors raised while validating input shape or plot configuration.
///
/// I/O and numeric parse failures are not listed here; they travel as
/// `anyhow::Error` with context attached at the boundary where they occur.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModalityError {
    #[error("data array must not be empty")]
    EmptyData,

    #[error("binarization array must not be empty")]
    EmptyBinarization,

    #[error("data and binarization arrays must have equal length (data: {data}, binarization: {binarization})")]
    LengthMismatch { data: usize, binarization: usize },

    #[error("CSV row {row}: expected at most 6 columns, found {found}")]
    TooManyColumns { row: usize, found: usize },

    #[error("unknown color: '{0}'")]
    UnknownColor(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
