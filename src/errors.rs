//! Error types

/// Result type used throughout the crate.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// All the failures an operation may surface to the caller.
///
/// Degeneracies with a well-defined fallback (NaN ear angles, abstaining
/// orientation votes, a splitter that finds no crossing) are resolved locally
/// and never reach this type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// (InvalidArgument) Negative/NaN tolerance, malformed box or loop, mismatched inputs
    #[error("(InvalidArgument) {0}")]
    InvalidArgument(String),
    /// (DegenerateGeometry) A zero-area triangle where a direction is required
    #[error("(DegenerateGeometry) {0}")]
    DegenerateGeometry(String),
    /// (UnsupportedVolume) The volume has no triangulation rule
    #[error("(UnsupportedVolume) volume `{0}` cannot be triangulated")]
    UnsupportedVolume(String),
}
