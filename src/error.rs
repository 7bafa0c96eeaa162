//! Error types for cave generation and analysis

/// Errors that can occur while configuring or running a generator
///
/// Expected conditions during analysis (clipped neighbourhoods, unreachable
/// path goals, empty metric inputs) are not errors and never surface here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaveError {
    /// Option or builder validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A grid operation needed a policy that was never installed
    #[error("no {0} installed on the grid")]
    MissingPolicy(&'static str),

    /// A level-of-detail layer index does not exist
    #[error("layer {index} out of range ({layers} layers)")]
    LayerOutOfRange {
        /// Requested layer index
        index: usize,
        /// Number of configured layers
        layers: usize,
    },
}

/// Result type alias for cave operations
pub type Result<T> = std::result::Result<T, CaveError>;
