//! Error types for section chain operations.
//!
//! Every variant is a rejected caller request: the chain is left exactly as it
//! was before the call.

use thiserror::Error;

/// Why a new section cannot be attached to the existing chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyViolation {
    /// Both endpoints of the section are already on the line.
    AllStationsPresent,
    /// Neither endpoint of the section is on the line.
    NoStationPresent,
}

impl std::fmt::Display for TopologyViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyViolation::AllStationsPresent => {
                write!(f, "all stations of the section are already on the line")
            }
            TopologyViolation::NoStationPresent => {
                write!(f, "neither station of the section is on the line")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionError {
    #[error("invalid topology: {0}")]
    InvalidTopology(TopologyViolation),

    /// The inserted section is not strictly shorter than the one it subdivides.
    #[error("cannot split a section of length {length} with a section of length {divisor}")]
    InvalidSplit { length: u32, divisor: u32 },

    /// Merging two sections would exceed the largest representable length.
    #[error("merging sections of length {length} and {addition} overflows")]
    LengthOverflow { length: u32, addition: u32 },

    #[error("a line needs at least one section")]
    ChainTooSmall,

    #[error("station '{0}' is not on the line")]
    UnknownStop(String),

    #[error("invalid section: {0}")]
    InvalidSegment(String),

    /// A loaded chain does not form a single simple path.
    #[error("broken section chain: {0}")]
    BrokenChain(String),
}
