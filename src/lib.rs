//! Section chains for transit lines.
//!
//! A line runs over an ordered chain of directed sections. The chain accepts
//! new sections at either end or inside an existing section, and removes
//! stations by dropping or merging sections, while always remaining a single
//! simple path.

pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;

pub use error::{SectionError, TopologyViolation};
pub use models::{Line, Placement, Segment, SegmentChain, Station};
