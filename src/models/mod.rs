pub mod id;
mod line;
mod segment;
mod segment_chain;
mod station;


pub use line::Line;
pub use segment::Segment;
pub use segment_chain::{Placement, SegmentChain};
pub use station::Station;
