use serde::{Deserialize, Serialize};

use super::id::generate_id;
use super::Station;
use crate::error::SectionError;

/// A directed section of a line between two stations
///
/// Sections are mutated in place when the chain splits or merges them, so the
/// endpoints and length are only reachable through the `modify_*` / `merge_*`
/// operations below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default = "generate_id")]
    id: u64,
    up_station: Station,
    down_station: Station,
    length: u32,
    #[serde(default)]
    sequence: usize,
}

impl Segment {
    /// Create a detached section
    ///
    /// # Errors
    /// Returns `InvalidSegment` if both stations are the same stop or the length is zero
    pub fn new(
        up_station: Station,
        down_station: Station,
        length: u32,
    ) -> Result<Self, SectionError> {
        Self::with_id(generate_id(), up_station, down_station, length)
    }

    /// Create a section with an id assigned by the caller (e.g. a persisted row)
    ///
    /// # Errors
    /// Returns `InvalidSegment` if both stations are the same stop or the length is zero
    pub fn with_id(
        id: u64,
        up_station: Station,
        down_station: Station,
        length: u32,
    ) -> Result<Self, SectionError> {
        if up_station == down_station {
            return Err(SectionError::InvalidSegment(format!(
                "up and down station are both '{up_station}'"
            )));
        }
        if length == 0 {
            return Err(SectionError::InvalidSegment("length must be positive".to_string()));
        }
        Ok(Self {
            id,
            up_station,
            down_station,
            length,
            sequence: 0,
        })
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn up_station(&self) -> &Station {
        &self.up_station
    }

    #[must_use]
    pub fn down_station(&self) -> &Station {
        &self.down_station
    }

    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }

    #[must_use]
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    /// Shrink this section by the length of `other`, which subdivides it
    ///
    /// The section is left unchanged on failure.
    ///
    /// # Errors
    /// Returns `InvalidSplit` if `other` is not strictly shorter than this section
    pub fn divide_distance(&mut self, other: &Segment) -> Result<(), SectionError> {
        match self.length.checked_sub(other.length) {
            Some(remaining) if remaining > 0 => {
                self.length = remaining;
                Ok(())
            }
            _ => Err(SectionError::InvalidSplit {
                length: self.length,
                divisor: other.length,
            }),
        }
    }

    pub fn modify_up_station(&mut self, station: Station) {
        self.up_station = station;
    }

    pub fn modify_down_station(&mut self, station: Station) {
        self.down_station = station;
    }

    /// Absorb the section directly upstream of this one
    ///
    /// The removed section's up station becomes ours and the lengths are summed.
    /// The section is left unchanged on failure.
    ///
    /// # Errors
    /// Returns `LengthOverflow` if the summed length does not fit in a `u32`
    pub fn merge_up_station(&mut self, other: &Segment) -> Result<(), SectionError> {
        let length = self
            .length
            .checked_add(other.length)
            .ok_or(SectionError::LengthOverflow {
                length: self.length,
                addition: other.length,
            })?;
        self.up_station = other.up_station.clone();
        self.length = length;
        Ok(())
    }

    pub fn modify_sequence(&mut self, sequence: usize) {
        self.sequence = sequence;
    }
}

/// Sections are entities: equal only to themselves
impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Segment {}
