use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Segment, Station};
use crate::constants::MIN_SECTIONS;
use crate::debug_log;
use crate::error::{SectionError, TopologyViolation};

/// Where a new section lands relative to the existing chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The new section ends at the current first station
    Prepend,
    /// The new section starts at the current last station
    Append,
    /// The new section starts where section `idx` starts; it takes over the
    /// front part of that section and is inserted before it
    SplitBefore(usize),
    /// The new section ends where section `idx` ends; it takes over the back
    /// part of that section and is inserted after it
    SplitAfter(usize),
}

/// Ordered sections forming the path of a single line
///
/// Adjacent sections share a station (`down(segments[i]) == up(segments[i + 1])`)
/// and no station appears twice. Sequence numbers always equal chain position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct SegmentChain {
    segments: Vec<Segment>,
}

impl SegmentChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a chain from persisted sections
    ///
    /// Sections are ordered by their stored sequence, renumbered, then checked
    /// against the chain invariants.
    ///
    /// # Errors
    /// Returns `BrokenChain` if the sections do not form a single simple path
    pub fn from_segments(mut segments: Vec<Segment>) -> Result<Self, SectionError> {
        segments.sort_by_key(Segment::sequence);
        let mut chain = Self { segments };
        chain.resequence();
        chain.validate()?;
        Ok(chain)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sections in chain order
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    #[must_use]
    pub fn contains(&self, segment: &Segment) -> bool {
        self.segments.contains(segment)
    }

    #[must_use]
    pub fn first_station(&self) -> Option<&Station> {
        self.segments.first().map(Segment::up_station)
    }

    #[must_use]
    pub fn last_station(&self) -> Option<&Station> {
        self.segments.last().map(Segment::down_station)
    }

    /// Stations in travel order: the first station, then every section's down station
    #[must_use]
    pub fn get_stations(&self) -> Vec<Station> {
        let Some(first) = self.first_station() else {
            return Vec::new();
        };

        std::iter::once(first)
            .chain(self.segments.iter().map(Segment::down_station))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn has_station(&self, station: &Station) -> bool {
        self.first_station() == Some(station)
            || self.segments.iter().any(|segment| segment.down_station() == station)
    }

    /// Sum of all section lengths
    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.segments.iter().map(|segment| u64::from(segment.length())).sum()
    }

    /// Decide where `segment` would be inserted without touching the chain
    ///
    /// # Errors
    /// Returns `InvalidTopology` unless exactly one endpoint is already on the line
    pub fn plan_insertion(&self, segment: &Segment) -> Result<Placement, SectionError> {
        let up = segment.up_station();
        let down = segment.down_station();

        match (self.has_station(up), self.has_station(down)) {
            (true, true) => Err(SectionError::InvalidTopology(
                TopologyViolation::AllStationsPresent,
            )),
            (false, false) => Err(SectionError::InvalidTopology(
                TopologyViolation::NoStationPresent,
            )),
            (true, false) => {
                if self.last_station() == Some(up) {
                    return Ok(Placement::Append);
                }
                self.segments
                    .iter()
                    .position(|existing| existing.up_station() == up)
                    .map(Placement::SplitBefore)
                    .ok_or_else(|| {
                        SectionError::BrokenChain(format!("no section starts at '{up}'"))
                    })
            }
            (false, true) => {
                if self.first_station() == Some(down) {
                    return Ok(Placement::Prepend);
                }
                self.segments
                    .iter()
                    .position(|existing| existing.down_station() == down)
                    .map(Placement::SplitAfter)
                    .ok_or_else(|| {
                        SectionError::BrokenChain(format!("no section ends at '{down}'"))
                    })
            }
        }
    }

    /// Attach a section to the line
    ///
    /// The first section of an empty chain is accepted as-is. Afterwards exactly
    /// one endpoint must already be on the line; a section starting or ending at
    /// an interior station splits the section it overlaps.
    ///
    /// # Errors
    /// - `InvalidTopology` if both or neither endpoints are on the line
    /// - `InvalidSplit` if the section is not shorter than the one it splits
    pub fn add(&mut self, segment: Segment) -> Result<(), SectionError> {
        if self.segments.is_empty() {
            debug_log!(
                "Starting chain with section {} -> {}",
                segment.up_station(),
                segment.down_station()
            );
            self.segments.push(segment);
            self.resequence();
            return Ok(());
        }

        let placement = self.plan_insertion(&segment)?;
        debug_log!(
            "Inserting section {} -> {} at {:?}",
            segment.up_station(),
            segment.down_station(),
            placement
        );
        self.apply(placement, segment)?;
        self.resequence();
        Ok(())
    }

    fn apply(&mut self, placement: Placement, segment: Segment) -> Result<(), SectionError> {
        match placement {
            Placement::Prepend => self.segments.insert(0, segment),
            Placement::Append => self.segments.push(segment),
            Placement::SplitBefore(index) => {
                let target = self.split_target(index)?;
                target.divide_distance(&segment)?;
                target.modify_up_station(segment.down_station().clone());
                self.segments.insert(index, segment);
            }
            Placement::SplitAfter(index) => {
                let target = self.split_target(index)?;
                target.divide_distance(&segment)?;
                target.modify_down_station(segment.up_station().clone());
                self.segments.insert(index + 1, segment);
            }
        }
        Ok(())
    }

    fn split_target(&mut self, index: usize) -> Result<&mut Segment, SectionError> {
        self.segments
            .get_mut(index)
            .ok_or_else(|| SectionError::BrokenChain(format!("no section at position {index}")))
    }

    /// Take a station off the line and return the section that was dropped
    ///
    /// Removing the first or last station drops the section at that end.
    /// Removing an interior station drops the section ending there and extends
    /// the following section back to cover it.
    ///
    /// # Errors
    /// - `ChainTooSmall` if the line only has one section left
    /// - `UnknownStop` if the station is not on the line
    /// - `LengthOverflow` if merging around an interior station overflows
    pub fn remove(&mut self, station: &Station) -> Result<Segment, SectionError> {
        if self.segments.len() <= MIN_SECTIONS {
            return Err(SectionError::ChainTooSmall);
        }
        if !self.has_station(station) {
            return Err(SectionError::UnknownStop(station.name.clone()));
        }

        let is_first = self.first_station() == Some(station);
        let is_last = self.last_station() == Some(station);

        let index = if is_first {
            0
        } else if is_last {
            self.segments.len() - 1
        } else {
            self.segments
                .iter()
                .position(|segment| segment.down_station() == station)
                .ok_or_else(|| SectionError::UnknownStop(station.name.clone()))?
        };

        if !is_first && !is_last {
            // Merge before removing so an overflow leaves the chain untouched
            let (head, tail) = self.segments.split_at_mut(index + 1);
            if let (Some(target), Some(survivor)) = (head.last(), tail.first_mut()) {
                survivor.merge_up_station(target)?;
            }
        }
        let removed = self.segments.remove(index);
        self.resequence();

        debug_log!("Removed station {} ({} sections left)", station, self.segments.len());
        Ok(removed)
    }

    fn resequence(&mut self) {
        for (position, segment) in self.segments.iter_mut().enumerate() {
            segment.modify_sequence(position);
        }
    }

    /// Check every chain invariant, reporting the first violation found
    ///
    /// # Errors
    /// Returns `BrokenChain` describing the violation
    pub fn validate(&self) -> Result<(), SectionError> {
        for (position, segment) in self.segments.iter().enumerate() {
            if segment.up_station() == segment.down_station() {
                return Err(SectionError::BrokenChain(format!(
                    "section {position} starts and ends at '{}'",
                    segment.up_station()
                )));
            }
            if segment.length() == 0 {
                return Err(SectionError::BrokenChain(format!(
                    "section {position} has zero length"
                )));
            }
            if segment.sequence() != position {
                return Err(SectionError::BrokenChain(format!(
                    "section {position} has sequence {}",
                    segment.sequence()
                )));
            }
        }

        for (position, pair) in self.segments.windows(2).enumerate() {
            if pair[0].down_station() != pair[1].up_station() {
                return Err(SectionError::BrokenChain(format!(
                    "section {position} ends at '{}' but section {} starts at '{}'",
                    pair[0].down_station(),
                    position + 1,
                    pair[1].up_station()
                )));
            }
        }

        let mut seen = HashSet::new();
        for station in self.get_stations() {
            if !seen.insert(station.id) {
                return Err(SectionError::BrokenChain(format!(
                    "station '{station}' appears more than once"
                )));
            }
        }

        Ok(())
    }
}

impl TryFrom<Vec<Segment>> for SegmentChain {
    type Error = SectionError;

    fn try_from(segments: Vec<Segment>) -> Result<Self, Self::Error> {
        Self::from_segments(segments)
    }
}

impl From<SegmentChain> for Vec<Segment> {
    fn from(chain: SegmentChain) -> Self {
        chain.segments
    }
}

impl<'a> IntoIterator for &'a SegmentChain {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
