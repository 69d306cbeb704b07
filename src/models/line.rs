use serde::{Deserialize, Serialize};

use super::id::generate_line_id;
use super::{Segment, SegmentChain, Station};
use crate::constants::{DEFAULT_LINE_COLOR, MIN_SECTIONS};
use crate::error::SectionError;

fn default_color() -> String {
    DEFAULT_LINE_COLOR.to_string()
}

/// A transit line and the sections it runs over
///
/// A line always runs over at least one section; persisted lines without any
/// are rejected on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "LineRecord")]
pub struct Line {
    pub id: uuid::Uuid,
    pub name: String,
    pub color: String,
    sections: SegmentChain,
}

/// Persisted shape of a line, checked before it becomes a `Line`
#[derive(Deserialize)]
struct LineRecord {
    #[serde(default = "generate_line_id")]
    id: uuid::Uuid,
    name: String,
    #[serde(default = "default_color")]
    color: String,
    sections: SegmentChain,
}

impl TryFrom<LineRecord> for Line {
    type Error = SectionError;

    fn try_from(record: LineRecord) -> Result<Self, Self::Error> {
        let line = Self {
            id: record.id,
            name: record.name,
            color: record.color,
            sections: record.sections,
        };
        line.validate()?;
        Ok(line)
    }
}

impl Line {
    /// Create a line running over a single initial section
    ///
    /// # Errors
    /// Propagates any rejection from the section chain
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        first_section: Segment,
    ) -> Result<Self, SectionError> {
        let mut sections = SegmentChain::new();
        sections.add(first_section)?;
        Ok(Self {
            id: generate_line_id(),
            name: name.into(),
            color: color.into(),
            sections,
        })
    }

    /// Check the line still runs over a valid, non-empty chain
    ///
    /// # Errors
    /// Returns `ChainTooSmall` for a line without sections, or the chain's own
    /// `BrokenChain` violation
    pub fn validate(&self) -> Result<(), SectionError> {
        if self.sections.len() < MIN_SECTIONS {
            return Err(SectionError::ChainTooSmall);
        }
        self.sections.validate()
    }

    pub fn update(&mut self, name: impl Into<String>, color: impl Into<String>) {
        self.name = name.into();
        self.color = color.into();
    }

    #[must_use]
    pub fn sections(&self) -> &SegmentChain {
        &self.sections
    }

    /// Stations served by this line, in travel order
    #[must_use]
    pub fn stations(&self) -> Vec<Station> {
        self.sections.get_stations()
    }

    #[must_use]
    pub fn contains(&self, section: &Segment) -> bool {
        self.sections.contains(section)
    }

    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.sections.total_length()
    }

    /// # Errors
    /// See [`SegmentChain::add`]
    pub fn add_section(&mut self, section: Segment) -> Result<(), SectionError> {
        self.sections.add(section)
    }

    /// # Errors
    /// See [`SegmentChain::remove`]
    pub fn remove_station(&mut self, station: &Station) -> Result<Segment, SectionError> {
        self.sections.remove(station)
    }

    /// Dispose of the line, handing back every section it owned
    #[must_use]
    pub fn into_sections(self) -> Vec<Segment> {
        self.sections.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(up: &Station, down: &Station, length: u32) -> Segment {
        Segment::new(up.clone(), down.clone(), length).expect("valid segment")
    }

    #[test]
    fn test_new_line_has_two_stations() {
        let gangnam = Station::new("Gangnam");
        let gwanggyo = Station::new("Gwanggyo");
        let first = segment(&gangnam, &gwanggyo, 45);

        let line = Line::new("Shinbundang", "red", first.clone()).expect("line created");

        assert!(line.contains(&first));
        assert_eq!(line.stations(), vec![gangnam, gwanggyo]);
        assert_eq!(line.total_length(), 45);
    }

    #[test]
    fn test_first_and_last_stop() {
        let gangnam = Station::new("Gangnam");
        let yangjae = Station::new("Yangjae");
        let line = Line::new("Shinbundang", "red", segment(&gangnam, &yangjae, 10))
            .expect("line created");

        let stations = line.stations();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0], gangnam);
        assert_eq!(stations[1], yangjae);
    }

    #[test]
    fn test_add_and_remove_through_line() {
        let (a, b, c) = (Station::new("A"), Station::new("B"), Station::new("C"));
        let mut line = Line::new("2", "green", segment(&a, &b, 10)).expect("line created");

        line.add_section(segment(&b, &c, 5)).expect("append succeeds");
        assert_eq!(line.stations(), vec![a.clone(), b.clone(), c.clone()]);

        let removed = line.remove_station(&b).expect("interior removal succeeds");
        assert_eq!(removed.down_station(), &b);
        assert_eq!(line.stations(), vec![a, c]);
        assert_eq!(line.total_length(), 15);
    }

    #[test]
    fn test_update() {
        let (a, b) = (Station::new("A"), Station::new("B"));
        let mut line = Line::new("1", "blue", segment(&a, &b, 3)).expect("line created");
        line.update("Line 1", "navy");
        assert_eq!(line.name, "Line 1");
        assert_eq!(line.color, "navy");
    }

    #[test]
    fn test_into_sections_releases_everything() {
        let (a, b, c) = (Station::new("A"), Station::new("B"), Station::new("C"));
        let mut line = Line::new("3", "orange", segment(&a, &b, 10)).expect("line created");
        line.add_section(segment(&b, &c, 5)).expect("append succeeds");

        let released = line.into_sections();
        assert_eq!(released.len(), 2);
    }

    #[test]
    fn test_deserialize_defaults_color() {
        let json = r#"{
            "name": "Airport",
            "sections": [
                {"id": 1, "length": 58, "sequence": 0,
                 "up_station": {"id": 1, "name": "Seoul"},
                 "down_station": {"id": 2, "name": "Incheon"}}
            ]
        }"#;
        let line: Line = serde_json::from_str(json).expect("valid json");
        assert_eq!(line.color, DEFAULT_LINE_COLOR);
        assert_eq!(line.sections().len(), 1);
        assert!(line.validate().is_ok());
    }

    #[test]
    fn test_deserialize_rejects_line_without_sections() {
        let empty = serde_json::from_str::<Line>(r#"{"name":"Airport","sections":[]}"#);
        let error = empty.expect_err("a line needs a section").to_string();
        assert!(error.contains("at least one section"), "unexpected error: {error}");

        let missing = serde_json::from_str::<Line>(r#"{"name":"Airport"}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn test_validate_rejects_empty_chain() {
        let (a, b) = (Station::new("A"), Station::new("B"));
        let mut line = Line::new("4", "sky", segment(&a, &b, 10)).expect("line created");
        line.sections = SegmentChain::new();

        assert_eq!(line.validate(), Err(SectionError::ChainTooSmall));
    }
}
