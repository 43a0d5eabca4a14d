// src/schedule/model.rs
// =============================================================================
// Data types shared by the URL builder, the page parser and the traversal.
//
// - QueryContext: which session (year + term) we're looking at
// - CourseId: department / course / section, partially filled is fine
// - SectionAvailability: the three seat counts from a section detail page
// - AvailabilityRecord: one labelled section, serialized as {label: counts}
// =============================================================================

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

// Registration session term
//
// The site encodes it as a single letter in the `sesscd` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Term {
    #[default]
    Winter,
    Summer,
}

impl Term {
    /// The `sesscd` code the site expects ("W" or "S")
    pub fn code(self) -> &'static str {
        match self {
            Term::Winter => "W",
            Term::Summer => "S",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown term '{0}', expected W (winter) or S (summer)")]
pub struct ParseTermError(String);

impl FromStr for Term {
    type Err = ParseTermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "W" | "WINTER" => Ok(Term::Winter),
            "S" | "SUMMER" => Ok(Term::Summer),
            _ => Err(ParseTermError(s.to_string())),
        }
    }
}

// The session every URL in one run is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryContext {
    pub year: i32,
    pub term: Term,
}

impl QueryContext {
    pub fn new(year: i32, term: Term) -> Self {
        Self { year, term }
    }
}

// Identifies a department, a course, or a single section
//
// Missing course/section just widens the scope. The site is the source of
// truth, so nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseId {
    pub department: String,
    pub course: Option<String>,
    pub section: Option<String>,
}

impl CourseId {
    pub fn department(department: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            ..Self::default()
        }
    }

    pub fn course(department: impl Into<String>, course: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            course: Some(course.into()),
            section: None,
        }
    }

    pub fn section(
        department: impl Into<String>,
        course: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            department: department.into(),
            course: Some(course.into()),
            section: Some(section.into()),
        }
    }

    // Human-readable label: the non-empty fields joined by single spaces,
    // always in department, course, section order
    //
    // Example: CourseId::section("CPSC", "110", "101").label() == "CPSC 110 101"
    pub fn label(&self) -> String {
        [
            Some(self.department.as_str()),
            self.course.as_deref(),
            self.section.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Seat counts read from a section's detail page
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct SectionAvailability {
    pub general_seats_remaining: u32,
    pub restricted_seats_remaining: u32,
    pub currently_registered: u32,
}

impl SectionAvailability {
    /// True when anyone can register right now
    pub fn has_general_seats(&self) -> bool {
        self.general_seats_remaining > 0
    }
}

// One section's result, keyed by its label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRecord {
    pub label: String,
    pub availability: SectionAvailability,
}

impl AvailabilityRecord {
    pub fn new(label: impl Into<String>, availability: SectionAvailability) -> Self {
        Self {
            label: label.into(),
            availability,
        }
    }
}

// Serialized as a single-entry map so the JSON reads {"CPSC 110 101": {...}}
impl Serialize for AvailabilityRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.label, &self.availability)?;
        map.end()
    }
}
