// src/search/mod.rs
// =============================================================================
// The search entry points and what they produce.
//
// Submodules:
// - traversal: Searcher, walking department -> course -> section pages
// - filter: keeps only results with general seats left
// =============================================================================

mod filter;
mod traversal;

pub use filter::{registerable, registerable_section};
pub use traversal::Searcher;

use crate::schedule::{AvailabilityRecord, SectionAvailability};
use serde::{Serialize, Serializer};

// Result of one run
//
// Serializes as a JSON array of {label: counts} for the list searches, and
// as the bare counts (or null) for a section watch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Records(Vec<AvailabilityRecord>),
    Section {
        label: String,
        availability: Option<SectionAvailability>,
    },
}

impl Outcome {
    /// Applies the registerable filter to whichever shape this is
    pub fn registerable(self) -> Self {
        match self {
            Outcome::Records(records) => Outcome::Records(registerable(&records)),
            Outcome::Section {
                label,
                availability,
            } => Outcome::Section {
                label,
                availability: registerable_section(availability),
            },
        }
    }

    /// Labelled rows for display
    pub fn rows(&self) -> Vec<(&str, &SectionAvailability)> {
        match self {
            Outcome::Records(records) => records
                .iter()
                .map(|record| (record.label.as_str(), &record.availability))
                .collect(),
            Outcome::Section {
                label,
                availability,
            } => availability
                .iter()
                .map(|availability| (label.as_str(), availability))
                .collect(),
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Outcome::Records(records) => records.serialize(serializer),
            Outcome::Section { availability, .. } => availability.serialize(serializer),
        }
    }
}
