// src/search/filter.rs
// Keeps only results someone could register in right now.

use crate::schedule::{AvailabilityRecord, SectionAvailability};

// Records with at least one general seat left, in their original order
pub fn registerable(records: &[AvailabilityRecord]) -> Vec<AvailabilityRecord> {
    records
        .iter()
        .filter(|record| record.availability.has_general_seats())
        .cloned()
        .collect()
}

// Section-watch counterpart: a full section counts as no result
pub fn registerable_section(
    availability: Option<SectionAvailability>,
) -> Option<SectionAvailability> {
    availability.filter(SectionAvailability::has_general_seats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(general: u32) -> SectionAvailability {
        SectionAvailability {
            general_seats_remaining: general,
            restricted_seats_remaining: 0,
            currently_registered: 10,
        }
    }

    #[test]
    fn test_registerable_keeps_open_sections() {
        let records = vec![
            AvailabilityRecord::new("A", seats(0)),
            AvailabilityRecord::new("B", seats(3)),
        ];
        assert_eq!(
            registerable(&records),
            vec![AvailabilityRecord::new("B", seats(3))]
        );
        // input is left as it was
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_registerable_preserves_order() {
        let records = vec![
            AvailabilityRecord::new("C", seats(1)),
            AvailabilityRecord::new("A", seats(0)),
            AvailabilityRecord::new("B", seats(2)),
        ];
        let labels: Vec<_> = registerable(&records)
            .into_iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, vec!["C", "B"]);
    }

    #[test]
    fn test_registerable_section() {
        assert_eq!(registerable_section(Some(seats(2))), Some(seats(2)));
        assert_eq!(registerable_section(Some(seats(0))), None);
        assert_eq!(registerable_section(None), None);
    }
}
